//! Character sources and the single-pushback cursor
//!
//! The scanner never touches an input directly. It reads through a
//! [`Cursor`], which owns a [`CharSource`] and holds at most one character
//! that was read but not yet consumed.

use std::io::{self, BufRead};
use std::str::Chars;

/// An ordered stream of characters.
///
/// `Ok(None)` marks the end of the stream. A blocking source blocks inside
/// `read_char`; nothing above it adds buffering or suspension.
pub trait CharSource {
    fn read_char(&mut self) -> io::Result<Option<char>>;
}

/// Characters of an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Characters of a buffered reader, decoded as UTF-8 one line at a time.
///
/// Reading line by line keeps interactive input usable: a token can be
/// produced as soon as its line is complete.
#[derive(Debug)]
pub struct ReadSource<R: BufRead> {
    reader: R,
    line: Vec<char>,
    position: usize,
    bytes: Vec<u8>,
}

impl<R: BufRead> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            position: 0,
            bytes: Vec::new(),
        }
    }

    /// Refill the line buffer. Returns `false` at end of input.
    fn fill_line(&mut self) -> io::Result<bool> {
        self.bytes.clear();
        if self.reader.read_until(b'\n', &mut self.bytes)? == 0 {
            return Ok(false);
        }

        let text = std::str::from_utf8(&self.bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.line.clear();
        self.line.extend(text.chars());
        self.position = 0;
        Ok(true)
    }
}

impl<R: BufRead> CharSource for ReadSource<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        if self.position >= self.line.len() && !self.fill_line()? {
            return Ok(None);
        }

        let ch = self.line[self.position];
        self.position += 1;
        Ok(Some(ch))
    }
}

/// Exclusive reader over a [`CharSource`] with one character of pushback.
#[derive(Debug)]
pub struct Cursor<S: CharSource> {
    source: S,
    pushback: Option<char>,
}

impl<S: CharSource> Cursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pushback: None,
        }
    }

    /// Consume the next character, taking the pushed-back one first.
    pub fn bump(&mut self) -> io::Result<Option<char>> {
        match self.pushback.take() {
            Some(ch) => Ok(Some(ch)),
            None => self.source.read_char(),
        }
    }

    /// Return one character to the cursor so the next `bump` yields it again.
    pub fn push_back(&mut self, ch: char) {
        debug_assert!(
            self.pushback.is_none(),
            "cursor holds a single character of pushback"
        );
        self.pushback = Some(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<S: CharSource>(mut source: S) -> String {
        let mut out = String::new();
        while let Some(ch) = source.read_char().unwrap() {
            out.push(ch);
        }
        out
    }

    #[test]
    fn test_str_source() {
        assert_eq!(drain(StrSource::new("a b\nc")), "a b\nc");
    }

    #[test]
    fn test_read_source_multi_line() {
        let input = "first\nsecond ∏\n";
        assert_eq!(drain(ReadSource::new(input.as_bytes())), input);
    }

    #[test]
    fn test_read_source_invalid_utf8() {
        let bytes: &[u8] = &[b'a', 0xff, b'\n'];
        let mut source = ReadSource::new(bytes);
        let err = source.read_char().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_cursor_pushback() {
        let mut cursor = Cursor::new(StrSource::new("xy"));
        assert_eq!(cursor.bump().unwrap(), Some('x'));
        cursor.push_back('x');
        assert_eq!(cursor.bump().unwrap(), Some('x'));
        assert_eq!(cursor.bump().unwrap(), Some('y'));
        assert_eq!(cursor.bump().unwrap(), None);
    }
}
