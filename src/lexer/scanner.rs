//! Pull-based scanner
//!
//! [`Scanner::scan_token`] returns one [`Token`] per call and `None` once the
//! character source is exhausted. Whitespace and comments are skipped before
//! every token; newlines consumed while skipping advance the line counter.
//!
//! The scanner owns its intern table. `true` and `false` are registered up
//! front, so every later occurrence returns those same entries.

use super::source::{CharSource, Cursor, StrSource};
use super::token::{Keyword, Rel, Token, Word};
use rustc_hash::FxHashMap;
use std::fmt;
use std::io;

/// What went wrong while scanning.
#[derive(Debug)]
pub enum LexErrorKind {
    /// `/` followed by something other than `/` or `*` (`None` at end of input)
    IllegalComment(Option<char>),
    /// End of input inside `/* ...`
    UnterminatedComment,
    /// The character source failed
    Io(io::Error),
}

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexer error at line {}: ", self.line)?;
        match &self.kind {
            LexErrorKind::IllegalComment(Some(ch)) => {
                write!(f, "illegal comment: '/' followed by {:?}", ch)
            }
            LexErrorKind::IllegalComment(None) => {
                write!(f, "illegal comment: '/' at end of input")
            }
            LexErrorKind::UnterminatedComment => write!(f, "unterminated block comment"),
            LexErrorKind::Io(e) => write!(f, "failed to read input: {}", e),
        }
    }
}

impl std::error::Error for LexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            LexErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Scanner over a character source
pub struct Scanner<S: CharSource> {
    cursor: Cursor<S>,
    line: usize,
    words: FxHashMap<Box<str>, Word>,
    failed: bool,
}

impl<S: CharSource> Scanner<S> {
    pub fn new(source: S) -> Self {
        let mut words = FxHashMap::default();
        for keyword in Keyword::ALL {
            words.insert(keyword.lexeme().into(), Word::reserved(keyword));
        }

        Self {
            cursor: Cursor::new(source),
            line: 1,
            words,
            failed: false,
        }
    }

    /// Current line (starting at one).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Every word in the intern table, reserved words included, sorted by lexeme.
    pub fn words(&self) -> Vec<&Word> {
        let mut words: Vec<&Word> = self.words.values().collect();
        words.sort_by(|a, b| a.lexeme().cmp(b.lexeme()));
        words
    }

    /// The reserved words, in registration order.
    pub fn reserved_words(&self) -> Vec<&Word> {
        Keyword::ALL
            .iter()
            .filter_map(|keyword| self.words.get(keyword.lexeme()))
            .collect()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Produce the next token, or `None` at end of input.
    pub fn scan_token(&mut self) -> Result<Option<Token>, LexError> {
        let ch = loop {
            let Some(ch) = self.skip_whitespace()? else {
                return Ok(None);
            };
            if ch != '/' {
                break ch;
            }
            self.skip_comment()?;
        };

        let token = if let Some(rel) = Rel::from_char(ch) {
            self.relational(rel)?
        } else if let Some(digit) = ch.to_digit(10) {
            self.number(digit)?
        } else if ch.is_alphabetic() {
            self.word(ch)?
        } else {
            // Nothing is pushed back: the next call starts from fresh input.
            Token::Punctuation(ch)
        };

        Ok(Some(token))
    }

    /// Discard blanks and newlines, returning the first other character.
    fn skip_whitespace(&mut self) -> Result<Option<char>, LexError> {
        loop {
            match self.read()? {
                Some(' ') | Some('\t') | Some('\r') => {}
                Some('\n') => self.line += 1,
                other => return Ok(other),
            }
        }
    }

    /// Skip one comment whose leading `/` was already consumed.
    fn skip_comment(&mut self) -> Result<(), LexError> {
        let start_line = self.line;
        match self.read()? {
            Some('/') => loop {
                match self.read()? {
                    Some('\n') => {
                        self.line += 1;
                        return Ok(());
                    }
                    Some(_) => {}
                    None => return Ok(()),
                }
            },
            Some('*') => {
                let mut prev = None;
                loop {
                    let Some(ch) = self.read()? else {
                        return Err(LexError {
                            kind: LexErrorKind::UnterminatedComment,
                            line: start_line,
                        });
                    };
                    if ch == '\n' {
                        self.line += 1;
                    }
                    if prev == Some('*') && ch == '/' {
                        return Ok(());
                    }
                    prev = Some(ch);
                }
            }
            other => Err(LexError {
                kind: LexErrorKind::IllegalComment(other),
                line: start_line,
            }),
        }
    }

    /// `<`, `>`, `=` or `!`, optionally followed by `=`.
    fn relational(&mut self, rel: Rel) -> Result<Token, LexError> {
        let rel = match self.read()? {
            Some('=') => rel.with_eq(),
            Some(next) => {
                self.cursor.push_back(next);
                rel
            }
            None => rel,
        };
        Ok(Token::Operator(rel))
    }

    /// Decimal integer literal. Overflow wraps.
    fn number(&mut self, first_digit: u32) -> Result<Token, LexError> {
        let mut value = first_digit as i32;
        while let Some(ch) = self.read()? {
            match ch.to_digit(10) {
                Some(digit) => value = value.wrapping_mul(10).wrapping_add(digit as i32),
                None => {
                    self.cursor.push_back(ch);
                    break;
                }
            }
        }
        Ok(Token::Number(value))
    }

    /// Identifier or reserved word, resolved through the intern table.
    fn word(&mut self, first_char: char) -> Result<Token, LexError> {
        let mut lexeme = String::new();
        lexeme.push(first_char);

        while let Some(ch) = self.read()? {
            if ch.is_alphanumeric() {
                lexeme.push(ch);
            } else {
                self.cursor.push_back(ch);
                break;
            }
        }

        let word = match self.words.get(lexeme.as_str()) {
            Some(word) => word.clone(),
            None => {
                let word = Word::identifier(&lexeme);
                self.words.insert(lexeme.into_boxed_str(), word.clone());
                word
            }
        };

        Ok(Token::from(word))
    }

    fn read(&mut self) -> Result<Option<char>, LexError> {
        self.cursor.bump().map_err(|e| LexError {
            kind: LexErrorKind::Io(e),
            line: self.line,
        })
    }
}

impl<'a> Scanner<StrSource<'a>> {
    /// Scanner over an in-memory string.
    pub fn for_str(input: &'a str) -> Self {
        Scanner::new(StrSource::new(input))
    }
}

impl<S: CharSource> Iterator for Scanner<S> {
    type Item = Result<Token, LexError>;

    /// Yields tokens until end of input; stops for good after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.scan_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: CharSource> fmt::Debug for Scanner<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("line", &self.line)
            .field("words", &self.words.len())
            .field("failed", &self.failed)
            .finish()
    }
}
