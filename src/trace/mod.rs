// Recorded scanning session for stepping back and forth

use crate::lexer::{LexError, Scanner, Token, Word};
use std::fmt;

/// One token of a recorded session
#[derive(Debug, Clone)]
pub struct TraceStep {
    pub token: Token,
    pub line: usize,     // Scanner line right after the token
    pub new_word: bool,  // Token added an entry to the intern table
}

/// Why the trace cursor did not move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    AtStart,
    AtEnd,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::AtStart => write!(f, "already at the first token"),
            StepError::AtEnd => write!(f, "already at the last token"),
        }
    }
}

impl std::error::Error for StepError {}

/// A full scanning session with a cursor over its tokens
#[derive(Debug)]
pub struct ScanTrace {
    steps: Vec<TraceStep>,
    reserved: Vec<Word>,
    error: Option<LexError>,
    final_line: usize,
    position: usize,
}

impl ScanTrace {
    /// Scan `source` to the end or to the first error, keeping every token.
    pub fn record(source: &str) -> Self {
        let mut scanner = Scanner::for_str(source);
        let reserved = scanner.reserved_words().into_iter().cloned().collect();
        let mut steps = Vec::new();
        let mut error = None;

        loop {
            let known = scanner.word_count();
            match scanner.scan_token() {
                Ok(Some(token)) => steps.push(TraceStep {
                    token,
                    line: scanner.line(),
                    new_word: scanner.word_count() > known,
                }),
                Ok(None) => break,
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }

        ScanTrace {
            steps,
            reserved,
            error,
            final_line: scanner.line(),
            position: 0,
        }
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The error that ended the session, if it did not reach end of input.
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    pub fn final_line(&self) -> usize {
        self.final_line
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&TraceStep> {
        self.steps.get(self.position)
    }

    /// Line to highlight for the current position.
    ///
    /// Past the last token this is the error line, or the final line.
    pub fn current_line(&self) -> usize {
        self.current().map_or(self.final_line, |step| step.line)
    }

    /// Intern table contents as of the current position: reserved words in
    /// registration order, then identifiers in order of first appearance.
    pub fn words_known(&self) -> Vec<&Word> {
        let seen = self
            .steps
            .iter()
            .take(self.position + 1)
            .filter(|step| step.new_word)
            .filter_map(|step| step.token.word());
        self.reserved.iter().chain(seen).collect()
    }

    pub fn step_forward(&mut self) -> Result<(), StepError> {
        if self.position + 1 >= self.steps.len() {
            return Err(StepError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), StepError> {
        if self.position == 0 {
            return Err(StepError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.steps.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tokens_and_lines() {
        let trace = ScanTrace::record("a\n+ 1\nb");
        assert_eq!(trace.len(), 4);
        let lines: Vec<usize> = trace.steps().iter().map(|s| s.line).collect();
        assert_eq!(lines, [1, 2, 2, 3]);
        assert!(trace.error().is_none());
    }

    #[test]
    fn test_words_known_grows() {
        let mut trace = ScanTrace::record("foo true foo bar");
        let names = |t: &ScanTrace| -> Vec<String> {
            t.words_known().iter().map(|w| w.lexeme().to_string()).collect()
        };
        assert_eq!(names(&trace), ["true", "false", "foo"]);
        trace.jump_to_end();
        assert_eq!(names(&trace), ["true", "false", "foo", "bar"]);
    }

    #[test]
    fn test_new_word_marks_first_occurrence_only() {
        let trace = ScanTrace::record("x true x y");
        let flags: Vec<bool> = trace.steps().iter().map(|s| s.new_word).collect();
        assert_eq!(flags, [true, false, false, true]);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut trace = ScanTrace::record("1 2");
        assert_eq!(trace.step_backward(), Err(StepError::AtStart));
        assert_eq!(trace.step_forward(), Ok(()));
        assert_eq!(trace.step_forward(), Err(StepError::AtEnd));
        trace.rewind_to_start();
        assert_eq!(trace.current().map(|s| &s.token), Some(&Token::Number(1)));
    }

    #[test]
    fn test_error_is_kept() {
        let trace = ScanTrace::record("1\n/* open");
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.error().map(|e| e.line), Some(2));
    }
}
