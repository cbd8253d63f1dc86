//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and the shared parsing
//! infrastructure: error types, the one-token lookahead, and `match_token`.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, lookahead handling, output buffer
//! - `expressions`: the infix-to-postfix translator for `+`/`-` expressions
//! - `declarations`: the block binder that records declarations in an [`Environment`]
//!
//! Parser methods are split across files using `impl Parser` blocks. Parsing
//! never recovers: the first error aborts and nothing more is emitted.

use crate::env::Environment;
use crate::lexer::{CharSource, LexError, Scanner, StrSource, Token};
use std::fmt;

/// What went wrong while parsing.
#[derive(Debug)]
pub enum ParseErrorKind {
    /// The lookahead token is not what the grammar allows here
    Syntax { found: String, expected: String },
    /// Input ended where the grammar needs more
    UnexpectedEnd { expected: String },
    /// A name used in a statement has no visible declaration
    Unresolved(String),
    /// The scanner failed
    Lex(LexError),
}

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::Lex(e) => write!(f, "{}", e),
            ParseErrorKind::Syntax { found, expected } => write!(
                f,
                "Syntax error at line {}: expected {}, found {}",
                self.line, expected, found
            ),
            ParseErrorKind::UnexpectedEnd { expected } => write!(
                f,
                "Syntax error at line {}: expected {}, found end of input",
                self.line, expected
            ),
            ParseErrorKind::Unresolved(name) => write!(
                f,
                "Name error at line {}: '{}' is not declared",
                self.line, name
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            line: err.line,
            kind: ParseErrorKind::Lex(err),
        }
    }
}

/// Recursive descent parser over the scanner's token stream
pub struct Parser<S: CharSource> {
    pub(crate) scanner: Scanner<S>,
    pub(crate) lookahead: Option<Token>,
    pub(crate) line: usize, // Line of the lookahead token
    pub(crate) output: String,
    pub(crate) env: Environment,
}

impl<S: CharSource> Parser<S> {
    /// Create a parser and read its first lookahead token.
    pub fn new(source: S) -> Result<Self, ParseError> {
        let mut parser = Self {
            scanner: Scanner::new(source),
            lookahead: None,
            line: 1,
            output: String::new(),
            env: Environment::new(),
        };
        parser.advance()?;
        Ok(parser)
    }

    /// Text emitted so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn lookahead(&self) -> Option<&Token> {
        self.lookahead.as_ref()
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Consume the lookahead if it equals `expected`, otherwise fail.
    pub fn match_token(&mut self, expected: &Token) -> Result<(), ParseError> {
        if self.lookahead.as_ref() == Some(expected) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", expected)))
        }
    }

    /// Fail unless all input has been consumed.
    pub fn expect_end(&self) -> Result<(), ParseError> {
        match &self.lookahead {
            None => Ok(()),
            Some(token) => Err(ParseError {
                kind: ParseErrorKind::Syntax {
                    found: format!("'{}'", token),
                    expected: "end of input".to_string(),
                },
                line: self.line,
            }),
        }
    }

    // ===== Helper methods =====

    /// Replace the lookahead with the next token, returning the old one.
    pub(crate) fn advance(&mut self) -> Result<Option<Token>, ParseError> {
        let next = self.scanner.scan_token()?;
        self.line = self.scanner.line();
        Ok(std::mem::replace(&mut self.lookahead, next))
    }

    pub(crate) fn check(&self, expected: &Token) -> bool {
        self.lookahead.as_ref() == Some(expected)
    }

    /// Error describing the lookahead as not matching `expected`.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let kind = match &self.lookahead {
            Some(token) => ParseErrorKind::Syntax {
                found: format!("{} '{}'", token.kind_name(), token),
                expected: expected.to_string(),
            },
            None => ParseErrorKind::UnexpectedEnd {
                expected: expected.to_string(),
            },
        };
        ParseError {
            kind,
            line: self.line,
        }
    }

    /// Append one output item, separated from the previous one by a space.
    pub(crate) fn emit(&mut self, item: impl fmt::Display) {
        if !self.output.is_empty() {
            self.output.push(' ');
        }
        self.output.push_str(&item.to_string());
    }
}

impl<'a> Parser<StrSource<'a>> {
    /// Parser over an in-memory string.
    pub fn for_str(input: &'a str) -> Result<Self, ParseError> {
        Parser::new(StrSource::new(input))
    }
}

impl<S: CharSource> fmt::Debug for Parser<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("lookahead", &self.lookahead)
            .field("line", &self.line)
            .field("output", &self.output)
            .finish()
    }
}
