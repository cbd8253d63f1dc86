//! Expression translation
//!
//! Translates `+`/`-` expressions over integer literals into postfix
//! notation while parsing them:
//!
//! ```text
//! expr ::= term (("+" | "-") term)*
//! term ::= number
//! ```
//!
//! `9-5+2` is emitted as `9 5 - 2 +`.

use crate::lexer::{CharSource, Token};
use crate::parser::parse::{ParseError, Parser};

impl<S: CharSource> Parser<S> {
    /// Translate one whole expression; trailing tokens are an error.
    pub fn translate(&mut self) -> Result<&str, ParseError> {
        self.expr()?;
        self.expect_end()?;
        Ok(self.output())
    }

    /// Parse `term (("+" | "-") term)*`, emitting each operator after its
    /// right operand.
    pub fn expr(&mut self) -> Result<(), ParseError> {
        self.term()?;
        loop {
            let op = match self.lookahead {
                Some(Token::Punctuation(op @ ('+' | '-'))) => op,
                _ => return Ok(()),
            };
            self.match_token(&Token::Punctuation(op))?;
            self.term()?;
            self.emit(op);
        }
    }

    /// Parse a single number and emit it.
    pub fn term(&mut self) -> Result<(), ParseError> {
        match self.lookahead {
            Some(Token::Number(value)) => {
                self.advance()?;
                self.emit(value);
                Ok(())
            }
            _ => Err(self.unexpected("number")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::{ParseErrorKind, Parser};

    fn translate(input: &str) -> String {
        let mut parser = Parser::for_str(input).unwrap();
        parser.translate().unwrap().to_string()
    }

    #[test]
    fn test_postfix_translation() {
        assert_eq!(translate("9-5+2"), "9 5 - 2 +");
        assert_eq!(translate("12 + 3 - 45"), "12 3 + 45 -");
        assert_eq!(translate("7"), "7");
    }

    #[test]
    fn test_comments_between_terms() {
        assert_eq!(translate("1 // one\n+ /* two */ 2"), "1 2 +");
    }

    #[test]
    fn test_missing_term_stops_output() {
        let mut parser = Parser::for_str("1-+2").unwrap();
        let err = parser.translate().unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::Syntax { ref expected, .. } if expected == "number"
        ));
        assert_eq!(parser.output(), "1");
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let mut parser = Parser::for_str("1+2 3").unwrap();
        assert!(parser.translate().is_err());
        assert_eq!(parser.output(), "1 2 +");
    }

    #[test]
    fn test_empty_input() {
        let mut parser = Parser::for_str("").unwrap();
        let err = parser.translate().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedEnd { .. }));
    }
}
