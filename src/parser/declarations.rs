//! Block and declaration binding
//!
//! Each block opens a scope in the parser's [`Environment`]; declarations
//! bind names in the innermost scope and statements resolve names through
//! the scope chain:
//!
//! ```text
//! program ::= block
//! block   ::= "{" decl* stmt* "}"
//! decl    ::= type identifier ";"
//! type    ::= "int" | "float" | "char" | "bool"
//! stmt    ::= block | identifier ";"
//! ```
//!
//! The output repeats the block structure with every used name annotated
//! with the type of its visible declaration:
//! `{ int x; { bool x; x; } x; }` becomes `{ { x:bool; } x:int; }`.
//!
//! [`Environment`]: crate::env::Environment

use crate::env::{BasicType, Symbol};
use crate::lexer::{CharSource, Token, Word};
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

impl<S: CharSource> Parser<S> {
    /// Bind a whole program: exactly one block and nothing after it.
    pub fn program(&mut self) -> Result<&str, ParseError> {
        self.block()?;
        self.expect_end()?;
        Ok(self.output())
    }

    pub(crate) fn block(&mut self) -> Result<(), ParseError> {
        self.match_token(&Token::Punctuation('{'))?;
        self.env.enter();
        self.emit('{');

        self.declarations()?;
        self.statements()?;

        self.match_token(&Token::Punctuation('}'))?;
        self.env.exit();
        self.emit('}');
        Ok(())
    }

    fn declarations(&mut self) -> Result<(), ParseError> {
        while let Some(ty) = self.type_lookahead() {
            self.advance()?;
            let line = self.line;
            let name = self.expect_identifier()?;
            self.match_token(&Token::Punctuation(';'))?;
            self.env.put(name.lexeme(), Symbol::new(ty, line));
        }
        Ok(())
    }

    fn statements(&mut self) -> Result<(), ParseError> {
        loop {
            if self.check(&Token::Punctuation('{')) {
                self.block()?;
            } else if matches!(self.lookahead, Some(Token::Identifier(_))) {
                self.name_statement()?;
            } else {
                return Ok(());
            }
        }
    }

    /// `identifier ";"`: resolve the name and emit `name:type;`.
    fn name_statement(&mut self) -> Result<(), ParseError> {
        let line = self.line;
        let name = self.expect_identifier()?;
        self.match_token(&Token::Punctuation(';'))?;

        let symbol = self.env.get(name.lexeme()).copied().ok_or_else(|| ParseError {
            kind: ParseErrorKind::Unresolved(name.lexeme().to_string()),
            line,
        })?;
        self.emit(format_args!("{}:{};", name, symbol.ty));
        Ok(())
    }

    /// Type named by the lookahead, if it is a type name.
    fn type_lookahead(&self) -> Option<BasicType> {
        match &self.lookahead {
            Some(Token::Identifier(word)) => BasicType::from_name(word.lexeme()),
            _ => None,
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Word, ParseError> {
        if !matches!(self.lookahead, Some(Token::Identifier(_))) {
            return Err(self.unexpected("identifier"));
        }
        match self.advance()? {
            Some(Token::Identifier(word)) => Ok(word),
            _ => Err(self.unexpected("identifier")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::{ParseErrorKind, Parser};

    fn bind(input: &str) -> String {
        let mut parser = Parser::for_str(input).unwrap();
        parser.program().unwrap().to_string()
    }

    #[test]
    fn test_nested_blocks_shadow() {
        assert_eq!(
            bind("{ int x; char y; { bool y; x; y; } x; y; }"),
            "{ { x:int; y:bool; } x:int; y:char; }"
        );
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(bind("{}"), "{ }");
    }

    #[test]
    fn test_redeclaration_overwrites() {
        assert_eq!(bind("{ int a; float a; a; }"), "{ a:float; }");
    }

    #[test]
    fn test_inner_declaration_not_visible_outside() {
        let mut parser = Parser::for_str("{ { int z; }\n z; }").unwrap();
        let err = parser.program().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Unresolved(ref name) if name == "z"));
        assert_eq!(err.line, 2);
        assert_eq!(parser.output(), "{ { }");
    }

    #[test]
    fn test_declaration_needs_name() {
        let mut parser = Parser::for_str("{ int 5; }").unwrap();
        let err = parser.program().unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::Syntax { ref expected, .. } if expected == "identifier"
        ));
    }

    #[test]
    fn test_unclosed_block() {
        let mut parser = Parser::for_str("{ int a; a;").unwrap();
        let err = parser.program().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_keywords_are_not_names() {
        let mut parser = Parser::for_str("{ int true; }").unwrap();
        assert!(parser.program().is_err());
    }
}
