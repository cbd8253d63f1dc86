//! Lexical analysis
//!
//! This module turns a character stream into [`Token`]s:
//! - [`source`]: the [`CharSource`] abstraction and the one-character-pushback [`Cursor`]
//! - [`token`]: the token sum type and interned [`Word`]s
//! - [`scanner`]: the pull-based [`Scanner`]
//!
//! # Token Set
//!
//! - Non-negative decimal integers (32-bit, wrapping)
//! - Identifiers: a letter followed by letters or digits
//! - Reserved words `true` and `false`
//! - Relational operators `<`, `<=`, `>`, `>=`, `=`, `==`, `!`, `!=`
//! - Any other character as single-character punctuation
//!
//! `// ...` and `/* ... */` comments are skipped. A `/` that does not open a
//! comment is a lexical error.

pub mod scanner;
pub mod source;
pub mod token;

pub use scanner::{LexError, LexErrorKind, Scanner};
pub use source::{CharSource, Cursor, ReadSource, StrSource};
pub use token::{Keyword, Rel, Tag, Token, Word};

/// Scan a whole string into a token vector.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Scanner::for_str(input).collect()
}
