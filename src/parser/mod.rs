//! Recursive descent parsing over the scanner's token stream
//!
//! - [`parse`]: the [`Parser`] struct, lookahead handling and error types
//! - [`expressions`]: translation of `+`/`-` expressions to postfix
//! - [`declarations`]: block binding with a scope chain
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with a single token of lookahead.
//! No error recovery: the first error aborts the parse.

pub mod declarations;
pub mod expressions;
pub mod parse;

pub use parse::{ParseError, ParseErrorKind, Parser};
