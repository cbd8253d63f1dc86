//! # Introduction
//!
//! dragonlex is a small compiler front end: a pull-based scanner with one
//! character of lookahead, a lexical scope chain, and a recursive-descent
//! parser that works on the scanner's token stream. A terminal UI built with
//! [ratatui](https://docs.rs/ratatui) steps through a recorded scanning
//! session token by token.
//!
//! ## Pipeline
//!
//! ```text
//! CharSource → Scanner → Tokens → Parser → Output
//!                                   ↕
//!                               Environment
//! ```
//!
//! 1. [`lexer`]: character sources, the [`lexer::Scanner`], and the token model.
//! 2. [`env`]: the arena-backed scope chain used for declarations.
//! 3. [`parser`]: the expression translator and the block binder.
//! 4. [`trace`]: a recorded scanning session with a step cursor.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use dragonlex::parser::Parser;
//!
//! let mut parser = Parser::for_str("9 - 5 + 2").unwrap();
//! assert_eq!(parser.translate().unwrap(), "9 5 - 2 +");
//! ```

pub mod env;
pub mod lexer;
pub mod parser;
pub mod trace;
pub mod ui;
