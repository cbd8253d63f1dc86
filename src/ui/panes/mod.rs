//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Input text with highlighting and the current token's line
//! - [`tokens`]: The recorded token stream
//! - [`words`]: The scanner's intern table at the current position
//! - [`output`]: Translator or binder output and errors
//! - [`status`]: Status bar with keybindings and trace position
//!
//! Each pane module exports a `render_*` function taking the frame, its area,
//! the data to draw, whether it has focus, and its scroll state.

pub mod output;
pub mod source;
pub mod status;
pub mod tokens;
pub mod words;

pub use output::{render_output_pane, OutputLine};
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use words::render_words_pane;
