//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, auto-play
//! - **[`panes`]**: stateless render functions for each visible pane
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point is [`App`]: construct it with a recorded
//! [`ScanTrace`](crate::trace::ScanTrace) and call [`App::run`].
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
