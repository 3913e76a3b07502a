//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, line input
//! - **[`panes`]** — stateless render functions for each visible pane (stack,
//!   memory, transcript, input line, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Monitor`]
//! capturing into a [`MockTerminal`] and call [`App::run`] to start the event
//! loop.
//!
//! [`Monitor`]: crate::interpreter::engine::Monitor
//! [`MockTerminal`]: crate::transport::MockTerminal
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
