//! # Introduction
//!
//! clmon is a small interactive command line monitor in the spirit of the
//! ones burned into microcontroller boards. It reads a line of
//! space-separated words, pushes numbers on a data stack and runs named
//! commands that do arithmetic, print values and peek, poke or dump memory.
//!
//! ## Execution pipeline
//!
//! ```text
//! Transport → Line editor → Tokenizer → Dictionary / Literal parser → Stack / Target
//! ```
//!
//! 1. [`transport`] — byte-level I/O: a raw-mode console, buffered stdio, or
//!    a [`transport::MockTerminal`] capturing output for tests and the TUI.
//! 2. [`parser`] — splits a line into words and parses numeric literals.
//! 3. [`interpreter`] — the [`interpreter::engine::Monitor`] loop, the
//!    command dictionary and the built-in commands.
//! 4. [`memory`] — the data stack and the [`memory::Target`] address spaces:
//!    a bounds-checked simulated region, or raw hardware addresses.
//! 5. [`config`] — command-line arguments and monitor sizing.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use clmon::config::MonitorConfig;
//! use clmon::interpreter::engine::Monitor;
//! use clmon::transport::MockTerminal;
//!
//! let mut monitor = Monitor::simulated(&MonitorConfig::default(), MockTerminal::new()).unwrap();
//! monitor.submit_line("0x10 0x41 poke 0x10 peek");
//! assert_eq!(monitor.transport().output(), "00000010 -> 41\n00000010 41\n");
//! ```

pub mod config;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod transport;
pub mod ui;
