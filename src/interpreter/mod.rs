//! Command interpreter
//!
//! This module provides the word-at-a-time execution logic:
//! - [`engine`]: the [`Monitor`](engine::Monitor) and its read/dispatch loop
//! - [`dictionary`]: named command table with shadowing
//! - [`builtins`]: the stock command set
//! - [`context`]: what a command handler is allowed to touch
//! - [`errors`]: diagnostic types
//!
//! # Execution Model
//!
//! Each input line is split on spaces. A word found in the dictionary runs
//! its handler; a word that is entirely a number is pushed on the data stack;
//! anything else is echoed back with `???` and the rest of the line is
//! dropped. Handler errors are printed and dispatch carries on with the next
//! word.

pub mod builtins;
pub mod constants;
pub mod context;
pub mod dictionary;
pub mod engine;
pub mod errors;
