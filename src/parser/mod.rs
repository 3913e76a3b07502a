//! Input parsing for the monitor
//!
//! - [`lexer`]: [`InputLine`], which splits a line into space-delimited words
//! - [`number`]: conversion of a word into an integer literal

pub mod lexer;
pub mod number;

pub use lexer::InputLine;
