//! Character transport between the monitor and its user
//!
//! The interpreter only needs a non-blocking byte source and a text sink.
//! This module defines that boundary as the [`Transport`] trait and provides
//! the implementations the binary and the tests use:
//!
//! - [`console`]: interactive terminal in raw mode (crossterm), with echo
//! - [`stdio`]: any reader/writer pair, for piped input
//! - [`mock`]: scripted input and captured output, for tests and the TUI
//! - [`line`]: the [`LineEditor`] that turns bytes into complete lines

pub mod console;
pub mod line;
pub mod mock;
pub mod stdio;

pub use console::ConsoleTransport;
pub use line::LineEditor;
pub use mock::MockTerminal;
pub use stdio::StdioTransport;

/// Byte-level I/O used by the interpreter loop
pub trait Transport {
    /// Next input byte, if one is available right now
    fn read_byte(&mut self) -> Option<u8>;

    /// Whether a byte is ready to be read without waiting
    fn has_input(&mut self) -> bool;

    /// Whether the input side has ended for good
    fn is_closed(&self) -> bool {
        false
    }

    /// Give up the CPU while waiting for input
    fn idle(&mut self) {
        std::thread::yield_now();
    }

    /// Whether typed characters should be echoed back
    fn echo_input(&self) -> bool {
        false
    }

    /// Send raw bytes, unmodified
    fn write_bytes(&mut self, bytes: &[u8]);

    fn write_text(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    /// Send exactly one byte, whatever its value
    fn write_char(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }

    fn write_line(&mut self, text: &str) {
        self.write_text(text);
        self.write_text("\n");
    }
}
