//! Line assembly from raw input bytes
//!
//! A serial line delivers one byte at a time with no editing. [`LineEditor`]
//! collects bytes until a carriage return or newline, handles backspace and
//! echoes what was typed when the transport asks for it.

use super::Transport;
use crate::interpreter::constants::{CHAR_BKSP, CHAR_BS, CHAR_CR, CHAR_NL, INPUT_BUFFER_SIZE};

/// Accumulates bytes into a line
#[derive(Debug, Clone)]
pub struct LineEditor {
    buffer: Vec<u8>,
    capacity: usize,
    after_cr: bool,
}

impl LineEditor {
    /// Create an editor holding at most `capacity - 1` characters
    pub fn new(capacity: usize) -> Self {
        LineEditor {
            buffer: Vec::new(),
            capacity,
            after_cr: false,
        }
    }

    /// Feed one byte; returns the finished line once a terminator arrives
    pub fn feed(&mut self, byte: u8, out: &mut dyn Transport) -> Option<String> {
        let echo = out.echo_input();
        let after_cr = std::mem::replace(&mut self.after_cr, byte == CHAR_CR);

        match byte {
            CHAR_NL if after_cr => None,
            CHAR_CR | CHAR_NL => {
                if echo {
                    out.write_line(" ");
                }
                Some(self.take())
            }
            CHAR_BKSP | CHAR_BS => {
                if self.buffer.pop().is_some() && echo {
                    out.write_char(CHAR_BS);
                    out.write_char(b' ');
                    out.write_char(CHAR_BS);
                }
                None
            }
            b if !b.is_ascii() => {
                tracing::trace!(byte = b, "dropping non-ASCII input byte");
                None
            }
            b => {
                if self.buffer.len() + 1 >= self.capacity {
                    tracing::trace!(byte = b, "input buffer full");
                    return None;
                }
                self.buffer.push(b);
                if echo {
                    out.write_char(b);
                }
                None
            }
        }
    }

    /// Take whatever has been typed so far, leaving the editor empty
    pub fn take(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();
        line
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(INPUT_BUFFER_SIZE)
    }
}
