//! Execution context handed to command handlers

use crate::interpreter::constants::ERROR_PREFIX;
use crate::interpreter::dictionary::Dictionary;
use crate::interpreter::errors::MonitorError;
use crate::memory::{DataStack, Target};
use crate::transport::Transport;

/// What the interpreter loop does after a handler returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Everything a command may touch, borrowed from the monitor for one call
pub struct Context<'a> {
    pub stack: &'a mut DataStack,
    pub memory: &'a mut dyn Target,
    pub out: &'a mut dyn Transport,
    pub dictionary: &'a Dictionary,
    /// Last address a memory command looked at
    pub last_address: &'a mut Option<u32>,
}

impl Context<'_> {
    /// Pop a value, reporting underflow and yielding 0 in its place
    pub fn pop(&mut self) -> i32 {
        match self.stack.pop() {
            Ok(value) => value,
            Err(e) => {
                report(self.out, &e);
                0
            }
        }
    }

    /// Push a value, reporting overflow
    pub fn push(&mut self, value: i32) {
        if let Err(e) = self.stack.push(value) {
            report(self.out, &e);
        }
    }

    /// Pop a value and reinterpret it as an address
    pub fn pop_address(&mut self) -> u32 {
        self.pop() as u32
    }

    pub fn report(&mut self, error: &MonitorError) {
        report(self.out, error);
    }
}

/// Write the diagnostic line for `error`
///
/// Unknown words are echoed back bare; everything else gets the error prefix.
pub fn report(out: &mut dyn Transport, error: &MonitorError) {
    tracing::debug!(%error, "diagnostic");
    if error.discards_line() {
        out.write_line(&error.to_string());
    } else {
        out.write_text(ERROR_PREFIX);
        out.write_line(&error.to_string());
    }
}
