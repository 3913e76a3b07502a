//! Error types for the command line monitor
//!
//! This module defines [`MonitorError`], which represents every condition a
//! command can report while the monitor is running.
//!
//! None of these errors are fatal. A handler that hits one returns it, the
//! interpreter loop prints a diagnostic line and carries on. Only an unknown
//! command additionally discards the rest of the current input line.

use crate::memory::Width;
use std::fmt;

/// Errors that can occur while interpreting a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// Push onto a full data stack
    StackOverflow,

    /// Pop from an empty data stack
    StackUnderflow,

    /// Division or modulo by zero
    DivideByZero { operation: &'static str },

    /// Word is neither a dictionary entry nor a number
    UnknownCommand { word: String },

    /// Registration beyond the dictionary's fixed capacity
    DictionaryFull { capacity: usize },

    /// Access outside the simulated memory region
    AddressOutOfRange { address: u32, width: Width },

    /// Command not available on the current target
    Unsupported { message: String },
}

impl MonitorError {
    /// Whether the rest of the input line should be thrown away
    pub fn discards_line(&self) -> bool {
        matches!(self, MonitorError::UnknownCommand { .. })
    }
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::StackOverflow => write!(f, "Data Stack Overflow!"),
            MonitorError::StackUnderflow => write!(f, "Data Stack Underflow!"),
            MonitorError::DivideByZero { operation } => write!(f, "{}", operation),
            MonitorError::UnknownCommand { word } => write!(f, "{} ???", word),
            MonitorError::DictionaryFull { capacity } => {
                write!(f, "Dictionary full: capacity is {} entries", capacity)
            }
            MonitorError::AddressOutOfRange { address, width } => {
                write!(
                    f,
                    "Address {:08x} out of range for a {}-bit access",
                    address,
                    width.bits()
                )
            }
            MonitorError::Unsupported { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for MonitorError {}
