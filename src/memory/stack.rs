//! Data stack implementation
//!
//! [`DataStack`] is a fixed-capacity LIFO of signed 32-bit integers. It is the
//! only place command operands and results live between words.
//!
//! # Error Semantics
//!
//! A failed operation never changes the depth:
//! - `push` on a full stack returns [`MonitorError::StackOverflow`]
//! - `pop` on an empty stack returns [`MonitorError::StackUnderflow`]
//!
//! Reporting the failure and substituting a placeholder is left to the
//! caller (see `Context::pop` in the interpreter).

use crate::interpreter::constants::DATA_STACK_SIZE;
use crate::interpreter::errors::MonitorError;

/// The integer data stack
#[derive(Debug, Clone)]
pub struct DataStack {
    cells: Vec<i32>,
    capacity: usize,
}

impl DataStack {
    pub fn new(capacity: usize) -> Self {
        DataStack {
            cells: Vec::new(),
            capacity,
        }
    }

    /// Push a value onto the top of the stack
    pub fn push(&mut self, value: i32) -> Result<(), MonitorError> {
        if self.cells.len() >= self.capacity {
            return Err(MonitorError::StackOverflow);
        }
        self.cells.push(value);
        Ok(())
    }

    /// Pop the top value
    pub fn pop(&mut self) -> Result<i32, MonitorError> {
        self.cells.pop().ok_or(MonitorError::StackUnderflow)
    }

    /// Top value without removing it
    pub fn peek(&self) -> Option<i32> {
        self.cells.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.cells.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// All values, bottom first (for `.s` and UI display)
    pub fn as_slice(&self) -> &[i32] {
        &self.cells
    }
}

impl Default for DataStack {
    fn default() -> Self {
        Self::new(DATA_STACK_SIZE)
    }
}
