//! Word extraction from an input line
//!
//! [`InputLine`] holds one line of terminal input and hands out the
//! space-delimited words in it, one call at a time. Words are non-owning
//! slices of the buffer; the terminator that ended a word is simply skipped
//! rather than overwritten.
//!
//! A carriage return or newline ends the current word *and* the line, so any
//! characters after it are never seen. Only the space character separates
//! words; tabs are part of a word.

use crate::interpreter::constants::{CHAR_CR, CHAR_NL, CHAR_SP, INPUT_BUFFER_SIZE};

/// Fixed-capacity line buffer with a read cursor
#[derive(Debug, Clone)]
pub struct InputLine {
    text: String,
    capacity: usize,
    cursor: usize,
    exhausted: bool,
}

impl InputLine {
    /// Create an empty, already exhausted line holding at most
    /// `capacity - 1` bytes of text
    pub fn new(capacity: usize) -> Self {
        InputLine {
            text: String::new(),
            capacity,
            cursor: 0,
            exhausted: true,
        }
    }

    /// Replace the buffer contents and rewind the cursor
    ///
    /// Text beyond the buffer capacity is dropped.
    pub fn fill(&mut self, text: &str) {
        let mut end = text.len().min(self.capacity.saturating_sub(1));
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end < text.len() {
            tracing::warn!(dropped = text.len() - end, "input line truncated");
        }
        self.text.clear();
        self.text.push_str(&text[..end]);
        self.cursor = 0;
        self.exhausted = false;
    }

    /// Extract the next word, or `None` at the end of the line
    pub fn next_word(&mut self) -> Option<&str> {
        let bytes = self.text.as_bytes();

        // Drop leading spaces
        while !self.exhausted && bytes.get(self.cursor) == Some(&CHAR_SP) {
            self.cursor += 1;
        }

        let start = self.cursor;
        let mut end = start;
        while !self.exhausted {
            match bytes.get(self.cursor) {
                None => {
                    // Running off the filled text ends the line like a newline
                    self.exhausted = true;
                }
                Some(&CHAR_CR) | Some(&CHAR_NL) => {
                    self.cursor += 1;
                    self.exhausted = true;
                }
                Some(&CHAR_SP) => {
                    self.cursor += 1;
                    break;
                }
                Some(_) => {
                    self.cursor += 1;
                    end = self.cursor;
                }
            }
        }

        if end > start {
            Some(&self.text[start..end])
        } else {
            None
        }
    }

    /// Whether a line terminator has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The full text of the current line
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InputLine {
    fn default() -> Self {
        Self::new(INPUT_BUFFER_SIZE)
    }
}
