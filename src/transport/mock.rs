//! Scripted transport for tests and the TUI

use super::Transport;
use std::borrow::Cow;
use std::collections::VecDeque;

/// Mock terminal that replays queued input and captures all output
///
/// Output is kept as raw bytes so that single-byte writes such as `emit`
/// are recorded exactly as a serial line would carry them.
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    input: VecDeque<u8>,
    output: Vec<u8>,
    echo: bool,
    /// Once set, an empty input queue means end of input
    close_when_drained: bool,
}

impl MockTerminal {
    pub fn new() -> Self {
        MockTerminal::default()
    }

    /// A terminal that delivers `input` and then reports end of input
    pub fn with_input(input: &str) -> Self {
        MockTerminal {
            input: input.bytes().collect(),
            close_when_drained: true,
            ..MockTerminal::default()
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Queue more input bytes
    pub fn push_input(&mut self, input: &str) {
        self.input.extend(input.bytes());
    }

    /// Everything written so far, as text (invalid UTF-8 shown as U+FFFD)
    pub fn output(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }

    /// Everything written so far, byte for byte
    pub fn output_bytes(&self) -> &[u8] {
        &self.output
    }

    /// Take the captured output, leaving the buffer empty
    pub fn take_output(&mut self) -> String {
        let bytes = std::mem::take(&mut self.output);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Get all output as a vector of lines
    pub fn get_output(&self) -> Vec<String> {
        let mut result: Vec<String> = self.output().split('\n').map(|s| s.to_string()).collect();
        // Remove trailing empty string if text ended with newline
        if result.last().is_some_and(|s| s.is_empty()) {
            result.pop();
        }
        result
    }

    /// Drop the oldest output so at most `max` lines remain
    ///
    /// An unterminated last line counts as a line.
    pub fn keep_last_lines(&mut self, max: usize) {
        let complete = self.output.iter().filter(|&&b| b == b'\n').count();
        let partial = usize::from(self.output.last().is_some_and(|&b| b != b'\n'));
        let excess = (complete + partial).saturating_sub(max);
        if excess == 0 {
            return;
        }
        let cut = self
            .output
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .nth(excess - 1)
            .map_or(self.output.len(), |(i, _)| i + 1);
        self.output.drain(..cut);
    }

    pub fn clear(&mut self) {
        self.output.clear();
    }
}

impl Transport for MockTerminal {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn has_input(&mut self) -> bool {
        !self.input.is_empty()
    }

    fn is_closed(&self) -> bool {
        self.close_when_drained && self.input.is_empty()
    }

    fn echo_input(&self) -> bool {
        self.echo
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_input_then_closes() {
        let mut term = MockTerminal::with_input("ab");
        assert!(!term.is_closed());
        assert!(term.has_input());
        assert_eq!(term.read_byte(), Some(b'a'));
        assert_eq!(term.read_byte(), Some(b'b'));
        assert_eq!(term.read_byte(), None);
        assert!(term.is_closed());
    }

    #[test]
    fn test_new_terminal_never_closes() {
        let mut term = MockTerminal::new();
        assert_eq!(term.read_byte(), None);
        assert!(!term.is_closed());
    }

    #[test]
    fn test_output_lines() {
        let mut term = MockTerminal::new();
        term.write_text("> ");
        term.write_line("1 2 3 ");
        term.write_char(b'A');
        term.write_line("");
        assert_eq!(term.get_output(), vec!["> 1 2 3 ", "A"]);
        assert_eq!(term.take_output(), "> 1 2 3 \nA\n");
        assert!(term.output().is_empty());
    }

    #[test]
    fn test_high_bytes_are_captured_raw() {
        let mut term = MockTerminal::new();
        term.write_char(0xe9);
        term.write_char(b'!');
        assert_eq!(term.output_bytes(), &[0xe9, b'!']);
        assert_eq!(term.output(), "\u{fffd}!");
    }

    #[test]
    fn test_keep_last_lines() {
        let mut term = MockTerminal::new();
        for n in 1..=5 {
            term.write_line(&n.to_string());
        }
        term.keep_last_lines(2);
        assert_eq!(term.output(), "4\n5\n");
        term.keep_last_lines(10);
        assert_eq!(term.output(), "4\n5\n");

        term.write_text("> ");
        term.keep_last_lines(2);
        assert_eq!(term.output(), "5\n> ");

        term.keep_last_lines(0);
        assert!(term.output_bytes().is_empty());
    }
}
