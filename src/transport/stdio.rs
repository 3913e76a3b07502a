//! Transport over a plain reader/writer pair
//!
//! Used when standard input is not a terminal, e.g. `cat session.txt | clmon`.
//! Input is pulled a line at a time; with nothing else to schedule, blocking
//! on the reader is the cooperative wait.

use super::Transport;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

pub struct StdioTransport<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<u8>,
    closed: bool,
}

impl<R: BufRead, W: Write> StdioTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StdioTransport {
            reader,
            writer,
            pending: VecDeque::new(),
            closed: false,
        }
    }

    /// Consume the transport, returning the writer
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn fill(&mut self) {
        if !self.pending.is_empty() || self.closed {
            return;
        }
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => self.closed = true,
            Ok(n) => {
                tracing::trace!(bytes = n, "read input line");
                self.pending.extend(line);
            }
            Err(e) => {
                tracing::warn!(error = %e, "input error, closing");
                self.closed = true;
            }
        }
    }
}

impl<R: BufRead, W: Write> Transport for StdioTransport<R, W> {
    fn read_byte(&mut self) -> Option<u8> {
        self.fill();
        self.pending.pop_front()
    }

    fn has_input(&mut self) -> bool {
        self.fill();
        !self.pending.is_empty()
    }

    fn is_closed(&self) -> bool {
        self.closed && self.pending.is_empty()
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if let Err(e) = self
            .writer
            .write_all(bytes)
            .and_then(|_| self.writer.flush())
        {
            tracing::warn!(error = %e, "output error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_bytes_until_end() {
        let mut io = StdioTransport::new(Cursor::new("1 .\n2"), Vec::new());
        let mut bytes = Vec::new();
        while let Some(b) = io.read_byte() {
            bytes.push(b);
        }
        assert_eq!(bytes, b"1 .\n2");
        assert!(io.is_closed());
        assert!(!io.has_input());
    }

    #[test]
    fn test_writes_through() {
        let mut io = StdioTransport::new(Cursor::new(""), Vec::new());
        io.write_text("> ");
        io.write_line("ok");
        io.write_char(b'!');
        assert_eq!(io.into_writer(), b"> ok\n!");
    }

    #[test]
    fn test_write_char_sends_one_byte() {
        let mut io = StdioTransport::new(Cursor::new(""), Vec::new());
        io.write_char(0xe9);
        io.write_char(0x7f);
        assert_eq!(io.into_writer(), vec![0xe9, 0x7f]);
    }
}
