//! Interactive terminal transport
//!
//! Puts the terminal into raw mode so keystrokes arrive one at a time, the
//! way they would over a serial line. Keys are translated into the bytes a
//! serial terminal would send (`Enter` → CR, `Backspace` → DEL) and echo is
//! left to the [`LineEditor`](super::LineEditor).
//!
//! Ctrl-C and Ctrl-D end the input.

use super::Transport;
use crate::interpreter::constants::{CHAR_BKSP, CHAR_CR};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::collections::VecDeque;
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// How long `idle` waits for a key before handing control back
const IDLE_POLL: Duration = Duration::from_millis(10);

pub struct ConsoleTransport {
    stdout: Stdout,
    pending: VecDeque<u8>,
    closed: bool,
}

impl ConsoleTransport {
    /// Enable raw mode and take over the terminal
    pub fn open() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(ConsoleTransport {
            stdout: io::stdout(),
            pending: VecDeque::new(),
            closed: false,
        })
    }

    /// Drain terminal events, waiting at most `timeout` for the first one
    fn pump(&mut self, timeout: Duration) {
        let mut wait = timeout;
        loop {
            match event::poll(wait) {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal poll failed, closing");
                    self.closed = true;
                    return;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.on_key(key),
                Ok(Event::Paste(text)) => self.pending.extend(text.bytes()),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal read failed, closing");
                    self.closed = true;
                    return;
                }
            }
            wait = Duration::ZERO;
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => {
                tracing::debug!("end of input requested");
                self.closed = true;
            }
            KeyCode::Char(c) => {
                let mut buf = [0; 4];
                self.pending.extend(c.encode_utf8(&mut buf).bytes());
            }
            KeyCode::Enter => self.pending.push_back(CHAR_CR),
            KeyCode::Backspace => self.pending.push_back(CHAR_BKSP),
            KeyCode::Tab => self.pending.push_back(b'\t'),
            _ => {}
        }
    }
}

impl Transport for ConsoleTransport {
    fn read_byte(&mut self) -> Option<u8> {
        if self.pending.is_empty() {
            self.pump(Duration::ZERO);
        }
        self.pending.pop_front()
    }

    fn has_input(&mut self) -> bool {
        if self.pending.is_empty() {
            self.pump(Duration::ZERO);
        }
        !self.pending.is_empty()
    }

    fn is_closed(&self) -> bool {
        self.closed && self.pending.is_empty()
    }

    fn idle(&mut self) {
        self.pump(IDLE_POLL);
    }

    fn echo_input(&self) -> bool {
        true
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        // Raw mode does not translate newlines
        let mut raw = Vec::with_capacity(bytes.len());
        for &b in bytes {
            if b == b'\n' {
                raw.push(b'\r');
            }
            raw.push(b);
        }
        if let Err(e) = self.stdout.write_all(&raw).and_then(|_| self.stdout.flush()) {
            tracing::warn!(error = %e, "output error");
        }
    }

    fn write_text(&mut self, text: &str) {
        let text = text.replace('\n', "\r\n");
        if let Err(e) = queue!(self.stdout, Print(text)).and_then(|_| self.stdout.flush()) {
            tracing::warn!(error = %e, "output error");
        }
    }
}

impl Drop for ConsoleTransport {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "failed to leave raw mode");
        }
    }
}
