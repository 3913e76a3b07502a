//! Main TUI application state and logic

use crate::interpreter::builtins::align_to_line;
use crate::interpreter::constants::{DUMP_LINE_BYTES, ERROR_PREFIX, PROMPT, UNKNOWN_SUFFIX};
use crate::interpreter::context::Control;
use crate::interpreter::engine::Monitor;
use crate::transport::{MockTerminal, Transport};
use crate::ui::panes::{self, MemoryRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Dump lines moved by one PgUp/PgDn
const MEMORY_PAGE_LINES: u32 = 8;

/// Transcript lines kept for the terminal pane
const TRANSCRIPT_LINES: usize = 1000;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Terminal,
    Stack,
    Memory,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: terminal -> stack -> memory)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Terminal => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Memory,
            FocusedPane::Memory => FocusedPane::Terminal,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Terminal => FocusedPane::Memory,
            FocusedPane::Stack => FocusedPane::Terminal,
            FocusedPane::Memory => FocusedPane::Stack,
        }
    }
}

/// The main application state
pub struct App {
    /// The monitor, capturing its output for the transcript pane
    pub monitor: Monitor<MockTerminal>,

    /// Line being typed
    pub input: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub terminal_scroll: usize,
    pub stack_scroll: usize,

    /// First address shown in the memory pane
    pub watch_address: u32,

    /// Last command address the watch was moved to
    followed_address: Option<u32>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the last line produced a diagnostic
    pub is_error: bool,

    /// Oldest transcript lines are dropped past this count
    pub transcript_limit: usize,
}

impl App {
    pub fn new(monitor: Monitor<MockTerminal>) -> Self {
        App {
            monitor,
            input: String::new(),
            focused_pane: FocusedPane::Terminal,
            terminal_scroll: usize::MAX,
            stack_scroll: 0,
            watch_address: 0,
            followed_address: None,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_error: false,
            transcript_limit: TRANSCRIPT_LINES,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key);
                    }
                    Event::Paste(text) => self.insert_text(&text),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes, input line, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Right column: Stack (top) | Memory (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        panes::render_terminal_pane(
            frame,
            columns[0],
            self.monitor.transport(),
            self.focused_pane == FocusedPane::Terminal,
            &mut self.terminal_scroll,
        );

        panes::render_stack_pane(
            frame,
            right_rows[0],
            self.monitor.stack(),
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        panes::render_memory_pane(
            frame,
            right_rows[1],
            MemoryRenderData {
                memory: self.monitor.memory(),
                watch: self.watch_address,
                last_address: self.monitor.last_address(),
            },
            self.focused_pane == FocusedPane::Memory,
        );

        panes::render_input_line(frame, main_chunks[1], &self.input);

        panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            self.monitor.stack().depth(),
            self.monitor.stack().capacity(),
            self.is_error,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') | KeyCode::Char('d')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Terminal => {
                    self.terminal_scroll = self.terminal_scroll.saturating_sub(1);
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_sub(1);
                }
                FocusedPane::Memory => self.move_watch(-1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Terminal => {
                    self.terminal_scroll = self.terminal_scroll.saturating_add(1);
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_add(1);
                }
                FocusedPane::Memory => self.move_watch(1),
            },
            KeyCode::PageUp => self.move_watch(-(MEMORY_PAGE_LINES as i64)),
            KeyCode::PageDown => self.move_watch(MEMORY_PAGE_LINES as i64),
            KeyCode::Char(c) => self.insert_char(c),
            _ => {}
        }
    }

    fn insert_text(&mut self, text: &str) {
        for c in text.chars().filter(|&c| c != '\r' && c != '\n') {
            self.insert_char(c);
        }
    }

    /// Printable ASCII only, bounded like the console line editor
    fn insert_char(&mut self, c: char) {
        if !c.is_ascii() || c.is_ascii_control() {
            return;
        }
        if self.input.len() + 1 >= self.monitor.line_capacity() {
            self.status_message = "Line full".to_string();
            return;
        }
        self.input.push(c);
    }

    /// Shift the memory watch by whole dump lines
    fn move_watch(&mut self, lines: i64) {
        let delta = (lines * DUMP_LINE_BYTES as i64) as u32;
        self.watch_address = align_to_line(self.watch_address.wrapping_add(delta));
        self.status_message = format!("Watching {:08x}", self.watch_address);
    }

    /// Hand the typed line to the monitor and refresh the view state
    fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        let before = self.monitor.transport().output_bytes().len();
        self.monitor
            .transport_mut()
            .write_line(&format!("{}{}", PROMPT, line));

        let control = self.monitor.submit_line(&line);

        let produced =
            String::from_utf8_lossy(&self.monitor.transport().output_bytes()[before..]);
        self.is_error = produced
            .lines()
            .any(|l| l.starts_with(ERROR_PREFIX) || l.ends_with(UNKNOWN_SUFFIX));
        self.monitor
            .transport_mut()
            .keep_last_lines(self.transcript_limit);
        self.status_message = if self.is_error {
            "Error".to_string()
        } else {
            format!("ok: {}", line)
        };

        // Follow memory commands in the memory pane
        let last = self.monitor.last_address();
        if last != self.followed_address {
            if let Some(address) = last {
                self.watch_address = align_to_line(address);
            }
            self.followed_address = last;
        }

        self.terminal_scroll = usize::MAX;

        if control == Control::Quit {
            self.should_quit = true;
        }
    }
}
