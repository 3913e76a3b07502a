// Execution engine for the command line monitor

use crate::config::MonitorConfig;
use crate::interpreter::builtins::register_builtins;
use crate::interpreter::constants::PROMPT;
use crate::interpreter::context::{report, Context, Control};
use crate::interpreter::dictionary::{Dictionary, Handler};
use crate::interpreter::errors::MonitorError;
use crate::memory::{DataStack, SimulatedMemory, Target};
use crate::parser::{number, InputLine};
use crate::transport::{LineEditor, Transport};

/// Where the interpreter loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Waiting for a complete line from the transport
    AwaitingLine,
    /// Executing the words of the current line
    Dispatching,
    /// Stopped by `quit` or end of input
    Terminated,
}

/// The monitor: data stack, dictionary, input line and target, driven over
/// a transport
pub struct Monitor<T: Transport> {
    /// Operand stack shared by all commands
    stack: DataStack,

    /// Registered commands
    dictionary: Dictionary,

    /// Line currently being dispatched
    line: InputLine,

    /// Assembles transport bytes into lines
    editor: LineEditor,

    /// Address space the memory commands operate on
    memory: Box<dyn Target>,

    /// Where input comes from and output goes
    transport: T,

    /// Last address touched by a memory command (for the TUI memory pane)
    last_address: Option<u32>,

    state: State,
}

impl<T: Transport> Monitor<T> {
    /// Create a monitor with the built-in commands registered
    pub fn new(config: &MonitorConfig, memory: Box<dyn Target>, transport: T) -> Result<Self, MonitorError> {
        let mut dictionary = Dictionary::new(config.dictionary_size);
        register_builtins(&mut dictionary, config.allow_quit && memory.allows_exit())?;

        tracing::info!(
            memory = memory.name(),
            stack = config.stack_depth,
            dictionary = dictionary.capacity(),
            builtins = dictionary.len(),
            line = config.line_length,
            "monitor created"
        );

        Ok(Monitor {
            stack: DataStack::new(config.stack_depth),
            dictionary,
            line: InputLine::new(config.line_length),
            editor: LineEditor::new(config.line_length),
            memory,
            transport,
            last_address: None,
            state: State::AwaitingLine,
        })
    }

    /// Create a monitor over a fresh simulated memory region
    pub fn simulated(config: &MonitorConfig, transport: T) -> Result<Self, MonitorError> {
        let memory = SimulatedMemory::new(config.memory_size);
        Self::new(config, Box::new(memory), transport)
    }

    /// Add a command; it shadows any built-in with the same name
    pub fn register(&mut self, name: &str, handler: Handler, help: &str) -> Result<(), MonitorError> {
        self.dictionary.register(name, handler, help)
    }

    /// Print the startup banner
    pub fn banner(&mut self) {
        self.transport.write_line(&format!(
            "Command Line Monitor v{}",
            env!("CARGO_PKG_VERSION")
        ));
        self.transport
            .write_line(&format!("Target: {}", self.memory.name()));
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) {
        while self.state != State::Terminated {
            self.state = State::AwaitingLine;
            self.transport.write_text(PROMPT);

            let Some(text) = self.await_line() else {
                self.transport.write_line("^D");
                self.state = State::Terminated;
                break;
            };

            self.submit_line(&text);
            self.transport.idle();
        }
        tracing::info!("monitor terminated");
    }

    /// Interpret one complete line
    pub fn submit_line(&mut self, text: &str) -> Control {
        self.line.fill(text);
        self.state = State::Dispatching;
        let control = self.dispatch();
        self.state = match control {
            Control::Continue => State::AwaitingLine,
            Control::Quit => State::Terminated,
        };
        control
    }

    /// Collect bytes from the transport until a line is complete
    ///
    /// Returns `None` once the input has ended and nothing is left over.
    fn await_line(&mut self) -> Option<String> {
        loop {
            match self.transport.read_byte() {
                Some(byte) => {
                    if let Some(line) = self.editor.feed(byte, &mut self.transport) {
                        return Some(line);
                    }
                }
                None if self.transport.is_closed() => {
                    // A last line without a terminator still counts
                    return if self.editor.is_empty() {
                        None
                    } else {
                        Some(self.editor.take())
                    };
                }
                None => self.transport.idle(),
            }
        }
    }

    /// Execute the words of the current line
    fn dispatch(&mut self) -> Control {
        let Monitor {
            stack,
            dictionary,
            line,
            memory,
            transport,
            last_address,
            ..
        } = self;

        while let Some(word) = line.next_word() {
            if let Some(handler) = dictionary.lookup(word) {
                tracing::debug!(word, "execute");
                let mut ctx = Context {
                    stack: &mut *stack,
                    memory: memory.as_mut(),
                    out: &mut *transport,
                    dictionary: &*dictionary,
                    last_address: &mut *last_address,
                };
                match handler(&mut ctx) {
                    Ok(Control::Continue) => {}
                    Ok(Control::Quit) => return Control::Quit,
                    Err(e) => ctx.report(&e),
                }
                continue;
            }

            let (value, pure) = number::parse(word);
            if pure {
                tracing::debug!(word, value, "push literal");
                if let Err(e) = stack.push(value) {
                    report(&mut *transport, &e);
                }
                continue;
            }

            let error = MonitorError::UnknownCommand {
                word: word.to_string(),
            };
            report(&mut *transport, &error);
            break;
        }
        Control::Continue
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn stack(&self) -> &DataStack {
        &self.stack
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn memory(&self) -> &dyn Target {
        self.memory.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Input buffer size in bytes, terminator included
    pub fn line_capacity(&self) -> usize {
        self.line.capacity()
    }

    pub fn last_address(&self) -> Option<u32> {
        self.last_address
    }

    /// Consume the monitor, returning the transport
    pub fn into_transport(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTerminal;

    fn monitor() -> Monitor<MockTerminal> {
        Monitor::simulated(&MonitorConfig::default(), MockTerminal::new()).unwrap()
    }

    #[test]
    fn test_state_follows_line() {
        let mut m = monitor();
        assert_eq!(m.state(), State::AwaitingLine);
        assert_eq!(m.submit_line("1 2 +"), Control::Continue);
        assert_eq!(m.state(), State::AwaitingLine);
        assert_eq!(m.stack().as_slice(), &[3]);
        assert_eq!(m.submit_line("quit"), Control::Quit);
        assert_eq!(m.state(), State::Terminated);
    }

    #[test]
    fn test_quit_stops_rest_of_line() {
        let mut m = monitor();
        m.submit_line("quit 1 2");
        assert!(m.stack().is_empty());
        assert_eq!(m.transport().output(), "Quit program...\n");
    }

    #[test]
    fn test_run_reads_until_end_of_input() {
        let term = MockTerminal::with_input("1 2 + .\r");
        let mut m = Monitor::simulated(&MonitorConfig::default(), term).unwrap();
        m.run();
        assert_eq!(m.state(), State::Terminated);
        assert_eq!(m.transport().output(), "> 3\n> ^D\n");
    }

    #[test]
    fn test_run_accepts_unterminated_last_line() {
        let term = MockTerminal::with_input("7 .");
        let mut m = Monitor::simulated(&MonitorConfig::default(), term).unwrap();
        m.run();
        assert_eq!(m.transport().output(), "> 7\n> ^D\n");
    }

    #[test]
    fn test_banner_names_target() {
        let mut m = monitor();
        m.banner();
        let out = m.transport().get_output();
        assert!(out[0].starts_with("Command Line Monitor v"));
        assert_eq!(out[1], "Target: simulated");
    }
}
