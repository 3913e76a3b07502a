// clmon: interactive command line monitor

use std::fs::{self, File};
use std::io::{self, IsTerminal};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use clmon::config::CliArgs;
use clmon::interpreter::engine::Monitor;
use clmon::memory::SimulatedMemory;
use clmon::transport::{ConsoleTransport, MockTerminal, StdioTransport, Transport};
use clmon::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    init_logging(&args)?;

    let config = args.monitor_config();
    let mut memory = SimulatedMemory::new(config.memory_size);
    if let Some(path) = &args.image {
        let image = fs::read(path)?;
        memory.load(0, &image)?;
    }
    let memory = Box::new(memory);

    if args.tui {
        let mut monitor = Monitor::new(&config, memory, MockTerminal::new())?;
        if !args.no_banner {
            monitor.banner();
        }
        return run_tui(App::new(monitor));
    }

    if io::stdin().is_terminal() {
        let console = ConsoleTransport::open()?;
        run_monitor(Monitor::new(&config, memory, console)?, args.no_banner);
    } else {
        let stdio = StdioTransport::new(io::stdin().lock(), io::stdout());
        run_monitor(Monitor::new(&config, memory, stdio)?, args.no_banner);
    }
    Ok(())
}

fn run_monitor<T: Transport>(mut monitor: Monitor<T>, no_banner: bool) {
    if !no_banner {
        monitor.banner();
    }
    monitor.run();
}

fn run_tui(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }
    Ok(())
}

/// Console mode logs to stderr; the TUI owns the screen, so it only logs
/// when a file is given.
fn init_logging(args: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    match (&args.log_file, args.tui) {
        (Some(path), _) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, false) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        (None, true) => {}
    }
    Ok(())
}
