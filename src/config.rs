//! Command-line configuration
//!
//! [`CliArgs`] is what the binary parses; [`MonitorConfig`] is the subset the
//! interpreter itself cares about and has sensible defaults for library use.

use crate::interpreter::constants::{
    DATA_STACK_SIZE, DICTIONARY_SIZE, INPUT_BUFFER_SIZE, SIMULATED_MEMORY_SIZE,
};
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Upper bound for the stack, dictionary and line flags
const MAX_TABLE_SIZE: u64 = 4096;

/// Largest simulated memory the CLI will allocate
const MAX_MEMORY_SIZE: usize = 64 * 1024 * 1024;

/// Sizes and switches for one monitor instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Maximum number of cells on the data stack
    pub stack_depth: usize,
    /// Maximum number of dictionary entries
    pub dictionary_size: usize,
    /// Input buffer size in bytes, terminator included
    pub line_length: usize,
    /// Size of the simulated memory region in bytes
    pub memory_size: usize,
    /// Register `quit` (only honoured when the target can exit)
    pub allow_quit: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            stack_depth: DATA_STACK_SIZE,
            dictionary_size: DICTIONARY_SIZE,
            line_length: INPUT_BUFFER_SIZE,
            memory_size: SIMULATED_MEMORY_SIZE,
            allow_quit: true,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "clmon", version)]
/// Interactive command line monitor
///
/// Reads space-separated words, one line at a time. Numbers are pushed on
/// the data stack; commands such as `peek`, `poke` and `dmem` operate on a
/// simulated memory region. Type `help` at the prompt for the command list.
///
/// To replay a session from a file, invoke with
///
///     $ clmon < session.txt
pub struct CliArgs {
    /// Maximum number of cells on the data stack
    #[arg(
        long,
        default_value_t = DATA_STACK_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_TABLE_SIZE)
    )]
    pub stack_depth: usize,

    /// Maximum number of dictionary entries
    #[arg(
        long,
        default_value_t = DICTIONARY_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_TABLE_SIZE)
    )]
    pub dictionary_size: usize,

    /// Input line buffer size in bytes
    #[arg(
        long,
        default_value_t = INPUT_BUFFER_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(2..=MAX_TABLE_SIZE)
    )]
    pub line_length: usize,

    /// Size of the simulated memory region.
    ///
    /// You may suffix the number with one of 'b', 'k' & 'M' to specify the
    /// size unit. Omitting the suffix means bytes. At most 64M.
    #[arg(long, default_value = "4k", value_parser = parse_memsize)]
    pub memory_size: usize,

    /// Binary file copied into simulated memory at address 0
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Start the terminal user interface
    #[arg(long)]
    pub tui: bool,

    /// Do not print the startup banner
    #[arg(long)]
    pub no_banner: bool,

    /// Log filter, e.g. `debug` or `clmon=trace` (overrides RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            stack_depth: self.stack_depth,
            dictionary_size: self.dictionary_size,
            line_length: self.line_length,
            memory_size: self.memory_size,
            allow_quit: true,
        }
    }
}

fn parse_memsize(val: &str) -> clap::error::Result<usize> {
    let last_char = val.chars().last().ok_or_else(|| {
        clap::error::Error::raw(clap::error::ErrorKind::ValueValidation, "empty value")
    })?;
    let (unit, digits) = match last_char {
        'b' => (1, &val[..val.len() - 1]),
        'k' => (1024, &val[..val.len() - 1]),
        'M' => (1024 * 1024, &val[..val.len() - 1]),
        _ => (1, val),
    };
    let num: usize = digits
        .parse()
        .map_err(|e| clap::error::Error::raw(clap::error::ErrorKind::ValueValidation, e))?;
    num.checked_mul(unit)
        .filter(|&size| size <= MAX_MEMORY_SIZE)
        .ok_or_else(|| {
            clap::error::Error::raw(clap::error::ErrorKind::ValueValidation, "size too large")
        })
}
