// Constants for the command line monitor

/// Default number of cells on the data stack
pub const DATA_STACK_SIZE: usize = 16;

/// Default number of dictionary slots
pub const DICTIONARY_SIZE: usize = 64;

/// Size of the terminal input buffer, terminator included
pub const INPUT_BUFFER_SIZE: usize = 128;

/// Size of the sandboxed memory region used by host builds
pub const SIMULATED_MEMORY_SIZE: usize = 4096;

/// Prompt written before every input line
pub const PROMPT: &str = "> ";

/// Prefix for stack and arithmetic diagnostics
pub const ERROR_PREFIX: &str = "Error! ";

/// Suffix appended to a word that is neither a command nor a number
pub const UNKNOWN_SUFFIX: &str = " ???";

// Character codes understood by the line editor and tokenizer
pub const CHAR_BKSP: u8 = 0x7f;
pub const CHAR_BS: u8 = 0x08;
pub const CHAR_CR: u8 = 0x0d;
pub const CHAR_NL: u8 = 0x0a;
pub const CHAR_QUOTE: u8 = 0x27;
pub const CHAR_SP: u8 = 0x20;
pub const CHAR_TILDE: u8 = 0x7e;

/// Dumps always start on a 16-byte boundary and print 16 bytes per line
pub const DUMP_LINE_BYTES: u32 = 16;

/// Help text for the number grammar, appended to `help`
pub const NUMBER_HELP: [&str; 4] = [
    "Decimal number: 1234, -56",
    "    Hex number: 0x1234abcd",
    "  Octal number: 0377",
    "     Character: 'A",
];
