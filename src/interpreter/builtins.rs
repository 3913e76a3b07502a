//! Built-in command implementations
//!
//! Every command is a plain function taking the execution [`Context`]. They
//! take operands from the data stack, print through the transport and never
//! change the interpreter's state except for `quit`.
//!
//! # Supported Commands
//!
//! - Arithmetic: `+ - * / mod` (wrapping 32-bit)
//! - Output: `. .h .s .hs emit`
//! - Memory: `peek poke dmem` and their `16`/`32` variants
//! - Board: `blink`
//! - Introspection: `words help`, and `quit` on hosts that can exit
//!
//! # Implementation Notes
//!
//! - A missing operand is reported and read as 0 (see [`Context::pop`]), so a
//!   command always runs to completion
//! - Addresses are printed as 8 hex digits of the logical address
//! - `dmem*` align the start address down to a 16-byte boundary

use crate::interpreter::constants::{CHAR_SP, CHAR_TILDE, DUMP_LINE_BYTES, NUMBER_HELP};
use crate::interpreter::context::{Context, Control};
use crate::interpreter::dictionary::{Dictionary, Handler};
use crate::interpreter::errors::MonitorError;
use crate::memory::Width;

type CommandResult = Result<Control, MonitorError>;

/// Name, handler and help text of every built-in, in registration order
const BUILTINS: [(&str, Handler, &str); 22] = [
    ("+", add, "add ( a b -- a+b )"),
    ("-", sub, "subtract ( a b -- a-b )"),
    ("*", mul, "multiply ( a b -- a*b )"),
    ("/", div, "divide ( a b -- a/b )"),
    (".", dot, "print decimal top of stack ( a -- )"),
    (".h", dot_h, "print hex top of stack ( a -- )"),
    (".s", dot_s, "print decimal stack"),
    (".hs", dot_hs, "print hex stack"),
    ("blink", blink, "blink led ( count -- )"),
    ("dmem", dmem, "display byte memory ( address lines -- )"),
    ("dmem16", dmem16, "display short memory ( address lines -- )"),
    ("dmem32", dmem32, "display word memory ( address lines -- )"),
    ("emit", emit, "print as character top of stack ( a -- )"),
    ("help", help, "display help text"),
    ("mod", modulo, "modulo divide ( a b -- a mod b )"),
    ("peek", peek, "display byte at address ( address -- )"),
    ("peek16", peek16, "display short at address ( address -- )"),
    ("peek32", peek32, "display word at address ( address -- )"),
    ("poke", poke, "store byte at address ( address byte -- )"),
    ("poke16", poke16, "store short at address ( address short -- )"),
    ("poke32", poke32, "store word at address ( address word -- )"),
    ("words", words, "display list of command words"),
];

/// Populate `dictionary` with the built-in commands
///
/// `quit` is only registered when the host can actually exit.
pub fn register_builtins(dictionary: &mut Dictionary, allow_quit: bool) -> Result<(), MonitorError> {
    for (name, handler, help) in BUILTINS {
        dictionary.register(name, handler, help)?;
    }
    if allow_quit {
        dictionary.register("quit", quit, "quit the test program")?;
    }
    tracing::debug!(entries = dictionary.len(), "built-in commands registered");
    Ok(())
}

// ----------------------------------------------------------------------------
// Arithmetic
// ----------------------------------------------------------------------------

fn add(ctx: &mut Context<'_>) -> CommandResult {
    let b = ctx.pop();
    let a = ctx.pop();
    ctx.push(a.wrapping_add(b));
    Ok(Control::Continue)
}

fn sub(ctx: &mut Context<'_>) -> CommandResult {
    let b = ctx.pop();
    let a = ctx.pop();
    ctx.push(a.wrapping_sub(b));
    Ok(Control::Continue)
}

fn mul(ctx: &mut Context<'_>) -> CommandResult {
    let b = ctx.pop();
    let a = ctx.pop();
    ctx.push(a.wrapping_mul(b));
    Ok(Control::Continue)
}

fn div(ctx: &mut Context<'_>) -> CommandResult {
    let b = ctx.pop();
    let a = ctx.pop();
    if b == 0 {
        return Err(MonitorError::DivideByZero {
            operation: "Divide by 0",
        });
    }
    ctx.push(a.wrapping_div(b));
    Ok(Control::Continue)
}

fn modulo(ctx: &mut Context<'_>) -> CommandResult {
    let b = ctx.pop();
    let a = ctx.pop();
    if b == 0 {
        return Err(MonitorError::DivideByZero {
            operation: "Modulo Divide by 0",
        });
    }
    ctx.push(a.wrapping_rem(b));
    Ok(Control::Continue)
}

// ----------------------------------------------------------------------------
// Output
// ----------------------------------------------------------------------------

fn dot(ctx: &mut Context<'_>) -> CommandResult {
    let v = ctx.pop();
    ctx.out.write_line(&v.to_string());
    Ok(Control::Continue)
}

fn dot_h(ctx: &mut Context<'_>) -> CommandResult {
    let v = ctx.pop();
    ctx.out.write_line(&format!("{:08x}", v as u32));
    Ok(Control::Continue)
}

fn dot_s(ctx: &mut Context<'_>) -> CommandResult {
    print_stack(ctx, |v| format!("{} ", v));
    Ok(Control::Continue)
}

fn dot_hs(ctx: &mut Context<'_>) -> CommandResult {
    print_stack(ctx, |v| format!("{:08x} ", v as u32));
    Ok(Control::Continue)
}

/// Print the whole stack bottom to top; an empty stack prints nothing at all
fn print_stack(ctx: &mut Context<'_>, fmt: impl Fn(i32) -> String) {
    if ctx.stack.is_empty() {
        return;
    }
    let text: String = ctx.stack.as_slice().iter().map(|&v| fmt(v)).collect();
    ctx.out.write_line(&text);
}

fn emit(ctx: &mut Context<'_>) -> CommandResult {
    let v = ctx.pop();
    ctx.out.write_char(v as u8);
    Ok(Control::Continue)
}

// ----------------------------------------------------------------------------
// Memory
// ----------------------------------------------------------------------------

fn peek(ctx: &mut Context<'_>) -> CommandResult {
    peek_width(ctx, Width::Byte)
}

fn peek16(ctx: &mut Context<'_>) -> CommandResult {
    peek_width(ctx, Width::Half)
}

fn peek32(ctx: &mut Context<'_>) -> CommandResult {
    peek_width(ctx, Width::Word)
}

fn peek_width(ctx: &mut Context<'_>, width: Width) -> CommandResult {
    let address = ctx.pop_address();
    *ctx.last_address = Some(address);
    let value = ctx.memory.read(address, 0, width)?;
    ctx.out
        .write_line(&format!("{:08x} {}", address, width.format_hex(value)));
    Ok(Control::Continue)
}

fn poke(ctx: &mut Context<'_>) -> CommandResult {
    poke_width(ctx, Width::Byte)
}

fn poke16(ctx: &mut Context<'_>) -> CommandResult {
    poke_width(ctx, Width::Half)
}

fn poke32(ctx: &mut Context<'_>) -> CommandResult {
    poke_width(ctx, Width::Word)
}

/// Store, then read back so the user sees what the location really holds
fn poke_width(ctx: &mut Context<'_>, width: Width) -> CommandResult {
    let value = ctx.pop() as u32;
    let address = ctx.pop_address();
    *ctx.last_address = Some(address);
    ctx.memory.write(address, value, width)?;
    let stored = ctx.memory.read(address, 0, width)?;
    ctx.out
        .write_line(&format!("{:08x} -> {}", address, width.format_hex(stored)));
    Ok(Control::Continue)
}

fn dmem(ctx: &mut Context<'_>) -> CommandResult {
    dump(ctx, Width::Byte)
}

fn dmem16(ctx: &mut Context<'_>) -> CommandResult {
    dump(ctx, Width::Half)
}

fn dmem32(ctx: &mut Context<'_>) -> CommandResult {
    dump(ctx, Width::Word)
}

fn dump(ctx: &mut Context<'_>, width: Width) -> CommandResult {
    let lines = ctx.pop();
    let mut address = align_to_line(ctx.pop_address());
    *ctx.last_address = Some(address);

    for _ in 0..lines.max(0) {
        let text = match width {
            Width::Byte => {
                let mut bytes = [0u8; DUMP_LINE_BYTES as usize];
                for (x, byte) in bytes.iter_mut().enumerate() {
                    *byte = ctx.memory.read(address, x as i32, Width::Byte)? as u8;
                }
                format_byte_line(address, &bytes)
            }
            _ => {
                let count = (DUMP_LINE_BYTES / width.bytes()) as i32;
                let mut text = format!("{:08x} ", address);
                for x in 0..count {
                    let value = ctx.memory.read(address, x, width)?;
                    text.push_str(&width.format_hex(value));
                    text.push(' ');
                }
                text
            }
        };
        ctx.out.write_line(&text);
        address = address.wrapping_add(DUMP_LINE_BYTES);
    }
    Ok(Control::Continue)
}

/// Round an address down to the start of its dump line
pub fn align_to_line(address: u32) -> u32 {
    address & !(DUMP_LINE_BYTES - 1)
}

/// Format one `dmem` line: address, two groups of eight hex bytes separated
/// by `|`, then the same bytes as text with non-printables shown as `.`
pub fn format_byte_line(address: u32, bytes: &[u8]) -> String {
    let half = bytes.len() / 2;
    let mut text = format!("{:08x} ", address);
    for (x, byte) in bytes.iter().enumerate() {
        if x == half {
            text.push_str("| ");
        }
        text.push_str(&format!("{:02x} ", byte));
    }
    text.push(' ');
    for (x, &byte) in bytes.iter().enumerate() {
        if x == half {
            text.push(' ');
        }
        text.push(printable(byte));
    }
    text
}

/// The byte as a character, or `.` when it would not print
pub fn printable(byte: u8) -> char {
    if (CHAR_SP..=CHAR_TILDE).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

// ----------------------------------------------------------------------------
// Board and introspection
// ----------------------------------------------------------------------------

fn blink(ctx: &mut Context<'_>) -> CommandResult {
    let count = ctx.pop();
    ctx.memory.blink(count)?;
    Ok(Control::Continue)
}

fn words(ctx: &mut Context<'_>) -> CommandResult {
    let text: String = ctx
        .dictionary
        .iter()
        .map(|entry| format!("{} ", entry.name))
        .collect();
    ctx.out.write_line(&text);
    Ok(Control::Continue)
}

fn help(ctx: &mut Context<'_>) -> CommandResult {
    for entry in ctx.dictionary.iter() {
        ctx.out
            .write_line(&format!("{:>8}  {}", entry.name, entry.help));
    }
    ctx.out.write_line("");
    for line in NUMBER_HELP {
        ctx.out.write_line(line);
    }
    Ok(Control::Continue)
}

fn quit(ctx: &mut Context<'_>) -> CommandResult {
    ctx.out.write_line("Quit program...");
    Ok(Control::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_byte_line() {
        let bytes: Vec<u8> = (0x41..0x51).collect();
        assert_eq!(
            format_byte_line(0x20, &bytes),
            "00000020 41 42 43 44 45 46 47 48 | 49 4a 4b 4c 4d 4e 4f 50  ABCDEFGH IJKLMNOP"
        );
    }

    #[test]
    fn test_non_printables_become_dots() {
        assert_eq!(printable(0x00), '.');
        assert_eq!(printable(0x1f), '.');
        assert_eq!(printable(b' '), ' ');
        assert_eq!(printable(b'~'), '~');
        assert_eq!(printable(0x7f), '.');
        assert_eq!(printable(0xff), '.');
    }

    #[test]
    fn test_align_to_line() {
        assert_eq!(align_to_line(0x1234_5678), 0x1234_5670);
        assert_eq!(align_to_line(0x10), 0x10);
        assert_eq!(align_to_line(0xffff_ffff), 0xffff_fff0);
    }

    #[test]
    fn test_builtins_fit_default_dictionary() {
        let mut dict = Dictionary::default();
        register_builtins(&mut dict, true).unwrap();
        assert_eq!(dict.len(), BUILTINS.len() + 1);
        assert!(dict.lookup("quit").is_some());

        let mut dict = Dictionary::default();
        register_builtins(&mut dict, false).unwrap();
        assert!(dict.lookup("quit").is_none());
    }
}
