// Integration tests for the command line monitor

use clmon::config::MonitorConfig;
use clmon::interpreter::context::{Context, Control};
use clmon::interpreter::engine::{Monitor, State};
use clmon::interpreter::errors::MonitorError;
use clmon::memory::{SimulatedMemory, Target, Width};
use clmon::transport::MockTerminal;

fn monitor() -> Monitor<MockTerminal> {
    Monitor::simulated(&MonitorConfig::default(), MockTerminal::new()).expect("monitor")
}

/// Submit one line and return what it printed
fn line(monitor: &mut Monitor<MockTerminal>, text: &str) -> String {
    monitor.submit_line(text);
    monitor.transport_mut().take_output()
}

#[test]
fn test_stack_is_lifo() {
    let mut m = monitor();
    assert_eq!(line(&mut m, "1 2 3 . . ."), "3\n2\n1\n");
    assert!(m.stack().is_empty());
}

#[test]
fn test_stack_overflow_keeps_contents() {
    let mut m = monitor();
    let numbers: Vec<String> = (1..=17).map(|n| n.to_string()).collect();
    assert_eq!(line(&mut m, &numbers.join(" ")), "Error! Data Stack Overflow!\n");
    assert_eq!(m.stack().depth(), 16);
    assert_eq!(m.stack().peek(), Some(16));
}

#[test]
fn test_rejected_literal_on_full_stack() {
    let mut m = monitor();
    let numbers: Vec<String> = (1..=16).map(|n| n.to_string()).collect();
    assert_eq!(line(&mut m, &numbers.join(" ")), "");
    assert_eq!(line(&mut m, "12ab"), "12ab ???\n");
    assert_eq!(m.stack().depth(), 16);
    assert_eq!(m.stack().peek(), Some(16));
}

#[test]
fn test_print_stack() {
    let mut m = monitor();
    assert_eq!(line(&mut m, ".s .hs"), "");
    assert_eq!(line(&mut m, "1 -2 3 .s"), "1 -2 3 \n");
    assert_eq!(line(&mut m, ".hs"), "00000001 fffffffe 00000003 \n");
    // Printing leaves the stack alone
    assert_eq!(m.stack().as_slice(), &[1, -2, 3]);
}

#[test]
fn test_print_top() {
    let mut m = monitor();
    assert_eq!(line(&mut m, "255 .h -1 .h"), "000000ff\nffffffff\n");
    assert_eq!(line(&mut m, "'z ."), "122\n");
    assert_eq!(line(&mut m, "72 emit 105 emit"), "Hi");
}

#[test]
fn test_emit_sends_one_raw_byte() {
    let mut m = monitor();
    m.submit_line("233 emit 0x7f emit");
    assert_eq!(m.transport().output_bytes(), &[0xe9, 0x7f]);

    // Only the low byte of the value is sent
    m.transport_mut().clear();
    m.submit_line("0x141 emit");
    assert_eq!(m.transport().output_bytes(), b"A");
}

#[test]
fn test_unknown_word_discards_rest_of_line() {
    let mut m = monitor();
    assert_eq!(line(&mut m, "foo 1 2 +"), "foo ???\n");
    assert!(m.stack().is_empty());

    assert_eq!(line(&mut m, "1 12ab 2"), "12ab ???\n");
    assert_eq!(m.stack().as_slice(), &[1]);

    // The next line is interpreted normally
    assert_eq!(line(&mut m, "2 + ."), "3\n");
}

#[test]
fn test_poke_then_peek() {
    let mut m = monitor();
    assert_eq!(
        line(&mut m, "0x100 0x1ff poke 0x100 peek"),
        "00000100 -> ff\n00000100 ff\n"
    );
    assert_eq!(m.last_address(), Some(0x100));
    assert!(m.stack().is_empty());
}

#[test]
fn test_wide_accesses_are_little_endian() {
    let mut m = monitor();
    assert_eq!(
        line(&mut m, "0x200 0x12345678 poke32 0x200 peek16 0x202 peek16 0x203 peek"),
        "00000200 -> 12345678\n00000200 5678\n00000202 1234\n00000203 12\n"
    );
    assert_eq!(m.memory().read(0x200, 0, Width::Word), Ok(0x1234_5678));
    assert_eq!(
        line(&mut m, "0x300 -1 poke16 0x300 peek32"),
        "00000300 -> ffff\n00000300 0000ffff\n"
    );
}

#[test]
fn test_out_of_range_access_is_reported() {
    let mut m = monitor();
    assert_eq!(
        line(&mut m, "0x1000 peek"),
        "Error! Address 00001000 out of range for a 8-bit access\n"
    );
    assert_eq!(
        line(&mut m, "0xffe 7 poke32 1 ."),
        "Error! Address 00000ffe out of range for a 32-bit access\n1\n"
    );
}

#[test]
fn test_dmem_bytes() {
    let mut m = monitor();
    line(&mut m, "0x10 0x41 poke");
    let out = line(&mut m, "0x13 2 dmem");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "00000010 41 00 00 00 00 00 00 00 | 00 00 00 00 00 00 00 00  A....... ........",
            "00000020 00 00 00 00 00 00 00 00 | 00 00 00 00 00 00 00 00  ........ ........",
        ]
    );
    assert_eq!(m.last_address(), Some(0x10));
}

#[test]
fn test_dmem_wide() {
    let mut m = monitor();
    line(&mut m, "0x10 0x1234 poke16");
    assert_eq!(
        line(&mut m, "0x10 1 dmem16"),
        "00000010 1234 0000 0000 0000 0000 0000 0000 0000 \n"
    );
    assert_eq!(
        line(&mut m, "0x1f 1 dmem32"),
        "00000010 00001234 00000000 00000000 00000000 \n"
    );
}

#[test]
fn test_dmem_without_lines_prints_nothing() {
    let mut m = monitor();
    assert_eq!(line(&mut m, "0x10 0 dmem 0x10 -3 dmem"), "");
}

#[test]
fn test_dmem_stops_at_end_of_memory() {
    let mut m = monitor();
    assert_eq!(
        line(&mut m, "0xff0 2 dmem"),
        "00000ff0 00 00 00 00 00 00 00 00 | 00 00 00 00 00 00 00 00  ........ ........\n\
         Error! Address 00001000 out of range for a 8-bit access\n"
    );
}

#[test]
fn test_blink_on_host() {
    let mut m = monitor();
    assert_eq!(line(&mut m, "3 blink"), "Error! No blink in hosttest mode\n");
    assert!(m.stack().is_empty());
}

#[test]
fn test_words_lists_in_registration_order() {
    let mut m = monitor();
    assert_eq!(
        line(&mut m, "words"),
        "+ - * / . .h .s .hs blink dmem dmem16 dmem32 emit help mod \
         peek peek16 peek32 poke poke16 poke32 words quit \n"
    );
}

#[test]
fn test_help_text() {
    let mut m = monitor();
    let out = line(&mut m, "help");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 23 + 1 + 4);
    assert_eq!(lines[0], "       +  add ( a b -- a+b )");
    assert!(lines.contains(&"  peek16  display short at address ( address -- )"));
    assert_eq!(lines[23], "");
    assert_eq!(lines[24], "Decimal number: 1234, -56");
    assert_eq!(lines[27], "     Character: 'A");
}

fn answer(ctx: &mut Context<'_>) -> Result<Control, MonitorError> {
    ctx.push(42);
    Ok(Control::Continue)
}

#[test]
fn test_registered_command_shadows_builtin() {
    let mut m = monitor();
    m.register("+", answer, "the answer").expect("register");

    assert_eq!(line(&mut m, "1 2 +"), "");
    assert_eq!(m.stack().as_slice(), &[1, 2, 42]);

    // Both entries are still listed
    let words = line(&mut m, "words");
    assert!(words.starts_with("+ - "));
    assert!(words.ends_with("quit + \n"));
}

#[test]
fn test_dictionary_capacity() {
    let config = MonitorConfig {
        dictionary_size: 23,
        ..MonitorConfig::default()
    };
    let mut m = Monitor::simulated(&config, MockTerminal::new()).expect("monitor");
    assert_eq!(
        m.register("extra", answer, ""),
        Err(MonitorError::DictionaryFull { capacity: 23 })
    );

    let config = MonitorConfig {
        dictionary_size: 10,
        ..MonitorConfig::default()
    };
    assert!(Monitor::simulated(&config, MockTerminal::new()).is_err());
}

#[test]
fn test_oversized_config_does_not_preallocate() {
    let config = MonitorConfig {
        stack_depth: usize::MAX,
        dictionary_size: usize::MAX,
        line_length: usize::MAX,
        ..MonitorConfig::default()
    };
    let mut m = Monitor::simulated(&config, MockTerminal::new()).expect("monitor");
    assert_eq!(m.dictionary().capacity(), usize::MAX);
    assert_eq!(m.stack().capacity(), usize::MAX);
    assert_eq!(line(&mut m, "1 2 + ."), "3\n");
}

#[test]
fn test_quit() {
    let mut m = monitor();
    assert_eq!(m.submit_line("1 quit 2"), Control::Quit);
    assert_eq!(m.transport().output(), "Quit program...\n");
    assert_eq!(m.stack().as_slice(), &[1]);
    assert_eq!(m.state(), State::Terminated);
}

#[test]
fn test_quit_can_be_disabled() {
    let config = MonitorConfig {
        allow_quit: false,
        ..MonitorConfig::default()
    };
    let mut m = Monitor::simulated(&config, MockTerminal::new()).expect("monitor");
    assert_eq!(line(&mut m, "quit"), "quit ???\n");
    assert_eq!(m.state(), State::AwaitingLine);
}

#[test]
fn test_small_stack_and_line() {
    let config = MonitorConfig {
        stack_depth: 2,
        line_length: 8,
        ..MonitorConfig::default()
    };
    let mut m = Monitor::simulated(&config, MockTerminal::new()).expect("monitor");
    assert_eq!(line(&mut m, "1 2 3"), "Error! Data Stack Overflow!\n");
    assert_eq!(m.stack().as_slice(), &[1, 2]);

    line(&mut m, ". .");
    // Only the first seven bytes fit
    assert_eq!(line(&mut m, "1 234567"), "");
    assert_eq!(line(&mut m, ".s"), "1 23456 \n");
}

#[test]
fn test_run_with_crlf_input() {
    let term = MockTerminal::with_input("1 2 +\r\n.\r\n");
    let mut m = Monitor::simulated(&MonitorConfig::default(), term).expect("monitor");
    m.run();
    assert_eq!(m.transport().output(), "> > 3\n> ^D\n");
    assert_eq!(m.state(), State::Terminated);
}

#[test]
fn test_run_echoes_and_edits() {
    let term = MockTerminal::with_input("12\x7f3 .\r").with_echo(true);
    let mut m = Monitor::simulated(&MonitorConfig::default(), term).expect("monitor");
    m.run();
    assert_eq!(
        m.transport().output(),
        "> 12\x08 \x083 . \n13\n> ^D\n"
    );
}

#[test]
fn test_run_stops_at_quit() {
    let term = MockTerminal::with_input("1 .\rquit\r2 .\r");
    let mut m = Monitor::simulated(&MonitorConfig::default(), term).expect("monitor");
    m.run();
    assert_eq!(m.transport().output(), "> 1\n> Quit program...\n");
    assert_eq!(m.state(), State::Terminated);
}

#[test]
fn test_preloaded_image() {
    let mut memory = SimulatedMemory::new(64);
    memory.load(0x20, b"Hello").expect("load");
    let mut m =
        Monitor::new(&MonitorConfig::default(), Box::new(memory), MockTerminal::new())
            .expect("monitor");
    assert_eq!(
        line(&mut m, "0x20 1 dmem"),
        "00000020 48 65 6c 6c 6f 00 00 00 | 00 00 00 00 00 00 00 00  Hello... ........\n"
    );
}
