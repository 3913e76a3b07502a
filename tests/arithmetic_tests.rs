use clmon::config::MonitorConfig;
use clmon::interpreter::engine::Monitor;
use clmon::transport::MockTerminal;
use rstest::rstest;

fn run(line: &str) -> Monitor<MockTerminal> {
    let mut monitor =
        Monitor::simulated(&MonitorConfig::default(), MockTerminal::new()).expect("monitor");
    monitor.submit_line(line);
    monitor
}

#[rstest]
#[case("2 3 +", 5)]
#[case("2 3 -", -1)]
#[case("6 7 *", 42)]
#[case("7 2 /", 3)]
#[case("-7 2 /", -3)]
#[case("7 3 mod", 1)]
#[case("-7 3 mod", -1)]
#[case("0x7fffffff 1 +", i32::MIN)]
#[case("-2147483648 -1 /", i32::MIN)]
#[case("-2147483648 -1 mod", 0)]
#[case("'A 1 +", 66)]
#[case("010 0x10 +", 24)]
#[case("0xffffffff 1 +", 0)]
fn test_binary_operators(#[case] line: &str, #[case] expected: i32) {
    let monitor = run(line);
    assert_eq!(monitor.stack().as_slice(), &[expected]);
    assert_eq!(monitor.transport().output(), "");
}

#[rstest]
#[case("5 0 /", "Error! Divide by 0\n")]
#[case("5 0 mod", "Error! Modulo Divide by 0\n")]
fn test_division_by_zero_pushes_nothing(#[case] line: &str, #[case] expected: &str) {
    let monitor = run(line);
    assert!(monitor.stack().is_empty());
    assert_eq!(monitor.transport().output(), expected);
}

#[test]
fn test_missing_operands_read_as_zero() {
    let monitor = run("+");
    assert_eq!(monitor.stack().as_slice(), &[0]);
    assert_eq!(
        monitor.transport().output(),
        "Error! Data Stack Underflow!\nError! Data Stack Underflow!\n"
    );

    let monitor = run("9 -");
    assert_eq!(monitor.stack().as_slice(), &[9]);
    assert_eq!(
        monitor.transport().output(),
        "Error! Data Stack Underflow!\n"
    );
}

#[test]
fn test_error_does_not_stop_the_line() {
    let monitor = run("5 0 / 7 8 +");
    assert_eq!(monitor.stack().as_slice(), &[15]);
    assert_eq!(monitor.transport().output(), "Error! Divide by 0\n");
}

#[test]
fn test_chained_expression() {
    // (3 + 4) * 5 - 6
    let monitor = run("3 4 + 5 * 6 - .");
    assert!(monitor.stack().is_empty());
    assert_eq!(monitor.transport().output(), "29\n");
}
