//! Numeric literal parsing
//!
//! A word that is not in the dictionary is tried as a number:
//!
//! | form | example | value |
//! |---|---|---|
//! | character | `'A` | 65 |
//! | hex | `0x1A`, `-0X1a` | 26, -26 |
//! | octal | `032` | 26 |
//! | decimal | `10`, `+10`, `-56` | 10, 10, -56 |
//!
//! Integer forms follow C's `strtol` with base 0: the longest valid prefix is
//! converted, and the caller learns whether that prefix was the whole word.

use crate::interpreter::constants::CHAR_QUOTE;

/// Convert a word to a number.
///
/// Returns the converted value and whether the *entire* word was consumed.
/// A partial parse such as `12ab` yields `(12, false)`; a word with no digits
/// at all yields `(0, false)`.
///
/// Values saturate at the 64-bit range before being truncated to 32 bits, so
/// `0xffffffff` reads as `-1` and addresses above `0x7fffffff` round-trip.
pub fn parse(word: &str) -> (i32, bool) {
    let bytes = word.as_bytes();

    if bytes.len() == 2 && bytes[0] == CHAR_QUOTE {
        return (bytes[1] as i32, true);
    }

    let mut pos = 0;
    while bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
        pos += 1;
    }

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let has_hex_prefix = bytes.get(pos) == Some(&b'0')
        && matches!(bytes.get(pos + 1), Some(b'x') | Some(b'X'))
        && bytes.get(pos + 2).is_some_and(|b| b.is_ascii_hexdigit());

    let radix = if has_hex_prefix {
        pos += 2;
        16
    } else if bytes.get(pos) == Some(&b'0') {
        8
    } else {
        10
    };

    let digits_start = pos;
    let mut magnitude: u64 = 0;
    let mut overflowed = false;
    while let Some(digit) = bytes.get(pos).and_then(|&b| (b as char).to_digit(radix)) {
        match magnitude
            .checked_mul(radix as u64)
            .and_then(|m| m.checked_add(digit as u64))
        {
            Some(m) => magnitude = m,
            None => overflowed = true,
        }
        pos += 1;
    }

    if pos == digits_start {
        return (0, false);
    }

    let value: i64 = if negative {
        if overflowed || magnitude > i64::MAX as u64 + 1 {
            i64::MIN
        } else {
            (magnitude as i64).wrapping_neg()
        }
    } else if overflowed || magnitude > i64::MAX as u64 {
        i64::MAX
    } else {
        magnitude as i64
    };

    (value as i32, pos == bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0x1A", 26, true)]
    #[case("0X1a", 26, true)]
    #[case("032", 26, true)]
    #[case("10", 10, true)]
    #[case("'A", 65, true)]
    #[case("' ", 32, true)]
    #[case("0", 0, true)]
    #[case("-56", -56, true)]
    #[case("+7", 7, true)]
    #[case("-0x10", -16, true)]
    #[case("0xffffffff", -1, true)]
    #[case("0x80000000", i32::MIN, true)]
    #[case("12ab", 12, false)]
    #[case("08", 0, false)]
    #[case("0x", 0, false)]
    #[case("0xg", 0, false)]
    #[case("-", 0, false)]
    #[case("foo", 0, false)]
    #[case("'AB", 0, false)]
    #[case("'", 0, false)]
    fn test_parse(#[case] word: &str, #[case] value: i32, #[case] pure: bool) {
        assert_eq!(parse(word), (value, pure));
    }

    #[test]
    fn test_huge_values_saturate() {
        // i64::MAX truncated to 32 bits
        assert_eq!(parse("99999999999999999999999"), (-1, true));
        // i64::MIN truncated to 32 bits
        assert_eq!(parse("-99999999999999999999999"), (0, true));
    }
}
