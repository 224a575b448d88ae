//! Lenient numeric parsing for command arguments.
//!
//! Both parsers read the longest numeric prefix and ignore whatever follows.
//! Text with no digits parses as 0 instead of being rejected, which is how
//! operators have always been able to type `set x` and get bit 0.

/// C `isspace` set
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Strip leading whitespace and an optional sign.
fn split_sign(bytes: &[u8]) -> (bool, &[u8]) {
    let start = bytes.iter().position(|&b| !is_space(b)).unwrap_or(bytes.len());
    match &bytes[start..] {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        rest => (false, rest),
    }
}

/// Parse a signed decimal integer.
///
/// Out-of-range values saturate at `i32::MIN`/`i32::MAX`.
pub fn parse_decimal(text: &[u8]) -> i32 {
    let (negative, digits) = split_sign(text);

    let mut value: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        value = (value * 10 + (b - b'0') as i64).min(i32::MAX as i64 + 1);
    }

    let value = if negative { -value } else { value };
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Parse an unsigned integer with the radix picked from its prefix.
///
/// `0x`/`0X` selects hex, a leading `0` octal, anything else decimal. A
/// minus sign negates modulo 2^32; overflow saturates at `u32::MAX`.
pub fn parse_unsigned(text: &[u8]) -> u32 {
    let (negative, rest) = split_sign(text);

    let (radix, digits) = match rest {
        [b'0', b'x' | b'X', tail @ ..] if tail.first().is_some_and(|b| b.is_ascii_hexdigit()) => {
            (16, tail)
        }
        [b'0', ..] => (8, rest),
        _ => (10, rest),
    };

    let mut value: u32 = 0;
    for &b in digits {
        let Some(digit) = (b as char).to_digit(radix) else {
            break;
        };
        match value.checked_mul(radix).and_then(|v| v.checked_add(digit)) {
            Some(next) => value = next,
            None => return u32::MAX,
        }
    }

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}
