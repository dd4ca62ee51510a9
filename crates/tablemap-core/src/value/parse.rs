//! Integer parsing rules shared by field accessors and bind-time coercion.

/// Parse a base-prefixed integer literal.
///
/// Accepts an optional sign followed by `0x`/`0X` (hex), `0o`/`0O` (octal),
/// `0b`/`0B` (binary), a bare leading `0` (octal), or plain decimal digits.
/// Underscores may separate digits or follow a base prefix.
#[must_use]
pub fn parse_prefixed_int(s: &str) -> Option<i64> {
    let (negative, body) = split_sign(s);
    if body.is_empty() {
        return None;
    }

    let (radix, digits) = split_radix(body);
    if digits.contains('_') && !underscores_ok(body) {
        return None;
    }

    let mut magnitude: u64 = 0;
    for c in digits.chars().filter(|c| *c != '_') {
        let digit = c.to_digit(radix)?;
        magnitude = magnitude
            .checked_mul(u64::from(radix))?
            .checked_add(u64::from(digit))?;
    }

    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Parse a plain decimal integer with an optional sign.
///
/// This is the rule applied when a raw column value is bound onto an
/// integer field: no base prefixes, no separators, no whitespace.
#[must_use]
pub fn parse_decimal_int(s: &str) -> Option<i64> {
    s.parse().ok()
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

fn split_radix(body: &str) -> (u32, &str) {
    let bytes = body.as_bytes();
    if bytes[0] != b'0' {
        return (10, body);
    }

    match bytes.get(1).map(u8::to_ascii_lowercase) {
        Some(b'b') if bytes.len() >= 3 => (2, &body[2..]),
        Some(b'o') if bytes.len() >= 3 => (8, &body[2..]),
        Some(b'x') if bytes.len() >= 3 => (16, &body[2..]),
        _ => (8, &body[1..]),
    }
}

// An underscore must sit between two digits, or directly after a base prefix.
fn underscores_ok(body: &str) -> bool {
    #[derive(Clone, Copy, Eq, PartialEq)]
    enum Seen {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let bytes = body.as_bytes();
    let mut seen = Seen::Start;
    let mut i = 0;
    let mut hex = false;

    if bytes.len() >= 2
        && bytes[0] == b'0'
        && matches!(bytes[1].to_ascii_lowercase(), b'b' | b'o' | b'x')
    {
        i = 2;
        seen = Seen::Digit;
        hex = bytes[1].to_ascii_lowercase() == b'x';
    }

    for &b in &bytes[i..] {
        if b.is_ascii_digit() || (hex && b.is_ascii_hexdigit()) {
            seen = Seen::Digit;
        } else if b == b'_' {
            if seen != Seen::Digit {
                return false;
            }
            seen = Seen::Underscore;
        } else {
            if seen == Seen::Underscore {
                return false;
            }
            seen = Seen::Other;
        }
    }

    seen != Seen::Underscore
}
