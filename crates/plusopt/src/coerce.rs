//! Literal coercion used by the `=value` and attached-value forms.

use crate::error::{ParseError, ParseResult};

/// Convert `t`, `f`, `true` or `false` (ASCII case-insensitive) to a bool.
pub fn coerce_bool(literal: &str) -> ParseResult<bool> {
    const TRUE: [&str; 2] = ["t", "true"];
    const FALSE: [&str; 2] = ["f", "false"];

    if TRUE.iter().any(|t| literal.eq_ignore_ascii_case(t)) {
        return Ok(true);
    }
    if FALSE.iter().any(|f| literal.eq_ignore_ascii_case(f)) {
        return Ok(false);
    }
    Err(ParseError::BooleanParseError(literal.to_string()))
}

/// Convert an integer literal, detecting the base from its prefix.
///
/// Accepted forms: optional `+`/`-`, then `0x` (hex), `0o` (octal), `0b`
/// (binary), a bare leading `0` (octal) or plain decimal. Single
/// underscores may separate digits. The value must fit a 32-bit signed
/// integer. `option` is the long name reported on failure.
pub fn coerce_int(literal: &str, option: &str) -> ParseResult<i64> {
    parse_int_auto(literal).ok_or_else(|| ParseError::NumberParseError {
        literal: literal.to_string(),
        option: option.to_string(),
    })
}

fn parse_int_auto(s: &str) -> Option<i64> {
    let (negative, body) = match s.as_bytes().first()? {
        b'+' => (false, &s[1..]),
        b'-' => (true, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits, prefixed) = split_radix(body);
    let digits = strip_underscores(digits, prefixed)?;
    // from_str_radix would otherwise accept a second sign.
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }

    let magnitude = i64::from(u32::from_str_radix(&digits, radix).ok()?);
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok().map(i64::from)
}

fn split_radix(body: &str) -> (u32, &str, bool) {
    let bytes = body.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return (16, &body[2..], true),
            b'o' | b'O' => return (8, &body[2..], true),
            b'b' | b'B' => return (2, &body[2..], true),
            _ => return (8, &body[1..], true),
        }
    }
    (10, body, false)
}

fn strip_underscores(digits: &str, after_prefix: bool) -> Option<String> {
    let mut out = String::with_capacity(digits.len());
    // An underscore is fine right after a base prefix or after a digit.
    let mut underscore_ok = after_prefix;
    for c in digits.chars() {
        if c == '_' {
            if !underscore_ok {
                return None;
            }
            underscore_ok = false;
        } else {
            out.push(c);
            underscore_ok = true;
        }
    }
    if digits.ends_with('_') {
        return None;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_literals_ignore_case() {
        for lit in ["t", "T", "true", "True", "TRUE"] {
            assert!(coerce_bool(lit).unwrap(), "{lit}");
        }
        for lit in ["f", "F", "false", "False", "fAlSe"] {
            assert!(!coerce_bool(lit).unwrap(), "{lit}");
        }
    }

    #[test]
    fn bool_rejects_anything_else() {
        for lit in ["Fase", "", "yes", "1", "0", "tru"] {
            match coerce_bool(lit) {
                Err(ParseError::BooleanParseError(got)) => assert_eq!(got, lit),
                other => panic!("expected BooleanParseError for {lit:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn int_detects_base() {
        assert_eq!(coerce_int("3", "v").unwrap(), 3);
        assert_eq!(coerce_int("0", "v").unwrap(), 0);
        assert_eq!(coerce_int("0x1F", "v").unwrap(), 31);
        assert_eq!(coerce_int("0X1f", "v").unwrap(), 31);
        assert_eq!(coerce_int("0o17", "v").unwrap(), 15);
        assert_eq!(coerce_int("017", "v").unwrap(), 15);
        assert_eq!(coerce_int("0b101", "v").unwrap(), 5);
        assert_eq!(coerce_int("-0x10", "v").unwrap(), -16);
        assert_eq!(coerce_int("+42", "v").unwrap(), 42);
        assert_eq!(coerce_int("1_000", "v").unwrap(), 1000);
        assert_eq!(coerce_int("0x_ff", "v").unwrap(), 255);
    }

    #[test]
    fn int_is_limited_to_32_bits() {
        assert_eq!(coerce_int("2147483647", "v").unwrap(), i64::from(i32::MAX));
        assert_eq!(coerce_int("-2147483648", "v").unwrap(), i64::from(i32::MIN));
        assert_eq!(coerce_int("-0x80000000", "v").unwrap(), i64::from(i32::MIN));
        for lit in ["2147483648", "-2147483649", "0x80000000", "4294967296"] {
            match coerce_int(lit, "verbose") {
                Err(ParseError::NumberParseError { literal, option }) => {
                    assert_eq!(literal, lit);
                    assert_eq!(option, "verbose");
                }
                other => panic!("expected NumberParseError for {lit:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn int_failure_names_literal_and_option() {
        for lit in ["", "-", "abc", "08", "0x", "1__0", "_1", "1_", "--1", "+-1", "1.5"] {
            match coerce_int(lit, "verbose") {
                Err(ParseError::NumberParseError { literal, option }) => {
                    assert_eq!(literal, lit);
                    assert_eq!(option, "verbose");
                }
                other => panic!("expected NumberParseError for {lit:?}, got {other:?}"),
            }
        }
    }
}
