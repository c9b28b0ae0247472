//! Permissive numeric coercion for raw form values.
//!
//! Form fields arrive as text. The numeric ones are coerced the way a browser
//! form coerces them: the longest numeric prefix wins, and input with no
//! numeric prefix becomes the `Invalid` sentinel instead of an error. The
//! submission is sent either way.

use serde::{Serialize, Serializer};

/// A parsed number, or the sentinel for input that did not parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    Number(T),
    Invalid,
}

impl<T> Coerced<T> {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Coerced::Invalid)
    }
}

// JSON has no NaN or Infinity, so the sentinel and non-finite values go out as null.
impl Serialize for Coerced<i64> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Coerced::Number(v) => serializer.serialize_i64(*v),
            Coerced::Invalid => serializer.serialize_none(),
        }
    }
}

impl Serialize for Coerced<f64> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Coerced::Number(v) if v.is_finite() => serializer.serialize_f64(*v),
            _ => serializer.serialize_none(),
        }
    }
}

/// Integer coercion: optional sign, then the leading run of digits.
/// A `0x` prefix switches to hexadecimal. Anything after the digits is ignored.
pub fn parse_int(raw: &str) -> Coerced<i64> {
    let s = raw.trim_start();
    let (negative, s) = split_sign(s);

    let (radix, s) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = s
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(s.len());
    if end == 0 {
        return Coerced::Invalid;
    }

    let digits = &s[..end];
    let parsed = if negative {
        i64::from_str_radix(&format!("-{digits}"), radix)
    } else {
        i64::from_str_radix(digits, radix)
    };

    match parsed {
        Ok(v) => Coerced::Number(v),
        Err(_) => Coerced::Invalid,
    }
}

/// Float coercion: the longest prefix that reads as a decimal literal
/// (`1`, `1.5`, `.5`, `1e3`), or a signed `Infinity`.
pub fn parse_float(raw: &str) -> Coerced<f64> {
    let s = raw.trim_start();
    let (negative, unsigned) = split_sign(s);

    if unsigned.starts_with("Infinity") {
        return Coerced::Number(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let bytes = unsigned.as_bytes();
    let mut end = 0;

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return Coerced::Invalid;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let sign_len = s.len() - unsigned.len();
    match s[..sign_len + end].parse::<f64>() {
        Ok(v) => Coerced::Number(v),
        Err(_) => Coerced::Invalid,
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
