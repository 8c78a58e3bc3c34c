// src/gps/format.rs
//! Fixed-precision decimal formatting without float-to-string conversion

/// Format `value` as `"<integer>.<precision digits>"`.
///
/// Digits are produced by repeatedly multiplying the fractional remainder by
/// ten and truncating, so the result never rounds: `3.14159` at precision 3
/// is `"3.141"`. Negative values truncate toward zero. Non-finite input is
/// treated as 0.
pub fn format_fixed(value: f64, precision: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let negative = value < 0.0;
    let magnitude = value.abs();

    let integer = magnitude.floor();
    let mut remainder = magnitude - integer;

    let mut out = String::with_capacity(precision + 24);
    if negative {
        out.push('-');
    }
    out.push_str(&(integer as u64).to_string());

    if precision == 0 {
        return out;
    }

    out.push('.');
    for _ in 0..precision {
        let scaled = remainder * 10.0;
        let digit = scaled.floor().clamp(0.0, 9.0);
        out.push(char::from(b'0' + digit as u8));
        remainder = scaled - digit;
    }

    out
}
