//! Lenient integer tokenizer.
//!
//! Contract:
//! - A token containing `.`, `e` or `E` is parsed as `f64` first; a finite
//!   value inside the `i64` range is truncated toward zero (`"3.0e2"` → 300,
//!   `"-2.9"` → -2).
//! - Every other token (and any float-looking token the float path rejects)
//!   must be a plain decimal integer with an optional sign.
//! - Tokens are separated by ASCII/Unicode whitespace; empty tokens never occur.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::errors::FormatError;

/// Lower bound of `i64` as an exactly representable `f64` (-2^63).
const I64_MIN_F: f64 = -9_223_372_036_854_775_808.0;
/// First `f64` above `i64::MAX` (2^63).
const I64_END_F: f64 = 9_223_372_036_854_775_808.0;

#[inline]
fn looks_like_float(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
}

/// Parse one token into an integer (see module contract).
pub fn to_int(token: &str) -> Result<i64, FormatError> {
    let s = token.trim();
    if looks_like_float(s) {
        if let Ok(v) = s.parse::<f64>() {
            if v.is_finite() && (I64_MIN_F..I64_END_F).contains(&v) {
                // `as` truncates toward zero.
                return Ok(v as i64);
            }
        }
    }
    s.parse::<i64>().map_err(|_| FormatError::BadToken(s.to_string()))
}

/// Tokenize a whole line; fails on the first token that does not parse.
pub fn split_ints(line: &str) -> Result<Vec<i64>, FormatError> {
    line.split_whitespace().map(to_int).collect()
}

/// Parse a declared count (`n`, `k`); negative counts are rejected.
pub fn to_count(token: &str) -> Result<usize, FormatError> {
    let v = to_int(token)?;
    usize::try_from(v).map_err(|_| FormatError::NegativeCount(v))
}
