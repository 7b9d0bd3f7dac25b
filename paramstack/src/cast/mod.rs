//! Text-to-value casting for channels that deliver raw text.
//!
//! Booleans come from fixed word lists, integers are an optional `-`
//! followed by digits, and floats additionally allow one fractional part.
//! Surrounding whitespace is ignored everywhere except for strings, which are
//! never cast.

use std::sync::Arc;

use crate::error::ParamError;
use crate::value::{Channel, ParamType, ParamValue};
use crate::ParamResult;

/// Words accepted as `true`, compared case-insensitively after trimming.
pub const TRUTHY_WORDS: [&str; 10] = [
    "true", "yes", "on", "enable", "allow", "t", "y", "1", "ok", "okay",
];

/// Words accepted as `false`, compared case-insensitively after trimming.
pub const FALSEY_WORDS: [&str; 10] = [
    "false", "no", "off", "disabled", "disable", "deny", "f", "n", "0", "nope",
];

/// Parse a boolean word.
///
/// # Examples
///
/// ```
/// use paramstack::cast::parse_boolean;
/// assert_eq!(parse_boolean("  Okay "), Some(true));
/// assert_eq!(parse_boolean("NOPE"), Some(false));
/// assert_eq!(parse_boolean("maybe"), None);
/// ```
#[must_use]
pub fn parse_boolean(text: &str) -> Option<bool> {
    let word = text.trim().to_ascii_lowercase();
    if TRUTHY_WORDS.contains(&word.as_str()) {
        Some(true)
    } else if FALSEY_WORDS.contains(&word.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Parse an integer of the form `-?[0-9]+`.
///
/// Values outside the signed 64-bit range are rejected.
#[must_use]
pub fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if !is_digits(digits) {
        return None;
    }
    trimmed.parse().ok()
}

/// Parse a float of the form `-?[0-9]+(\.[0-9]+)?`.
///
/// A bare integer is accepted and widened.
#[must_use]
pub fn parse_float(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let valid = match unsigned.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => is_digits(unsigned),
    };
    if !valid {
        return None;
    }
    trimmed.parse().ok()
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

/// Cast `text` received through `channel` under `key` into `ty`.
///
/// # Errors
///
/// Returns [`ParamError::Cast`] naming the channel, key and untrimmed text
/// when the text does not match the grammar for `ty`.
pub fn cast_text(ty: ParamType, channel: Channel, key: &str, text: &str) -> ParamResult<ParamValue> {
    let cast = match ty {
        ParamType::String => Some(ParamValue::Text(text.to_owned())),
        ParamType::Boolean => parse_boolean(text).map(ParamValue::Bool),
        ParamType::Integer => parse_integer(text).map(ParamValue::Integer),
        ParamType::Float => parse_float(text).map(ParamValue::Float),
    };
    cast.ok_or_else(|| {
        Arc::new(ParamError::Cast {
            channel,
            key: key.to_owned(),
            expected: ty,
            text: text.to_owned(),
        })
    })
}
