// stylegate-core/src/escapes.rs
//! Decoding of CSS unicode escapes inside declaration values.
//!
//! CSS lets any character be written as a backslash followed by one to six hex
//! digits and an optional trailing space. Values are decoded before any rule
//! sees them so that `\6a avascript:` is matched as `javascript:`. An escape that
//! decodes to whitespace is removed outright.
//!
//! License: MIT OR Apache-2.0

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::EscapeDecodeError;

static CSS_UNICODE_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[0-9a-fA-F]{1,6} ?").expect("escape pattern is a valid regex")
});

/// Number of hex digits an escape may occupy once leading zeros are dropped.
const MAX_ESCAPE_DIGITS: usize = 4;

/// Replaces every CSS unicode escape in `value` with the character it encodes.
///
/// Escapes are decoded leftmost-first and the search restarts after every
/// substitution, so a decoded backslash can start a new escape. Each pass
/// shortens the value, which bounds the loop.
///
/// Returns the input unchanged (borrowed) when it holds no escapes.
///
/// # Errors
///
/// Fails when an escape carries a significant digit beyond the fourth, or when
/// the code point is not a Unicode scalar value (a surrogate).
pub fn normalize_escapes(value: &str) -> Result<Cow<'_, str>, EscapeDecodeError> {
    if CSS_UNICODE_ESCAPE.find(value).is_none() {
        return Ok(Cow::Borrowed(value));
    }

    let mut decoded = value.to_owned();
    while let Some(found) = CSS_UNICODE_ESCAPE.find(&decoded) {
        let range = found.range();
        let digits = found.as_str()[1..].trim_end_matches(' ');
        let character = decode_escape(digits)?;

        let mut buf = [0u8; 4];
        let replacement = if character.is_whitespace() {
            ""
        } else {
            character.encode_utf8(&mut buf)
        };
        decoded.replace_range(range, replacement);
    }
    Ok(Cow::Owned(decoded))
}

/// Decodes the hex digits of one escape (without the backslash).
fn decode_escape(digits: &str) -> Result<char, EscapeDecodeError> {
    let significant = digits.trim_start_matches('0');
    if significant.len() > MAX_ESCAPE_DIGITS {
        return Err(EscapeDecodeError::OutOfRange(digits.to_string()));
    }
    // An all-zero escape leaves nothing after trimming.
    let code_point = if significant.is_empty() {
        0
    } else {
        u32::from_str_radix(significant, 16)
            .map_err(|_| EscapeDecodeError::OutOfRange(digits.to_string()))?
    };
    char::from_u32(code_point).ok_or(EscapeDecodeError::InvalidCodePoint(code_point))
}
