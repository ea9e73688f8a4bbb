// stylegate-core/src/diagnostics.rs
//! Helpers for logging attacker-controlled style values.
//!
//! Declaration values come straight from untrusted markup. They are only written
//! to logs verbatim when `STYLEGATE_LOG_VALUES=true` is set in the environment;
//! otherwise a size placeholder is logged instead.

use once_cell::sync::Lazy;

/// Read once per process.
static VALUE_LOGGING_ALLOWED: Lazy<bool> = Lazy::new(|| {
    std::env::var("STYLEGATE_LOG_VALUES")
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

/// Replaces a value with a placeholder that only reveals its length.
pub fn redact_value(value: &str) -> String {
    const MAX_LEN: usize = 8;
    if value.len() <= MAX_LEN {
        "[VALUE]".to_string()
    } else {
        format!("[VALUE: {} chars]", value.len())
    }
}

pub(crate) fn loggable_value(value: &str) -> String {
    if *VALUE_LOGGING_ALLOWED {
        value.escape_debug().to_string()
    } else {
        redact_value(value)
    }
}
