//! errors.rs - Custom error types for the stylegate-core library.
//!
//! This module defines structured error enums for the library. Only configuration
//! and compilation problems surface to callers as hard errors; everything that
//! happens while sanitizing a style string collapses to "not included in the
//! output".
//!
//! License: MIT OR Apache-2.0

use thiserror::Error;

/// The declaration parser rejected a style string.
///
/// Any parse failure fails the whole sanitization, never a single declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StyleParseError {
    #[error("Invalid declaration at line {line}, column {column}: '{snippet}'")]
    InvalidDeclaration {
        line: u32,
        column: u32,
        snippet: String,
    },
}

/// A CSS unicode escape inside a value could not be decoded.
///
/// Only the declaration carrying the value is dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EscapeDecodeError {
    #[error("Escape sequence '\\{0}' does not fit in four hex digits")]
    OutOfRange(String),

    #[error("Escape sequence decodes to U+{0:04X}, which is not a valid character")]
    InvalidCodePoint(u32),
}

/// Errors raised while building a policy from configuration.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StyleGateError {
    #[error("Failed to compile pattern for rule '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid policy configuration:\n{0}")]
    InvalidConfig(String),
}
