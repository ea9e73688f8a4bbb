// stylegate-core/src/lib.rs
//! # StyleGate Core Library
//!
//! `stylegate-core` filters the inline `style` attribute of HTML elements against an
//! allowlist policy. It is meant to be embedded in an HTML sanitizer: the host walks
//! the element tree and, for every element with a `style` attribute, asks the policy
//! which declarations may stay.
//!
//! The library is pure and does no I/O outside of [`PolicyConfig::load_from_file`].
//! Sanitizing never fails from the caller's point of view; anything that cannot be
//! parsed, decoded or matched is left out of the output.
//!
//! ## Modules
//!
//! * `policy`: The [`Policy`] type, scope resolution and sanitization.
//! * `builder`: The fluent [`PolicyBuilder`] used to add rules to a policy.
//! * `rule`: The [`StyleRule`] acceptance strategies.
//! * `handlers`: Built-in value validators for known CSS properties.
//! * `parser`: Splits a style string into [`Declaration`]s.
//! * `escapes`: Decodes CSS unicode escapes before values are matched.
//! * `config`: Declarative, YAML-loadable policies.
//! * `engine`: The [`StyleSanitizer`] trait for hosts.
//! * `diagnostics`: Redaction of untrusted values in log output.
//! * `errors`: Error types.
//!
//! ## Usage Example
//!
//! ```rust
//! use regex::Regex;
//! use stylegate_core::Policy;
//!
//! let mut policy = Policy::new();
//! policy
//!     .allow_styles(["text-decoration"])
//!     .matching_enum(["underline", "line-through", "none"])
//!     .on_elements(["span"])
//!     .allow_styles(["color"])
//!     .matching(Regex::new(r"(?i)^#([0-9a-f]{3,4}|[0-9a-f]{6}|[0-9a-f]{8})$").unwrap())
//!     .globally();
//!
//! let clean = policy.sanitize(
//!     "span",
//!     "text-decoration: underline; background-image: url(javascript:alert('XSS')); \
//!      color: #f00ba; background-origin: invalidValue",
//! );
//! assert_eq!(clean, "text-decoration: underline");
//! ```
//!
//! ## Error Handling
//!
//! Building a policy from configuration returns [`StyleGateError`]; file loading uses
//! `anyhow::Error` with context. [`Policy::try_sanitize`] reports parse failures as
//! [`StyleParseError`] for hosts that want to log them, while [`Policy::sanitize`]
//! turns them into an empty result.
//!
//! ## Logging
//!
//! The crate logs through the `log` facade. Declaration values are untrusted and are
//! only logged verbatim when `STYLEGATE_LOG_VALUES=true` is set.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod errors;
pub mod escapes;
pub mod handlers;
pub mod parser;
pub mod policy;
pub mod rule;

/// Re-exports the policy and its builder.
pub use builder::PolicyBuilder;
pub use policy::{Policy, VENDOR_PREFIXES};

/// Re-exports the rule strategies.
pub use rule::{StyleHandler, StyleRule};

/// Re-exports the built-in property validators.
pub use handlers::{default_handler, has_default_handler, is_color, is_css_wide_keyword, is_length, is_url};

/// Re-exports the parsing and decoding stages.
pub use escapes::normalize_escapes;
pub use parser::{parse_declarations, Declaration};

/// Re-exports the declarative configuration types.
pub use config::{PolicyConfig, StyleRuleConfig, MAX_PATTERN_LENGTH};

/// Re-exports the host-facing trait.
pub use engine::StyleSanitizer;

pub use diagnostics::redact_value;

/// Re-exports the custom error types for clear error reporting.
pub use errors::{EscapeDecodeError, StyleGateError, StyleParseError};
