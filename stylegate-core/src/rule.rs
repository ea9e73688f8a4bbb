// stylegate-core/src/rule.rs
//! The validation unit attached to a property within a scope.
//!
//! License: MIT OR Apache-2.0

use std::fmt;
use std::sync::Arc;

use regex::Regex;

/// A predicate over a normalized (lowercased, escape-decoded) value.
pub type StyleHandler = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// One acceptance test for a property's value.
///
/// Exactly one strategy is held per rule. Rules are immutable once committed
/// into a [`Policy`](crate::Policy).
#[derive(Clone)]
pub enum StyleRule {
    /// Accept when the predicate returns `true`.
    Handler(StyleHandler),
    /// Accept when the value equals one of these, ignoring case.
    OneOf(Vec<String>),
    /// Accept when the pattern matches the value.
    Pattern(Regex),
}

impl StyleRule {
    /// Evaluates the rule against a normalized value.
    pub fn accepts(&self, normalized_value: &str) -> bool {
        match self {
            StyleRule::Handler(handler) => handler(normalized_value),
            StyleRule::OneOf(values) => values
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(normalized_value)),
            StyleRule::Pattern(regex) => regex.is_match(normalized_value),
        }
    }
}

impl fmt::Debug for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleRule::Handler(_) => f.write_str("Handler(..)"),
            StyleRule::OneOf(values) => f.debug_tuple("OneOf").field(values).finish(),
            StyleRule::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
        }
    }
}
