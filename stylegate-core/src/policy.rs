// stylegate-core/src/policy.rs
//! The allowlist policy: rule storage, scope resolution and sanitization.
//!
//! A [`Policy`] keeps three indices of [`StyleRule`]s:
//!
//! * rules for exact element names,
//! * rules for element names matching a pattern, in registration order,
//! * global rules that apply to every element.
//!
//! Rules for a property within a scope are OR-ed: a declaration passes when any of
//! them accepts its value. Exact element rules, when present, completely shadow
//! pattern rules for that element. Global rules are always consulted as well.
//!
//! # Build, then freeze
//!
//! Rules are only added through [`Policy::allow_styles`], which needs `&mut Policy`.
//! Once a policy is shared (`&Policy`, `Arc<Policy>`) it is read-only and safe to
//! use from many threads. To change the rules at runtime, build a new policy and
//! swap it in.
//!
//! # Overlapping patterns
//!
//! Every pattern scope that matches an element contributes its rules, concatenated
//! in registration order. Since rules are OR-ed, overlapping patterns that register
//! the same property with different strategies end up accepting the union of what
//! each allows. Avoid overlapping patterns when that is not intended.
//!
//! License: MIT OR Apache-2.0

use std::collections::HashMap;

use log::{debug, trace};
use regex::Regex;

use crate::builder::PolicyBuilder;
use crate::diagnostics::loggable_value;
use crate::errors::StyleParseError;
use crate::escapes::normalize_escapes;
use crate::parser::{parse_declarations, Declaration};
use crate::rule::StyleRule;

/// Vendor and legacy prefixes ignored when looking a property up.
pub const VENDOR_PREFIXES: &[&str] = &[
    "-webkit-", "-moz-", "-ms-", "-o-", "mso-", "-xv-", "-atsc-", "-wap-", "-khtml-", "prince-",
    "-ah-", "-hp-", "-ro-", "-rim-", "-tc-",
];

pub(crate) type PropertyRules = HashMap<String, Vec<StyleRule>>;

/// Rules resolved for one element, borrowed from the policy.
type ResolvedRules<'a> = HashMap<&'a str, Vec<&'a StyleRule>>;

/// Rules registered by one `on_elements_matching` call.
#[derive(Debug, Clone)]
pub(crate) struct PatternScope {
    pub(crate) pattern: Regex,
    pub(crate) rules: PropertyRules,
}

impl PatternScope {
    pub(crate) fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            rules: PropertyRules::new(),
        }
    }
}

/// An allowlist of CSS properties and the values they may take.
///
/// A new policy allows nothing; every element sanitizes to an empty string until
/// rules are added with [`Policy::allow_styles`].
#[derive(Debug, Clone, Default)]
pub struct Policy {
    pub(crate) element_rules: HashMap<String, PropertyRules>,
    pub(crate) pattern_rules: Vec<PatternScope>,
    pub(crate) global_rules: PropertyRules,
}

/// Removes known vendor prefixes, trying each one once in list order.
fn strip_vendor_prefix(property: &str) -> &str {
    VENDOR_PREFIXES.iter().fold(property, |name, prefix| {
        name.strip_prefix(prefix).unwrap_or(name)
    })
}

/// True on the first rule that accepts the value.
fn any_accepts<'r>(rules: impl IntoIterator<Item = &'r StyleRule>, normalized_value: &str) -> bool {
    rules
        .into_iter()
        .any(|rule| rule.accepts(normalized_value))
}

impl Policy {
    /// Creates an empty policy that allows nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a rule for the given properties.
    ///
    /// The rule is added to the policy only once it is committed with
    /// [`PolicyBuilder::on_elements`], [`PolicyBuilder::on_elements_matching`] or
    /// [`PolicyBuilder::globally`].
    pub fn allow_styles<I, S>(&mut self, property_names: I) -> PolicyBuilder<'_>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        PolicyBuilder::new(self, property_names)
    }

    /// Whether any rule at all could apply to `element_name`.
    pub fn has_policies(&self, element_name: &str) -> bool {
        self.has_policies_for(&element_name.to_lowercase())
    }

    fn has_policies_for(&self, element: &str) -> bool {
        if !self.global_rules.is_empty() {
            return true;
        }
        if self
            .element_rules
            .get(element)
            .is_some_and(|rules| !rules.is_empty())
        {
            return true;
        }
        self.pattern_rules
            .iter()
            .any(|scope| !scope.rules.is_empty() && scope.pattern.is_match(element))
    }

    /// Collects the element-level rules for `element` (already lowercased).
    ///
    /// Exact element rules win outright; otherwise every matching pattern scope
    /// contributes, in registration order. Global rules are not included.
    fn resolve(&self, element: &str) -> ResolvedRules<'_> {
        let mut resolved = ResolvedRules::new();

        if let Some(rules) = self.element_rules.get(element).filter(|rules| !rules.is_empty()) {
            for (property, list) in rules {
                resolved.insert(property.as_str(), list.iter().collect());
            }
            return resolved;
        }

        for scope in self
            .pattern_rules
            .iter()
            .filter(|scope| scope.pattern.is_match(element))
        {
            for (property, list) in &scope.rules {
                resolved
                    .entry(property.as_str())
                    .or_default()
                    .extend(list.iter());
            }
        }
        resolved
    }

    /// Decides whether one declaration survives.
    fn accepts(&self, resolved: &ResolvedRules<'_>, declaration: &Declaration) -> bool {
        let property = declaration.property.to_lowercase();
        let property = match normalize_escapes(&property) {
            Ok(property) => property,
            Err(e) => {
                debug!("Dropping '{}': {}", declaration.property, e);
                return false;
            }
        };
        let lookup = strip_vendor_prefix(&property);

        let lowered = declaration.value.to_lowercase();
        let normalized = match normalize_escapes(&lowered) {
            Ok(normalized) => normalized,
            Err(e) => {
                debug!("Dropping '{}': {}", declaration.property, e);
                return false;
            }
        };

        let scoped = resolved.get(lookup).into_iter().flatten().copied();
        if any_accepts(scoped, &normalized) {
            return true;
        }
        any_accepts(self.global_rules.get(lookup).into_iter().flatten(), &normalized)
    }

    /// Sanitizes a style attribute, reporting parse failures.
    ///
    /// Returns the accepted declarations as `property: value` pairs joined with
    /// `"; "`, with the property and value text exactly as they were written.
    /// A trailing `!important` is never emitted.
    /// Elements without any applicable rule yield an empty string without the
    /// style being parsed.
    ///
    /// # Errors
    ///
    /// Returns [`StyleParseError`] when the style text is not a plain list of
    /// declarations. Nothing from such input is ever emitted.
    pub fn try_sanitize(&self, element_name: &str, style: &str) -> Result<String, StyleParseError> {
        let element = element_name.to_lowercase();
        if !self.has_policies_for(&element) {
            trace!("No style policy applies to <{}>.", element);
            return Ok(String::new());
        }
        let resolved = self.resolve(&element);
        debug!(
            "Resolved {} scoped properties for <{}>.",
            resolved.len(),
            element
        );

        let declarations = parse_declarations(style)?;

        let mut clean = Vec::with_capacity(declarations.len());
        for declaration in &declarations {
            if self.accepts(&resolved, declaration) {
                if declaration.important {
                    debug!("Emitting '{}' without !important.", declaration.property);
                }
                clean.push(format!("{}: {}", declaration.property, declaration.value));
            } else {
                debug!(
                    "Dropped '{}' on <{}>.",
                    declaration.property, element
                );
                trace!("Dropped value: {}", loggable_value(&declaration.value));
            }
        }
        Ok(clean.join("; "))
    }

    /// Sanitizes a style attribute, failing closed.
    ///
    /// Identical to [`Policy::try_sanitize`] except that a parse failure yields an
    /// empty string.
    pub fn sanitize(&self, element_name: &str, style: &str) -> String {
        match self.try_sanitize(element_name, style) {
            Ok(clean) => clean,
            Err(e) => {
                debug!("Discarding style on <{}>: {}", element_name, e);
                String::new()
            }
        }
    }
}
