// stylegate-core/src/builder.rs
//! Fluent staging of style rules before they are committed into a [`Policy`].
//!
//! A builder is started with [`Policy::allow_styles`], optionally given a
//! matching strategy, and finished with one of the scope commits. When more than
//! one kind of strategy is staged, a handler wins over an enumeration, which wins
//! over a pattern, whatever the call order. Commits only
//! ever append rules; nothing a builder does can remove or narrow what an earlier
//! commit allowed.
//!
//! License: MIT OR Apache-2.0

use std::sync::Arc;

use log::{debug, warn};
use regex::Regex;

use crate::handlers::default_handler;
use crate::policy::{PatternScope, Policy};
use crate::rule::{StyleHandler, StyleRule};

/// A rule definition that has not been committed to a scope yet.
#[must_use = "a style rule only takes effect once committed with on_elements, on_elements_matching or globally"]
pub struct PolicyBuilder<'p> {
    policy: &'p mut Policy,
    property_names: Vec<String>,
    handler: Option<StyleHandler>,
    one_of: Option<Vec<String>>,
    pattern: Option<Regex>,
}

impl<'p> PolicyBuilder<'p> {
    pub(crate) fn new<I, S>(policy: &'p mut Policy, property_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let property_names: Vec<String> = property_names
            .into_iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect();
        if property_names.is_empty() {
            warn!("allow_styles called without any property names; the rule will have no effect.");
        }
        Self {
            policy,
            property_names,
            handler: None,
            one_of: None,
            pattern: None,
        }
    }

    fn staged_count(&self) -> usize {
        [self.handler.is_some(), self.one_of.is_some(), self.pattern.is_some()]
            .iter()
            .filter(|staged| **staged)
            .count()
    }

    fn warn_if_shadowed(&self) {
        if self.staged_count() > 1 {
            warn!(
                "More than one strategy staged for properties {:?}; only the highest priority one applies.",
                self.property_names
            );
        }
    }

    /// Accept a value when `pattern` matches its normalized form.
    pub fn matching(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self.warn_if_shadowed();
        self
    }

    /// Accept a value when it equals one of `values`, ignoring case.
    ///
    /// An empty list stages nothing, leaving the default handler in effect.
    pub fn matching_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            warn!(
                "Empty enumeration for properties {:?}; falling back to default handlers.",
                self.property_names
            );
            return self;
        }
        self.one_of = Some(values);
        self.warn_if_shadowed();
        self
    }

    /// Accept a value when `handler` returns `true` for its normalized form.
    pub fn matching_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self.warn_if_shadowed();
        self
    }

    /// The rule committed for one property. Without a staged strategy the default
    /// handler is resolved now, not at sanitize time.
    fn rule_for(&self, property_name: &str) -> StyleRule {
        if let Some(handler) = &self.handler {
            StyleRule::Handler(Arc::clone(handler))
        } else if let Some(values) = &self.one_of {
            StyleRule::OneOf(values.clone())
        } else if let Some(pattern) = &self.pattern {
            StyleRule::Pattern(pattern.clone())
        } else {
            StyleRule::Handler(default_handler(property_name))
        }
    }

    /// Binds the rule to elements with exactly these names.
    pub fn on_elements<I, S>(self, element_names: I) -> &'p mut Policy
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for element in element_names {
            let element = element.as_ref().to_lowercase();
            for property in &self.property_names {
                let rule = self.rule_for(property);
                self.policy
                    .element_rules
                    .entry(element.clone())
                    .or_default()
                    .entry(property.clone())
                    .or_default()
                    .push(rule);
            }
            debug!(
                "Committed {:?} on element '{}'.",
                self.property_names, element
            );
        }
        self.policy
    }

    /// Binds the rule to every element whose name matches `pattern`.
    ///
    /// Each call opens a new pattern scope, even when an earlier call used a
    /// pattern with the same text.
    pub fn on_elements_matching(self, pattern: Regex) -> &'p mut Policy {
        if self.property_names.is_empty() {
            return self.policy;
        }
        let mut scope = PatternScope::new(pattern);
        for property in &self.property_names {
            let rule = self.rule_for(property);
            scope.rules.entry(property.clone()).or_default().push(rule);
        }
        debug!(
            "Committed {:?} on elements matching '{}'.",
            self.property_names,
            scope.pattern.as_str()
        );
        self.policy.pattern_rules.push(scope);
        self.policy
    }

    /// Binds the rule to every element.
    pub fn globally(self) -> &'p mut Policy {
        for property in &self.property_names {
            let rule = self.rule_for(property);
            self.policy
                .global_rules
                .entry(property.clone())
                .or_default()
                .push(rule);
        }
        debug!("Committed {:?} globally.", self.property_names);
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_and_element_names_are_lowercased() {
        let mut policy = Policy::new();
        policy.allow_styles(["COLOR"]).on_elements(["SPAN"]);

        let rules = &policy.element_rules["span"];
        assert!(rules.contains_key("color"));
    }

    #[test]
    fn test_repeated_commits_append() {
        let mut policy = Policy::new();
        policy
            .allow_styles(["color"])
            .matching(Regex::new("red").unwrap())
            .globally()
            .allow_styles(["color"])
            .matching_enum(["green"])
            .globally();

        assert_eq!(policy.global_rules["color"].len(), 2);
    }

    #[test]
    fn test_default_handler_used_without_strategy() {
        let mut policy = Policy::new();
        policy.allow_styles(["text-align"]).on_elements(["p"]);

        let rule = &policy.element_rules["p"]["text-align"][0];
        assert!(matches!(rule, StyleRule::Handler(_)));
        assert!(rule.accepts("center"));
        assert!(!rule.accepts("sideways"));
    }

    #[test]
    fn test_enum_wins_over_pattern_in_either_order() {
        let mut policy = Policy::new();
        policy
            .allow_styles(["color"])
            .matching_enum(["red"])
            .matching(Regex::new("^blue$").unwrap())
            .globally()
            .allow_styles(["margin"])
            .matching(Regex::new("^0$").unwrap())
            .matching_enum(["auto"])
            .globally();

        let color = &policy.global_rules["color"];
        assert_eq!(color.len(), 1);
        assert!(color[0].accepts("red"));
        assert!(!color[0].accepts("blue"));
        assert!(policy.global_rules["margin"][0].accepts("auto"));
        assert!(!policy.global_rules["margin"][0].accepts("0"));
    }

    #[test]
    fn test_handler_wins_over_other_strategies() {
        let mut policy = Policy::new();
        policy
            .allow_styles(["color"])
            .matching_handler(|value| value == "green")
            .matching_enum(["red"])
            .matching(Regex::new("^blue$").unwrap())
            .on_elements(["p"]);

        let rule = &policy.element_rules["p"]["color"][0];
        assert!(matches!(rule, StyleRule::Handler(_)));
        assert!(rule.accepts("green"));
        assert!(!rule.accepts("red"));
        assert!(!rule.accepts("blue"));
    }

    #[test]
    fn test_restaging_same_strategy_replaces_it() {
        let mut policy = Policy::new();
        policy
            .allow_styles(["color"])
            .matching(Regex::new("^red$").unwrap())
            .matching(Regex::new("^blue$").unwrap())
            .globally();

        assert!(policy.global_rules["color"][0].accepts("blue"));
        assert!(!policy.global_rules["color"][0].accepts("red"));
    }

    #[test]
    fn test_empty_enum_keeps_default_handler() {
        let mut policy = Policy::new();
        policy
            .allow_styles(["color"])
            .matching_enum(Vec::<String>::new())
            .globally();

        assert!(policy.global_rules["color"][0].accepts("red"));
    }

    #[test]
    fn test_identical_patterns_open_distinct_scopes() {
        let mut policy = Policy::new();
        policy
            .allow_styles(["color"])
            .on_elements_matching(Regex::new("^my-").unwrap())
            .allow_styles(["margin"])
            .on_elements_matching(Regex::new("^my-").unwrap());

        assert_eq!(policy.pattern_rules.len(), 2);
    }

    #[test]
    fn test_no_properties_commits_nothing() {
        let mut policy = Policy::new();
        policy
            .allow_styles(Vec::<&str>::new())
            .on_elements_matching(Regex::new(".*").unwrap());
        policy.allow_styles(Vec::<&str>::new()).on_elements(["div"]);

        assert!(policy.pattern_rules.is_empty());
        assert!(policy.element_rules.is_empty());
    }
}
