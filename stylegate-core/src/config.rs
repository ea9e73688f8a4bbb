//! Configuration management for `stylegate-core`.
//!
//! This module defines a declarative, serde-friendly description of a style
//! policy. A [`PolicyConfig`] is usually loaded from YAML (or JSON), validated as a whole,
//! and then compiled into a [`Policy`] by replaying each rule through the policy
//! builder in file order.
//!
//! Custom predicates cannot be expressed in configuration; a rule with neither
//! `matching` nor `one_of` uses the built-in default handler for each property.
//!
//! License: MIT OR Apache-2.0

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::errors::StyleGateError;
use crate::policy::Policy;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Compiled size limit for configured patterns.
const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// One rule: which properties, how values are checked, and where it applies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleRuleConfig {
    /// Optional identifier used in error messages.
    pub name: Option<String>,
    /// Human-readable description of the rule.
    pub description: Option<String>,
    /// CSS property names the rule allows.
    pub properties: Vec<String>,
    /// Regex a normalized value must match.
    pub matching: Option<String>,
    /// Values accepted, ignoring case.
    pub one_of: Option<Vec<String>>,
    /// Exact element names the rule applies to.
    pub elements: Option<Vec<String>>,
    /// Regex over element names the rule applies to.
    pub elements_matching: Option<String>,
    /// Apply the rule to every element.
    pub global: bool,
}

impl StyleRuleConfig {
    /// Name used when reporting problems with this rule.
    fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("#{}", index + 1),
        }
    }

    fn scope_count(&self) -> usize {
        [self.elements.is_some(), self.elements_matching.is_some(), self.global]
            .iter()
            .filter(|set| **set)
            .count()
    }
}

/// The top-level configuration structure: an ordered list of rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub rules: Vec<StyleRuleConfig>,
}

/// Compiles one configured pattern with the shared limits.
fn compile_pattern(label: &str, pattern: &str) -> Result<Regex, StyleGateError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(StyleGateError::PatternLengthExceeded(
            label.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }
    RegexBuilder::new(pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| StyleGateError::PatternCompilation(label.to_string(), e))
}

impl PolicyConfig {
    /// Parses a configuration from YAML text and validates it.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: PolicyConfig =
            serde_yml::from_str(text).context("Failed to parse style policy configuration")?;
        config.validate()?;
        debug!("Parsed {} style rules.", config.rules.len());
        Ok(config)
    }

    /// Parses a configuration from JSON text and validates it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: PolicyConfig =
            serde_json::from_str(text).context("Failed to parse style policy configuration")?;
        config.validate()?;
        debug!("Parsed {} style rules.", config.rules.len());
        Ok(config)
    }

    /// Loads a configuration from a file.
    ///
    /// Files with a `.json` extension are read as JSON, anything else as YAML.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading style policy from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
        .with_context(|| format!("Failed to load policy file {}", path.display()))?;
        info!(
            "Loaded {} style rules from file {}.",
            config.rules.len(),
            path.display()
        );
        Ok(config)
    }

    /// Checks every rule and reports all problems at once.
    pub fn validate(&self) -> Result<(), StyleGateError> {
        let mut errors = Vec::new();

        for (index, rule) in self.rules.iter().enumerate() {
            let label = rule.label(index);

            if rule.properties.is_empty() || rule.properties.iter().any(|p| p.trim().is_empty()) {
                errors.push(format!("Rule '{}' needs at least one non-empty property name.", label));
            }
            if rule.matching.is_some() && rule.one_of.is_some() {
                errors.push(format!(
                    "Rule '{}' sets both `matching` and `one_of`; only one strategy is allowed.",
                    label
                ));
            }
            if rule.one_of.as_ref().is_some_and(Vec::is_empty) {
                errors.push(format!("Rule '{}' has an empty `one_of` list.", label));
            }
            match rule.scope_count() {
                1 => {}
                0 => errors.push(format!(
                    "Rule '{}' has no scope; set `elements`, `elements_matching` or `global`.",
                    label
                )),
                _ => errors.push(format!(
                    "Rule '{}' sets more than one of `elements`, `elements_matching` and `global`.",
                    label
                )),
            }
            if rule.elements.as_ref().is_some_and(Vec::is_empty) {
                errors.push(format!("Rule '{}' has an empty `elements` list.", label));
            }
            for pattern in [&rule.matching, &rule.elements_matching].into_iter().flatten() {
                if let Err(e) = compile_pattern(&label, pattern) {
                    errors.push(e.to_string());
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StyleGateError::InvalidConfig(errors.join("\n")))
        }
    }

    /// Builds a policy from this configuration.
    pub fn build_policy(&self) -> Result<Policy, StyleGateError> {
        self.validate()?;

        let mut policy = Policy::new();
        for (index, rule) in self.rules.iter().enumerate() {
            let label = rule.label(index);
            let mut builder = policy.allow_styles(&rule.properties);
            if let Some(pattern) = &rule.matching {
                builder = builder.matching(compile_pattern(&label, pattern)?);
            }
            if let Some(values) = &rule.one_of {
                builder = builder.matching_enum(values.iter().cloned());
            }

            if let Some(elements) = &rule.elements {
                builder.on_elements(elements);
            } else if let Some(pattern) = &rule.elements_matching {
                builder.on_elements_matching(compile_pattern(&label, pattern)?);
            } else {
                builder.globally();
            }
            debug!("Applied style rule '{}'.", label);
        }
        Ok(policy)
    }
}

impl Policy {
    /// Builds a policy from a validated configuration.
    pub fn from_config(config: &PolicyConfig) -> Result<Policy, StyleGateError> {
        config.build_policy()
    }
}
