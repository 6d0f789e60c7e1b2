//! Runs every registered rule against a parsed Makefile.

use log::debug;

use crate::config::{ConfigProvider, RuleConfig};
use crate::parser::Makefile;
use crate::rules::{Rule, RuleRegistry};
use crate::types::{RuleViolation, Severity};

/// One validation pass over a registry of rules.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Run every enabled rule in alphabetical order.
    ///
    /// Violations the rule left without a severity get the configured one, or
    /// the rule's default when the config names no valid severity.
    pub fn validate(
        &self,
        makefile: &Makefile,
        provider: &dyn ConfigProvider,
    ) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        for rule in self.registry.rules_sorted() {
            let config = provider.rule_config(rule.name());
            if config.is_disabled() {
                debug!("Skipping disabled rule '{}'", rule.name());
                continue;
            }

            debug!("Running rule '{}'...", rule.name());
            let severity = resolve_severity(rule, &config);
            for mut violation in rule.run(makefile, &config) {
                violation.severity.get_or_insert(severity);
                violations.push(violation);
            }
        }

        violations
    }
}

/// Severity for `rule`: the configured one when valid, else its default.
pub fn resolve_severity(rule: &dyn Rule, config: &RuleConfig) -> Severity {
    config
        .severity()
        .unwrap_or_else(|| rule.default_severity())
}
