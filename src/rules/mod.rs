//! Rule system for checkmake.
//!
//! Every check implements [`Rule`] and is registered explicitly in a
//! [`RuleRegistry`]. Rules are pure: they read the parsed Makefile and their
//! options and return violations in a deterministic order.

pub mod maxbodylength;
pub mod minphony;
pub mod phonydeclared;
pub mod registry;
pub mod timestampexpanded;
pub mod uniquetargets;

pub use registry::{RuleRegistry, RuleRegistryBuilder};

use std::collections::HashSet;

use crate::config::RuleConfig;
use crate::parser::Makefile;
use crate::types::{RuleViolation, Severity};

/// A check that runs against a parsed Makefile.
pub trait Rule: Send + Sync {
    /// Unique rule name, also the name of its config table.
    fn name(&self) -> &str;

    /// Human-readable description. Must work with an empty config.
    fn description(&self, config: &RuleConfig) -> String;

    /// Severity used when neither the rule nor the config sets one.
    fn default_severity(&self) -> Severity;

    /// Check the Makefile and return any violations.
    fn run(&self, makefile: &Makefile, config: &RuleConfig) -> Vec<RuleViolation>;
}

/// Registry holding every built-in rule.
pub fn default_registry() -> RuleRegistry {
    RuleRegistry::builder()
        .register(maxbodylength::MaxBodyLength)
        .register(minphony::MinPhony::default())
        .register(phonydeclared::PhonyDeclared)
        .register(timestampexpanded::TimestampExpanded)
        .register(uniquetargets::UniqueTargets)
        .build()
}

/// Whether `target` names the phony declaration itself.
pub(crate) fn is_phony_declaration(target: &str) -> bool {
    target == ".PHONY" || target == "PHONY"
}

/// Targets declared phony, either through `.PHONY:` rules or through a
/// `PHONY` variable.
pub(crate) fn declared_phony_targets(makefile: &Makefile) -> HashSet<&str> {
    let from_variables = makefile
        .variables
        .iter()
        .filter(|v| v.name == "PHONY")
        .flat_map(|v| v.assignment.split_whitespace());

    let from_rules = makefile
        .rules
        .iter()
        .filter(|r| is_phony_declaration(&r.target))
        .flat_map(|r| r.dependencies.iter().map(String::as_str));

    from_variables.chain(from_rules).collect()
}
