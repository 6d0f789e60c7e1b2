//! Name-keyed rule registry.

use std::collections::BTreeMap;
use std::fmt;

use super::Rule;

/// Immutable set of rules keyed by name.
///
/// Built once through [`RuleRegistry::builder`] and then shared read-only.
#[derive(Default)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::default()
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All rules in alphabetical order by name.
    pub fn rules_sorted(&self) -> Vec<&dyn Rule> {
        self.rules.values().map(|rule| rule.as_ref()).collect()
    }

    /// Rule names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Builder for [`RuleRegistry`].
#[derive(Default)]
pub struct RuleRegistryBuilder {
    rules: BTreeMap<String, Box<dyn Rule>>,
}

impl RuleRegistryBuilder {
    /// Add a rule. A later rule with the same name replaces the earlier one.
    pub fn register(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.insert(rule.name().to_string(), Box::new(rule));
        self
    }

    pub fn build(self) -> RuleRegistry {
        RuleRegistry { rules: self.rules }
    }
}
