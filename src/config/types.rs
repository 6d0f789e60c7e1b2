use std::collections::BTreeMap;
use std::str::FromStr;

use crate::types::Severity;

/// Key that skips a rule when set to `"true"`.
pub const DISABLED_KEY: &str = "disabled";
/// Key that overrides a rule's default severity.
pub const SEVERITY_KEY: &str = "severity";

/// String options for a single rule.
///
/// Values stay strings at this boundary. Each rule parses the keys it knows
/// into typed locals and falls back to its default on anything it can't read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    options: BTreeMap<String, String>,
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option to the rule config.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    /// Get an option value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Get an option parsed into `T`. Unparseable values read as absent.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    /// Get a comma-separated option as trimmed items, empty items dropped.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
    }

    /// Whether `disabled = "true"` is set.
    pub fn is_disabled(&self) -> bool {
        self.get(DISABLED_KEY) == Some("true")
    }

    /// The configured severity, if it names a valid one.
    pub fn severity(&self) -> Option<Severity> {
        self.get(SEVERITY_KEY).and_then(Severity::parse)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RuleConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Global settings from the `[default]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalSettings {
    /// Output mode name (`text` or `json`).
    pub output: Option<String>,
    /// Template used for every violation in text mode.
    pub format: Option<String>,
}

/// Parsed configuration file: global settings plus one `RuleConfig` per
/// rule table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckmakeConfig {
    pub global: GlobalSettings,
    pub(crate) values: BTreeMap<String, RuleConfig>,
}

impl CheckmakeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a specific rule.
    pub fn with_rule(mut self, rule: impl Into<String>, config: RuleConfig) -> Self {
        self.values.insert(rule.into(), config);
        self
    }

    /// Disable a rule.
    pub fn disable(self, rule: impl Into<String>) -> Self {
        let rule = rule.into();
        let config = self
            .values
            .get(&rule)
            .cloned()
            .unwrap_or_default()
            .with_option(DISABLED_KEY, "true");
        self.with_rule(rule, config)
    }

    /// Look up a `[default]` setting by key.
    pub fn global_value(&self, key: &str) -> Option<&str> {
        match key {
            "output" => self.global.output.as_deref(),
            "format" => self.global.format.as_deref(),
            _ => None,
        }
    }

    /// Names of the rules that have a table in the file.
    pub fn configured_rules(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
