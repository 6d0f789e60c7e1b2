//! Core types shared by the rules, the validator and the formatters.
//!
//! - `Severity` - how important a violation is
//! - `RuleViolation` - a single finding reported by a rule

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Severity levels for rule violations.
///
/// Ordered from most severe to least severe: `Error > Warning > Info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Problems that make the build behave incorrectly
    Error,
    /// Problems that usually should be fixed
    Warning,
    /// Style suggestions
    Info,
}

impl Severity {
    /// Parse a severity from its lowercase name. Anything else is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Error => 2,
            Self::Warning => 1,
            Self::Info => 0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A rule violation found while validating a Makefile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleViolation {
    /// Name of the rule that produced the violation.
    pub rule: String,
    /// Human-readable message.
    pub violation: String,
    /// File the violation was found in.
    pub file_name: String,
    /// Line the violation refers to. `-1` when no line is known.
    pub line_number: i64,
    /// Severity; left unset by most rules and resolved by the validator.
    pub severity: Option<Severity>,
}

impl RuleViolation {
    /// Create a violation with an unset severity.
    pub fn new(
        rule: impl Into<String>,
        violation: impl Into<String>,
        file_name: impl Into<String>,
        line_number: i64,
    ) -> Self {
        Self {
            rule: rule.into(),
            violation: violation.into(),
            file_name: file_name.into(),
            line_number,
            severity: None,
        }
    }

    /// Pin the severity instead of leaving it to the validator.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// The severity, treating an unresolved one as an error.
    pub fn effective_severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::Error)
    }
}
