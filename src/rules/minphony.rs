//! minphony
//!
//! A minimum set of phony targets (`all`, `clean`, `test` by default) must be
//! defined and declared PHONY.

use std::collections::HashSet;

use crate::config::RuleConfig;
use crate::parser::Makefile;
use crate::rules::{Rule, declared_phony_targets, is_phony_declaration};
use crate::types::{RuleViolation, Severity};

const NAME: &str = "minphony";
const REQUIRED_KEY: &str = "required";
const DEFAULT_REQUIRED: [&str; 3] = ["all", "clean", "test"];

/// Line reported when the Makefile gives nothing to anchor a violation to.
pub const UNKNOWN_LINE: i64 = -1;

/// Offset applied to the line of a `PHONY` variable. Kept for output
/// compatibility with earlier releases, which reported one line above it.
pub const LEGACY_PHONY_VARIABLE_LINE_SHIFT: i64 = -1;

#[derive(Debug, Clone)]
pub struct MinPhony {
    required: Vec<String>,
}

impl Default for MinPhony {
    fn default() -> Self {
        Self::with_required(DEFAULT_REQUIRED)
    }
}

impl MinPhony {
    /// Rule requiring `required` instead of the built-in list.
    pub fn with_required<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    /// Configured list wins; an empty string switches the rule off.
    fn required_targets(&self, config: &RuleConfig) -> Vec<String> {
        config
            .get_list(REQUIRED_KEY)
            .unwrap_or_else(|| self.required.clone())
    }
}

impl Rule for MinPhony {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self, config: &RuleConfig) -> String {
        let list = match config.get(REQUIRED_KEY) {
            Some(required) if !required.is_empty() => required.to_string(),
            _ => self.required.join(","),
        };
        format!("Minimum required phony targets must be present ({}).", list)
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn run(&self, makefile: &Makefile, config: &RuleConfig) -> Vec<RuleViolation> {
        let required = self.required_targets(config);
        if required.is_empty() {
            return Vec::new();
        }

        let phony = declared_phony_targets(makefile);
        let defined: HashSet<&str> = makefile.rules.iter().map(|r| r.target.as_str()).collect();
        let line = report_line(makefile);

        required
            .iter()
            .filter_map(|target| {
                let message = if !defined.contains(target.as_str()) {
                    format!(
                        "Required target \"{}\" is missing from the Makefile.",
                        target
                    )
                } else if !phony.contains(target.as_str()) {
                    format!("Required target \"{}\" must be declared PHONY.", target)
                } else {
                    return None;
                };
                Some(RuleViolation::new(NAME, message, &makefile.file_name, line))
            })
            .collect()
    }
}

/// The last `.PHONY` rule, then the last `PHONY` variable, then the last rule.
fn report_line(makefile: &Makefile) -> i64 {
    if let Some(rule) = makefile
        .rules
        .iter()
        .rev()
        .find(|r| is_phony_declaration(&r.target))
    {
        return rule.line_number as i64;
    }

    if let Some(variable) = makefile.variables.iter().rev().find(|v| v.name == "PHONY") {
        return variable.line_number as i64 + LEGACY_PHONY_VARIABLE_LINE_SHIFT;
    }

    makefile
        .rules
        .last()
        .map_or(UNKNOWN_LINE, |r| r.line_number as i64)
}
