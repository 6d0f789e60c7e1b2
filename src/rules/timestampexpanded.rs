//! timestampexpanded
//!
//! A recursively expanded variable is re-evaluated on every use, so a
//! timestamp taken with `date` can change halfway through a build.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::RuleConfig;
use crate::parser::Makefile;
use crate::rules::Rule;
use crate::types::{RuleViolation, Severity};

const NAME: &str = "timestampexpanded";
const DESCRIPTION: &str = "Simply expand variables that contain timestamps";
const ADVICE: &str = "possibly contains a timestamp and should be simply expanded.";

/// `date` run through `$(shell ...)`, `${shell ...}` or backticks.
static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\$[({]shell\s+date\b|`\s*date\b)").unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampExpanded;

impl Rule for TimestampExpanded {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self, _config: &RuleConfig) -> String {
        DESCRIPTION.to_string()
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn run(&self, makefile: &Makefile, _config: &RuleConfig) -> Vec<RuleViolation> {
        makefile
            .variables
            .iter()
            .filter(|v| !v.simply_expanded && TIMESTAMP_RE.is_match(&v.assignment))
            .map(|v| {
                let message = format!("Variable \"{}\" {}", v.name, ADVICE);
                RuleViolation::new(NAME, message, &makefile.file_name, v.line_number as i64)
            })
            .collect()
    }
}
