//! maxbodylength
//!
//! Recipes should stay short. Long bodies belong in a script.

use crate::config::RuleConfig;
use crate::parser::Makefile;
use crate::rules::Rule;
use crate::types::{RuleViolation, Severity};

const NAME: &str = "maxbodylength";
const MAX_BODY_LENGTH_KEY: &str = "maxBodyLength";
const DEFAULT_MAX_BODY_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct MaxBodyLength;

/// Configured limit when it is a positive integer, otherwise the default.
fn max_body_length(config: &RuleConfig) -> usize {
    config
        .get_parsed::<usize>(MAX_BODY_LENGTH_KEY)
        .filter(|max| *max > 0)
        .unwrap_or(DEFAULT_MAX_BODY_LENGTH)
}

impl Rule for MaxBodyLength {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self, config: &RuleConfig) -> String {
        format!(
            "Target bodies should be kept simple and short (no more than {} lines).",
            max_body_length(config)
        )
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn run(&self, makefile: &Makefile, config: &RuleConfig) -> Vec<RuleViolation> {
        let max = max_body_length(config);

        makefile
            .rules
            .iter()
            .filter(|rule| rule.body.len() > max)
            .map(|rule| {
                RuleViolation::new(
                    NAME,
                    format!(
                        "Target body for \"{}\" exceeds allowed length of {} lines ({}).",
                        rule.target,
                        max,
                        rule.body.len()
                    ),
                    &makefile.file_name,
                    rule.line_number as i64,
                )
            })
            .collect()
    }
}
