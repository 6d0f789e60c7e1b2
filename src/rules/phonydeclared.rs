//! phonydeclared
//!
//! A target without a recipe produces no file, so it should be PHONY.

use crate::config::RuleConfig;
use crate::parser::Makefile;
use crate::rules::{Rule, declared_phony_targets};
use crate::types::{RuleViolation, Severity};

const NAME: &str = "phonydeclared";
const DESCRIPTION: &str = "Every target without a body needs to be marked PHONY";

#[derive(Debug, Clone, Copy, Default)]
pub struct PhonyDeclared;

impl Rule for PhonyDeclared {
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
        let phony = declared_phony_targets(makefile);

        makefile
            .rules
            .iter()
            .filter(|rule| !rule.is_special())
            .filter(|rule| rule.body.is_empty() && !phony.contains(rule.target.as_str()))
            .map(|rule| {
                RuleViolation::new(
                    NAME,
                    format!("Target \"{}\" should be declared PHONY.", rule.target),
                    &makefile.file_name,
                    rule.line_number as i64,
                )
            })
            .collect()
    }
}
