//! uniquetargets
//!
//! A target defined twice gets its recipes overridden or merged, which is
//! rarely intended.

use std::collections::{HashMap, HashSet};

use crate::config::RuleConfig;
use crate::parser::Makefile;
use crate::rules::{Rule, is_phony_declaration};
use crate::types::{RuleViolation, Severity};

const NAME: &str = "uniquetargets";
const DESCRIPTION: &str = "Targets should be uniquely defined";
const DUPLICATE_RISK: &str = "duplicates can cause recipe overrides or unintended merges";
const IGNORE_KEY: &str = "ignore";

#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueTargets;

impl Rule for UniqueTargets {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self, config: &RuleConfig) -> String {
        match config.get(IGNORE_KEY) {
            Some(ignored) if !ignored.is_empty() => {
                format!("{} (ignoring: {}).", DESCRIPTION, ignored)
            }
            _ => format!("{}; {}.", DESCRIPTION, DUPLICATE_RISK),
        }
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn run(&self, makefile: &Makefile, config: &RuleConfig) -> Vec<RuleViolation> {
        let ignored: HashSet<String> = config
            .get_list(IGNORE_KEY)
            .unwrap_or_default()
            .into_iter()
            .collect();

        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut violations = Vec::new();

        for rule in &makefile.rules {
            if is_phony_declaration(&rule.target)
                || rule.is_special()
                || ignored.contains(&rule.target)
            {
                continue;
            }

            match first_seen.get(rule.target.as_str()) {
                Some(first_line) => violations.push(
                    RuleViolation::new(
                        NAME,
                        format!(
                            "Target \"{}\" defined multiple times (lines {} and {}).",
                            rule.target, first_line, rule.line_number
                        ),
                        &makefile.file_name,
                        rule.line_number as i64,
                    )
                    .with_severity(Severity::Error),
                ),
                None => {
                    first_seen.insert(&rule.target, rule.line_number);
                }
            }
        }

        violations
    }
}
