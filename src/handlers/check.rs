use std::io::Write;
use std::path::PathBuf;

use log::{debug, error, info};

use crate::config::CheckmakeConfig;
use crate::error::Result;
use crate::formatter::{FormatterOptions, build_formatter};
use crate::parser;
use crate::rules::{RuleRegistry, default_registry};
use crate::types::{RuleViolation, Severity};
use crate::validator::Validator;

/// Options for a check run, mostly straight from the command line.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub makefiles: Vec<PathBuf>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub include_info: bool,
    pub errors_only: bool,
    pub colors: bool,
}

/// What a check run found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Error-severity violations left after filtering.
    pub error_count: usize,
    /// One message per Makefile that could not be parsed.
    pub parse_failures: Vec<String>,
}

impl CheckSummary {
    pub fn is_success(&self) -> bool {
        self.error_count == 0 && self.parse_failures.is_empty()
    }
}

/// Parse and validate every Makefile, then write the filtered violations.
///
/// A file that fails to parse is recorded and skipped; the rest are still
/// checked.
pub fn handle_check(
    options: &CheckOptions,
    config: &CheckmakeConfig,
    writer: &mut dyn Write,
) -> Result<CheckSummary> {
    let formatter = build_formatter(&FormatterOptions {
        template: options.format.as_deref(),
        output: options.output.as_deref(),
        config_output: config.global_value("output"),
        config_template: config.global_value("format"),
        colors: options.colors,
    })?;

    let registry = default_registry();
    for name in unknown_rule_tables(&registry, config) {
        info!("Ignoring configuration for unknown rule '{}'", name);
    }

    let validator = Validator::new(&registry);
    let mut summary = CheckSummary::default();
    let mut violations = Vec::new();

    debug!("Makefiles passed: {:?}", options.makefiles);
    for path in &options.makefiles {
        info!("Parsing file {:?}", path.display().to_string());
        match parser::parse(path) {
            Ok(makefile) => violations.extend(validator.validate(&makefile, config)),
            Err(e) => {
                let message = format!("failed to parse \"{}\": {}", path.display(), e);
                error!("{}", message);
                summary.parse_failures.push(message);
            }
        }
    }

    let violations = filter_violations(violations, options.include_info, options.errors_only);
    summary.error_count = violations
        .iter()
        .filter(|v| v.effective_severity() == Severity::Error)
        .count();

    formatter.format(&violations, writer)?;
    Ok(summary)
}

/// Rule tables in the config that name no registered rule.
pub(crate) fn unknown_rule_tables<'a>(
    registry: &RuleRegistry,
    config: &'a CheckmakeConfig,
) -> Vec<&'a str> {
    config
        .configured_rules()
        .filter(|name| registry.get(name).is_none())
        .collect()
}

/// Drop info violations unless asked for, and everything but errors with
/// `errors_only`.
pub fn filter_violations(
    violations: Vec<RuleViolation>,
    include_info: bool,
    errors_only: bool,
) -> Vec<RuleViolation> {
    violations
        .into_iter()
        .filter(|v| match v.effective_severity() {
            Severity::Error => true,
            Severity::Warning => !errors_only,
            Severity::Info => include_info && !errors_only,
        })
        .collect()
}
