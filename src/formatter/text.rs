//! Text formatter for checkmake.
//!
//! Prints a borderless table, one row per violation, followed by a summary
//! line with counts per severity.

use std::io::Write;

use colored::Colorize;
use prettytable::{Row, Table, format};

use crate::error::FormatError;
use crate::formatter::Formatter;
use crate::types::{RuleViolation, Severity};

/// Column width the description is wrapped at.
const DESCRIPTION_WIDTH: usize = 60;

const TITLES: [&str; 5] = [
    "SEVERITY",
    "RULE",
    "DESCRIPTION",
    "FILE NAME",
    "LINE NUMBER",
];

/// Table output for terminals.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    /// Colour the summary line.
    pub colors: bool,
    pub description_width: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colors: false,
            description_width: DESCRIPTION_WIDTH,
        }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    fn summary(&self, violations: &[RuleViolation]) -> String {
        let count = |severity: Severity| {
            violations
                .iter()
                .filter(|v| v.effective_severity() == severity)
                .count()
        };

        let mut parts = Vec::new();
        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            let n = count(severity);
            if n == 0 {
                continue;
            }
            let plural = if n == 1 || severity == Severity::Info { "" } else { "s" };
            let part = format!("{} {}{}", n, severity, plural);
            parts.push(if self.colors {
                match severity {
                    Severity::Error => part.red().bold().to_string(),
                    Severity::Warning => part.yellow().bold().to_string(),
                    Severity::Info => part.cyan().to_string(),
                }
            } else {
                part
            });
        }
        parts.join(", ")
    }
}

impl Formatter for TextFormatter {
    fn format(
        &self,
        violations: &[RuleViolation],
        writer: &mut dyn Write,
    ) -> Result<(), FormatError> {
        if violations.is_empty() {
            return Ok(());
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.set_titles(Row::from(TITLES));

        for violation in violations {
            table.add_row(Row::from([
                violation.effective_severity().to_string(),
                violation.rule.clone(),
                textwrap::fill(&violation.violation, self.description_width),
                violation.file_name.clone(),
                violation.line_number.to_string(),
            ]));
        }

        write!(writer, "{}", table)?;
        writeln!(writer)?;
        writeln!(writer, "{}", self.summary(violations))?;
        Ok(())
    }
}
