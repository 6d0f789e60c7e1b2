//! JSON formatter for checkmake.

use std::io::Write;

use serde::Serialize;

use crate::error::FormatError;
use crate::formatter::Formatter;
use crate::types::{RuleViolation, Severity};

/// Pretty-printed JSON array of violations.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Serialize)]
struct JsonViolation<'a> {
    rule: &'a str,
    violation: &'a str,
    file_name: &'a str,
    line_number: i64,
    severity: Severity,
}

impl Formatter for JsonFormatter {
    fn format(
        &self,
        violations: &[RuleViolation],
        writer: &mut dyn Write,
    ) -> Result<(), FormatError> {
        if violations.is_empty() {
            return Ok(());
        }

        let entries: Vec<JsonViolation<'_>> = violations
            .iter()
            .map(|v| JsonViolation {
                rule: &v.rule,
                violation: &v.violation,
                file_name: &v.file_name,
                line_number: v.line_number,
                severity: v.effective_severity(),
            })
            .collect();

        let json = serde_json::to_string_pretty(&entries)?;
        writeln!(writer, "{}", json)?;
        Ok(())
    }
}
