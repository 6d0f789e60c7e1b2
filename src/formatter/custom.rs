//! Template formatter for checkmake.
//!
//! Renders a Tera template once per violation, one line each. Available
//! variables: `rule`, `violation`, `file_name`, `line_number`, `severity`.
//!
//! ```text
//! {{ file_name }}:{{ line_number }}:{{ rule }}:{{ violation }}
//! ```

use std::io::Write;

use tera::{Context, Tera};

use crate::error::FormatError;
use crate::formatter::Formatter;
use crate::types::RuleViolation;

// No .html suffix, so Tera leaves the output unescaped
const TEMPLATE_NAME: &str = "violation";

/// Formatter driven by a user template.
pub struct CustomFormatter {
    tera: Tera,
}

impl CustomFormatter {
    /// Compile `template`. Fails when the template does not parse.
    pub fn new(template: &str) -> Result<Self, FormatError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, template)?;
        Ok(Self { tera })
    }

    fn render(&self, violation: &RuleViolation) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("rule", &violation.rule);
        context.insert("violation", &violation.violation);
        context.insert("file_name", &violation.file_name);
        context.insert("line_number", &violation.line_number);
        context.insert("severity", violation.effective_severity().as_str());
        self.tera.render(TEMPLATE_NAME, &context)
    }
}

impl Formatter for CustomFormatter {
    fn format(
        &self,
        violations: &[RuleViolation],
        writer: &mut dyn Write,
    ) -> Result<(), FormatError> {
        for violation in violations {
            let line = self.render(violation)?;
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}
