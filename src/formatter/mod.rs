//! Output formatters for checkmake results.
//!
//! - **Text**: borderless table for humans (default)
//! - **JSON**: machine-readable array of violations
//! - **Custom**: user template rendered once per violation

mod custom;
mod json;
mod text;

pub use custom::CustomFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use std::io::Write;

use crate::error::{CheckmakeError, FormatError, Result};
use crate::types::RuleViolation;

/// Built-in output modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Parse an output mode name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Names accepted by [`OutputFormat::parse`].
    pub fn all_names() -> &'static [&'static str] {
        &["text", "json"]
    }
}

/// Trait for rendering violations.
pub trait Formatter {
    /// Write the violations. Nothing is written for an empty list.
    fn format(
        &self,
        violations: &[RuleViolation],
        writer: &mut dyn Write,
    ) -> std::result::Result<(), FormatError>;

    /// Format the violations to a string.
    fn format_to_string(&self, violations: &[RuleViolation]) -> String {
        let mut buf = Vec::new();
        self.format(violations, &mut buf).unwrap_or_default();
        String::from_utf8(buf).unwrap_or_default()
    }
}

/// How output should be rendered, gathered from flags and config.
#[derive(Debug, Clone, Default)]
pub struct FormatterOptions<'a> {
    /// Template given on the command line.
    pub template: Option<&'a str>,
    /// Output mode given on the command line.
    pub output: Option<&'a str>,
    /// `[default] output` from the config file.
    pub config_output: Option<&'a str>,
    /// `[default] format` from the config file, used in text mode only.
    pub config_template: Option<&'a str>,
    /// Colour the text summary.
    pub colors: bool,
}

/// Pick a formatter: command-line template, then command-line output mode,
/// then config output mode, then text.
pub fn build_formatter(options: &FormatterOptions<'_>) -> Result<Box<dyn Formatter>> {
    if let Some(template) = options.template {
        return Ok(Box::new(CustomFormatter::new(template)?));
    }

    let output = options.output.or(options.config_output).unwrap_or("text");
    match OutputFormat::parse(output) {
        Some(OutputFormat::Json) => Ok(Box::new(JsonFormatter::new())),
        Some(OutputFormat::Text) => match options.config_template {
            Some(template) => Ok(Box::new(CustomFormatter::new(template)?)),
            None => Ok(Box::new(TextFormatter::new().with_colors(options.colors))),
        },
        None => Err(CheckmakeError::InvalidOutput(output.to_string())),
    }
}
