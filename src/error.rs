//! Error types for checkmake.

use std::path::PathBuf;

use thiserror::Error;

use crate::formatter::OutputFormat;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum CheckmakeError {
    /// A Makefile could not be opened or read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Formatter error: {0}")]
    Format(#[from] FormatError),

    /// Unknown value for the output mode
    #[error(
        "invalid output format: {0:?} (supported: {supported})",
        supported = OutputFormat::all_names().join(", ")
    )]
    InvalidOutput(String),

    /// Writing results failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl CheckmakeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading the configuration file.
///
/// Loading never aborts a run; these are logged and defaults are used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ParsingFailed(String),
}

/// Errors raised by the output formatters.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid template: {0}")]
    Template(#[from] tera::Error),

    #[error("failed to serialize violations: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CheckmakeError>;
