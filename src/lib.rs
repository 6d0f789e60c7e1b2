//! # checkmake
//!
//! A linter for Makefiles. It parses a Makefile into rules and variable
//! assignments without evaluating it, then runs a set of configurable checks
//! against the result.
//!
//! ## Features
//!
//! - **Structural parsing**: targets, prerequisites, recipes and the four kinds
//!   of variable assignment, each with its source line
//! - **Pluggable rules**: every check implements [`Rule`] and lives in an
//!   explicit [`RuleRegistry`]
//! - **Configurable**: per-rule options, severities and disabling from a TOML
//!   file
//! - **Multiple outputs**: text table, JSON, or a custom template
//!
//! ## Example
//!
//! ```rust,no_run
//! use checkmake::{CheckmakeConfig, Validator, default_registry, parse};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let makefile = parse("Makefile")?;
//! let registry = default_registry();
//! let violations = Validator::new(&registry).validate(&makefile, &CheckmakeConfig::default());
//! for v in &violations {
//!     println!("{}:{} [{}] {}", v.file_name, v.line_number, v.rule, v.violation);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handlers;
pub mod parser;
pub mod rules;
pub mod types;
pub mod validator;

// Re-export commonly used types and functions
pub use config::{CheckmakeConfig, ConfigProvider, RuleConfig};
pub use error::{CheckmakeError, Result};
pub use parser::{Makefile, parse, parse_source};
pub use rules::{Rule, RuleRegistry, default_registry};
pub use types::{RuleViolation, Severity};
pub use validator::Validator;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
