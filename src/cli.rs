use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;

#[derive(Parser, Debug)]
#[command(name = "checkmake")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate Makefiles for common issues")]
#[command(
    long_about = "checkmake scans Makefiles and reports potential issues according to configurable rules."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file to read
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        default_value = CONFIG_FILE_NAME
    )]
    pub config: PathBuf,

    /// Tera template rendered once per violation
    #[arg(long, value_name = "TEMPLATE", conflicts_with = "output")]
    pub format: Option<String>,

    /// Output format: text or json
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<String>,

    /// Include info-level violations (style suggestions)
    #[arg(long, conflicts_with = "errors_only")]
    pub include_info: bool,

    /// Show only error-level violations
    #[arg(long)]
    pub errors_only: bool,

    /// Makefiles to check
    #[arg(value_name = "MAKEFILE")]
    pub makefiles: Vec<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List registered rules
    ListRules,
}

impl Cli {
    /// Initialize logging. `--debug` raises the level to debug.
    pub fn init_logging(&self) {
        let level = if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }

    /// Colour text output only when writing to a terminal.
    pub fn use_colors(&self) -> bool {
        std::io::stdout().is_terminal()
    }
}
