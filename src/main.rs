use anyhow::Context;
use checkmake::{
    cli::{Cli, Commands},
    config,
    handlers::{CheckOptions, handle_check, handle_list_rules},
    rules::default_registry,
};
use clap::{CommandFactory, Parser};
use std::io::{self, Write};
use std::process;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    let config = config::load_config(&cli.config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(Commands::ListRules) = cli.command {
        handle_list_rules(&default_registry(), &config, &mut out).context("failed to list rules")?;
        return Ok(0);
    }

    if cli.makefiles.is_empty() {
        Cli::command().print_help()?;
        return Ok(0);
    }

    let options = CheckOptions {
        makefiles: cli.makefiles.clone(),
        format: cli.format.clone(),
        output: cli.output.clone(),
        include_info: cli.include_info,
        errors_only: cli.errors_only,
        colors: cli.use_colors(),
    };
    let summary = handle_check(&options, &config, &mut out)?;
    out.flush()?;

    if !summary.parse_failures.is_empty() {
        eprintln!(
            "Error: {} file(s) could not be parsed",
            summary.parse_failures.len()
        );
    }
    if summary.error_count > 0 {
        eprintln!("Error: errors found ({})", summary.error_count);
    }

    Ok(if summary.is_success() { 0 } else { 1 })
}
