//! Configuration loading.
//!
//! The file is TOML. `[default]` holds global settings and every other table
//! configures the rule of the same name:
//!
//! ```toml
//! [default]
//! output = "json"
//!
//! [maxbodylength]
//! maxBodyLength = 10
//!
//! [minphony]
//! required = ["all", "clean"]
//! severity = "warning"
//! ```
//!
//! Rule values are flattened to strings: scalars use their display form and
//! arrays are joined with `,`.

pub mod types;

pub use types::{CheckmakeConfig, GlobalSettings, RuleConfig};

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::ConfigError;

/// Name of the configuration file looked up by default.
pub const CONFIG_FILE_NAME: &str = "checkmake.toml";

const GLOBAL_TABLE: &str = "default";

/// Source of per-rule configuration for a validation pass.
pub trait ConfigProvider {
    /// Options for `rule`; empty when nothing is configured.
    fn rule_config(&self, rule: &str) -> RuleConfig;
}

impl ConfigProvider for CheckmakeConfig {
    fn rule_config(&self, rule: &str) -> RuleConfig {
        self.values.get(rule).cloned().unwrap_or_default()
    }
}

/// Get the global config file path (~/checkmake.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Load configuration from `path`, falling back to the global file.
///
/// Never fails: a missing file means defaults, and a file that cannot be read
/// or parsed is logged and replaced by defaults so linting still happens.
pub fn load_config(path: &Path) -> CheckmakeConfig {
    let candidate = if path.exists() {
        Some(path.to_path_buf())
    } else {
        debug!(
            "Config file {} not found, trying home directory",
            path.display()
        );
        global_config_path().filter(|global| global.exists())
    };

    let Some(candidate) = candidate else {
        debug!("No config file found, using defaults");
        return CheckmakeConfig::default();
    };

    match read_config(&candidate) {
        Ok(config) => {
            debug!("Loaded config from {}", candidate.display());
            config
        }
        Err(e) => {
            info!("Unable to load config file {}: {}", candidate.display(), e);
            CheckmakeConfig::default()
        }
    }
}

/// Read and parse one configuration file.
pub fn read_config(path: &Path) -> Result<CheckmakeConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<CheckmakeConfig, ConfigError> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| ConfigError::ParsingFailed(e.to_string()))?;

    let mut config = CheckmakeConfig::default();
    for (name, value) in table {
        let Some(section) = value.as_table() else {
            debug!("Ignoring top-level config key '{}' outside a table", name);
            continue;
        };
        let options = section_options(&name, section);

        if name == GLOBAL_TABLE {
            config.global = GlobalSettings {
                output: options.get("output").map(String::from),
                format: options.get("format").map(String::from),
            };
        } else {
            config.values.insert(name, options);
        }
    }

    Ok(config)
}

fn section_options(section_name: &str, section: &toml::Table) -> RuleConfig {
    let mut options = RuleConfig::new();
    for (key, value) in section {
        match flatten_value(value) {
            Some(flat) => options.insert(key.as_str(), flat),
            None => debug!("Ignoring nested table '{}.{}'", section_name, key),
        }
    }
    options
}

fn flatten_value(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(flatten_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        toml::Value::Table(_) => None,
    }
}
