//! CLI configuration resolution
//!
//! The layered `AppConfig` is loaded from an explicit `--config` file or, if
//! none is given, from `~/.config/seqbench/config.toml` when that exists.
//! Command-line flags are applied on top.

use std::path::{Path, PathBuf};

use seqbench_common::config::AppConfig;

use crate::error::CliError;
use crate::output::OutputFormat;

/// Name of the per-user configuration file
pub const USER_CONFIG_FILE: &str = "config.toml";

/// Values given on the command line that override configuration
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub no_color: bool,
    pub verbose: bool,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: AppConfig,
    pub format: OutputFormat,
    pub colored: bool,
    pub verbose: bool,
}

impl Settings {
    /// Load configuration and apply command-line overrides
    pub fn resolve(explicit: Option<&Path>, overrides: Overrides) -> Result<Self, CliError> {
        let file = explicit.map(Path::to_path_buf).or_else(user_config_file);
        let config =
            AppConfig::load(file.as_deref()).map_err(|e| CliError::Config(format!("{:#}", e)))?;
        Self::from_config(config, overrides)
    }

    /// Apply command-line overrides to an already loaded configuration
    pub fn from_config(mut config: AppConfig, overrides: Overrides) -> Result<Self, CliError> {
        if let Some(root) = overrides.root {
            config.storage.root = root;
        }
        if let Some(data_dir) = overrides.data_dir {
            config.datasets.data_dir = data_dir;
        }
        config
            .validate()
            .map_err(|e| CliError::Config(format!("{:#}", e)))?;

        let format = match overrides.format {
            Some(format) => format,
            None => config.output.format.parse()?,
        };
        config.output.format = format.to_string();

        Ok(Self {
            colored: config.output.colored && !overrides.no_color,
            format,
            verbose: overrides.verbose,
            config,
        })
    }

    /// Log level to initialize tracing with
    pub fn log_level(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.config.telemetry.log_level
        }
    }
}

/// `~/.config/seqbench/config.toml`, if present
pub fn user_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("seqbench").join(USER_CONFIG_FILE);
    path.is_file().then_some(path)
}
