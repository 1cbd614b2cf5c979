//! Configuration management for the application.
//!
//! Settings are layered with the `config` crate. Later sources override
//! earlier ones:
//!
//! 1. Built-in defaults
//! 2. `seqbench.toml` in the working directory (if it exists)
//! 3. An explicit configuration file (must exist when given)
//! 4. Environment variables prefixed with `SEQBENCH`
//!
//! ## Example Configuration
//!
//! ```toml
//! [storage]
//! root = "/data/seqbench/submissions"
//! strict_load = true
//!
//! [datasets]
//! data_dir = "/data/seqbench/datasets"
//!
//! [leaderboard]
//! tie_break = "latest"
//!
//! [telemetry]
//! log_level = "info"
//! json_logging = false
//!
//! [output]
//! format = "json"
//! colored = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Base name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "seqbench";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "SEQBENCH";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub datasets: DatasetsConfig,
    pub leaderboard: LeaderboardConfig,
    pub telemetry: TelemetryConfig,
    pub output: OutputConfig,
}

/// Submission storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory that holds `<dataset>/<fold>/<user>/` submission folders
    pub root: PathBuf,

    /// Fail on unreadable submission files instead of skipping them
    pub strict_load: bool,
}

/// Local dataset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetsConfig {
    /// Directory that holds `<dataset>/data.csv` files
    pub data_dir: PathBuf,
}

/// Leaderboard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Which submission wins when a user has several with the same best score
    pub tie_break: TieBreak,
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Enable JSON logging format
    pub json_logging: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (table, json, plain)
    pub format: String,

    /// Colorize terminal output
    pub colored: bool,
}

/// Tie-break between submissions of one user with equal best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// The first submission to reach the score keeps the spot
    #[default]
    Earliest,
    /// The most recent submission with the score replaces older ones
    Latest,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Earliest => write!(f, "earliest"),
            TieBreak::Latest => write!(f, "latest"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("submissions"),
            strict_load: false,
        }
    }
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logging: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "table".to_string(),
            colored: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment variables.
    ///
    /// `explicit` names a file that must exist; the working-directory file is
    /// optional. Environment variables use `__` between sections, e.g.
    /// `SEQBENCH__STORAGE__ROOT=/tmp/subs`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use seqbench_common::config::AppConfig;
    ///
    /// let config = AppConfig::load(None).expect("Failed to load configuration");
    /// println!("Submissions live in {}", config.storage.root.display());
    /// ```
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            // Example: SEQBENCH__LEADERBOARD__TIE_BREAK=latest
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.root.as_os_str().is_empty() {
            anyhow::bail!("Storage root is required");
        }

        if self.datasets.data_dir.as_os_str().is_empty() {
            anyhow::bail!("Dataset directory is required");
        }

        if !LOG_LEVELS.contains(&self.telemetry.log_level.to_lowercase().as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
