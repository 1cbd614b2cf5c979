//! CLI commands

pub mod config;
pub mod datasets;
pub mod evaluate;
pub mod export;
pub mod history;
pub mod leaderboard;
pub mod submit;

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use seqbench_application::DatasetRegistry;
use seqbench_common::config::AppConfig;
use seqbench_infrastructure::FileSubmissionStore;

use crate::config::Settings;
use crate::output::{Formattable, OutputFormat};

/// Context passed to all commands
pub struct CommandContext {
    pub config: AppConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(settings: Settings) -> Self {
        debug!(
            root = %settings.config.storage.root.display(),
            data_dir = %settings.config.datasets.data_dir.display(),
            format = %settings.format,
            "Resolved settings"
        );
        Self {
            config: settings.config,
            format: settings.format,
        }
    }

    /// The submission store rooted at the configured directory
    pub fn store(&self) -> Arc<FileSubmissionStore> {
        Arc::new(FileSubmissionStore::from(&self.config.storage))
    }

    /// The builtin datasets reading from the configured data directory
    pub fn registry(&self) -> DatasetRegistry {
        DatasetRegistry::builtin(&self.config.datasets.data_dir)
    }

    /// Render `value` in the selected output format
    pub fn render<T: Formattable + ?Sized>(&self, value: &T) -> Result<String> {
        value.format(self.format)
    }

    /// Print `value` in the selected output format
    pub fn emit<T: Formattable + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }
}
