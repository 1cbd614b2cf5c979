//! Rendering of reports for the terminal
//!
//! Every report type implements [`Formattable`] once per output format; the
//! command layer only picks the format.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

mod formatters;
mod reports;
mod table;

pub use formatters::{JsonFormatter, PlainFormatter};
pub use reports::{format_change, format_other_metrics, format_score, format_summary};
pub use table::TableFormatter;

/// How reports are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Box-drawn tables
    #[default]
    Table,
    /// Fixed-width text
    Plain,
}

impl OutputFormat {
    /// Name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Table => "table",
            Self::Plain => "plain",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            "plain" => Ok(Self::Plain),
            _ => Err(CliError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report that can be rendered in every [`OutputFormat`]
pub trait Formattable {
    fn format_json(&self) -> Result<String>;

    fn format_table(&self) -> Result<String>;

    fn format_plain(&self) -> Result<String>;

    /// Render in `format`
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Table => self.format_table(),
            OutputFormat::Plain => self.format_plain(),
        }
    }
}

/// Status line colors
pub mod colors {
    use colored::{ColoredString, Colorize};

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }
}
