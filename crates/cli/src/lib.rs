//! Seqbench CLI Library
//!
//! This library provides the core functionality of the `seqbench`
//! command-line interface: configuration resolution, the command
//! implementations and output formatting.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use config::{Overrides, Settings};
pub use error::{exit_code, CliError};
pub use output::{Formattable, JsonFormatter, OutputFormat, PlainFormatter, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
