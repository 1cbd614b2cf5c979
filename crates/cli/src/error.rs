//! CLI error classification and process exit codes

use seqbench_domain::errors::{EXIT_BAD_INPUT, EXIT_FAILURE, EXIT_NO_DATA};
use seqbench_domain::LedgerError;

/// Failures that originate in the CLI itself
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A query ran fine but found nothing
    #[error("{0}")]
    NothingToShow(String),

    /// Configuration could not be loaded or is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// `output.format` names no known format
    #[error("Unknown output format '{0}' (expected table, json or plain)")]
    UnknownFormat(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NothingToShow(_) => EXIT_NO_DATA,
            Self::Config(_) | Self::UnknownFormat(_) => EXIT_BAD_INPUT,
        }
    }
}

/// Exit code for an error returned by a command
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<LedgerError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<CliError>() {
            return e.exit_code();
        }
    }
    EXIT_FAILURE
}

/// Whether the error only means there was nothing to report
pub fn is_no_data(err: &anyhow::Error) -> bool {
    exit_code(err) == EXIT_NO_DATA
}
