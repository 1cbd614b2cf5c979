//! Error types for the seqbench domain.
//!
//! This module defines the error hierarchy shared by every layer, with
//! machine-readable error codes and the process exit code the CLI reports for
//! each class of failure.

use std::path::PathBuf;

/// Exit code for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when there is nothing to show or export.
pub const EXIT_NO_DATA: i32 = 1;
/// Exit code for bad arguments and validation failures.
pub const EXIT_BAD_INPUT: i32 = 2;
/// Exit code for I/O and every other failure.
pub const EXIT_FAILURE: i32 = 3;

/// Top-level ledger error type
///
/// This enum encompasses every error the ledger can produce, giving the CLI a
/// single type to map onto exit codes.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Validation-related errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Submission store errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Dataset collaborator errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

impl LedgerError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Store(StoreError::RootNotFound(_)) => "NOT_FOUND",
            Self::Store(_) => "STORAGE_ERROR",
            Self::Export(ExportError::NoSubmissions) => "NOT_FOUND",
            Self::Export(_) => "EXPORT_ERROR",
            Self::Dataset(_) => "DATASET_ERROR",
        }
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => EXIT_BAD_INPUT,
            Self::Dataset(DatasetError::UnsupportedFold { .. })
            | Self::Dataset(DatasetError::LengthMismatch { .. })
            | Self::Dataset(DatasetError::InvalidLabel { .. })
            | Self::Dataset(DatasetError::EmptyInput) => EXIT_BAD_INPUT,
            Self::Store(StoreError::RootNotFound(_)) => EXIT_NO_DATA,
            Self::Export(ExportError::NoSubmissions) => EXIT_NO_DATA,
            _ => EXIT_FAILURE,
        }
    }

    /// Check if this error means "nothing recorded yet"
    pub fn is_no_data(&self) -> bool {
        self.exit_code() == EXIT_NO_DATA
    }
}

/// Validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A scope segment (dataset, fold or user) is not usable as a path component
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidSegment {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The primary metric name is empty
    #[error("Primary metric name cannot be empty")]
    EmptyPrimaryMetric,

    /// The primary metric is not among the metric values
    #[error("Primary metric '{0}' has no value in the metric set")]
    MissingPrimaryMetric(String),

    /// A metric name collides with the reserved `primary_metric` key
    #[error("Metric name '{0}' is reserved")]
    ReservedMetricName(String),

    /// A metric value is NaN or infinite
    #[error("Metric '{name}' must be a finite number, got {value}")]
    NonFiniteMetric { name: String, value: f64 },

    /// Records of one scope disagree on the primary metric
    #[error("Submission at {timestamp} ranks by '{found}' but the scope ranks by '{expected}'")]
    InconsistentPrimaryMetric {
        expected: String,
        found: String,
        timestamp: String,
    },

    /// evaluate/submit was called before setup
    #[error("Must call setup() before {0}()")]
    TaskNotSetUp(&'static str),

    /// No dataset is registered under this id
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
}

/// Submission store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted entry could not be parsed
    #[error("Malformed submission {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// The storage root does not exist
    #[error("Submissions directory not found: {0}")]
    RootNotFound(PathBuf),

    /// No unique entry name could be allocated
    #[error("Could not allocate a unique submission entry in {0}")]
    Collision(PathBuf),
}

impl StoreError {
    /// Wrap an I/O error with the path it happened at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Nothing has been submitted yet
    #[error("No submissions found to export")]
    NoSubmissions,

    /// Writing the tabular file failed
    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Dataset collaborator errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    /// The dataset has no split with this fold id
    #[error("{dataset} does not support fold '{fold}' (supported: {})", .supported.join(", "))]
    UnsupportedFold {
        dataset: String,
        fold: String,
        supported: Vec<String>,
    },

    /// Predictions and targets differ in length
    #[error("Predictions and targets must have the same length. Got {predictions} and {targets}")]
    LengthMismatch { predictions: usize, targets: usize },

    /// The dataset file is missing or unreadable
    #[error("Dataset data unavailable at {path}: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    /// A label could not be interpreted
    #[error("Invalid label '{value}' at row {row}")]
    InvalidLabel { row: usize, value: String },

    /// Nothing to evaluate
    #[error("Cannot evaluate an empty set of predictions")]
    EmptyInput,
}

/// Ledger-wide result type
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = LedgerError::Validation(ValidationError::EmptyPrimaryMetric);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.exit_code(), EXIT_BAD_INPUT);

        let err = LedgerError::Export(ExportError::NoSubmissions);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.is_no_data());
    }

    #[test]
    fn test_io_errors_are_failures() {
        let err: LedgerError = StoreError::io(
            "/tmp/x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        )
        .into();
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert!(err.to_string().contains("/tmp/x"));
    }

    #[test]
    fn test_unsupported_fold_message() {
        let err = DatasetError::UnsupportedFold {
            dataset: "expression/cell-type-classification-segerstolpe".to_string(),
            fold: "3".to_string(),
            supported: vec!["0".to_string()],
        };
        assert!(err.to_string().contains("supported: 0"));
        assert_eq!(LedgerError::from(err).exit_code(), EXIT_BAD_INPUT);
    }
}
