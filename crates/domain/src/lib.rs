//! Seqbench Domain Types
//!
//! This crate provides the core domain model for the seqbench submission ledger.
//! It defines the persisted submission record, the structured metric set every
//! record carries, the `dataset/fold/user` scope records are grouped under, and
//! the error taxonomy shared by the other crates.
//!
//! ## Architecture
//!
//! The domain layer is organized into the following modules:
//!
//! - **identifiers**: Timestamp-derived submission identifiers
//! - **scope**: Validated `dataset/fold/user` scopes
//! - **metrics**: `MetricSet`, the primary-metric-aware result of an evaluation
//! - **submission**: The write-once `SubmissionRecord` and its draft form
//! - **errors**: Error types with error codes and process exit codes
//!
//! ## Usage
//!
//! ```rust
//! use seqbench_domain::{MetricSet, NewSubmission, Scope};
//!
//! let scope = Scope::new("RNA/translation-efficiency-muscle", "0", "alice").unwrap();
//! let metrics = MetricSet::from_pairs("spearman", [("spearman", 0.41), ("mse", 0.2)]).unwrap();
//!
//! let draft = NewSubmission::new(scope, metrics).with_name("mean-baseline");
//! let record = draft.into_record("2024-05-01T10:00:00.000000Z".to_string());
//! assert_eq!(record.score(), 0.41);
//! assert_eq!(record.description, "No description provided");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core domain modules
pub mod errors;
pub mod identifiers;
pub mod metrics;
pub mod scope;
pub mod submission;

// Re-export commonly used types
pub use errors::{
    DatasetError, ExportError, LedgerError, LedgerResult, StoreError, ValidationError,
};
pub use identifiers::SubmissionId;
pub use metrics::{MetricSet, PRIMARY_METRIC_KEY};
pub use scope::Scope;
pub use submission::{
    NewSubmission, SubmissionRecord, DEFAULT_SUBMISSION_DESCRIPTION, DEFAULT_SUBMISSION_NAME,
};
