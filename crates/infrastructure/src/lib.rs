//! Infrastructure layer for seqbench
//!
//! This crate provides the persistence side of the submission ledger:
//! - The `SubmissionStore` trait the application services are written against
//! - `FileSubmissionStore`, the filesystem-backed implementation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use seqbench_domain::{MetricSet, NewSubmission, Scope};
//! use seqbench_infrastructure::{FileSubmissionStore, SubmissionStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSubmissionStore::new("submissions");
//!
//! let scope = Scope::new("RNA/translation-efficiency-muscle", "0", "alice")?;
//! let metrics = MetricSet::from_pairs("spearman", [("spearman", 0.41)])?;
//! let location = store.save(NewSubmission::new(scope, metrics))?;
//! println!("Saved to {}", location.path.display());
//!
//! let history = store.load("RNA/translation-efficiency-muscle", "0", Some("alice"))?;
//! # Ok(())
//! # }
//! ```

pub mod storage;

// Re-export commonly used types
pub use storage::{FileSubmissionStore, SubmissionLocation, SubmissionStore};

use seqbench_common::config::StorageConfig;

impl From<&StorageConfig> for FileSubmissionStore {
    fn from(config: &StorageConfig) -> Self {
        FileSubmissionStore::new(config.root.clone()).with_strict_load(config.strict_load)
    }
}
