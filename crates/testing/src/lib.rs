//! Testing utilities for seqbench
//!
//! This crate provides testing utilities including:
//! - Test fixtures for submission records
//! - Builder patterns for records and metric sets
//! - An in-memory mock of the submission store
//!
//! # Examples
//!
//! ```
//! use seqbench_testing::{fixtures::*, builders::*, mocks::*};
//! use seqbench_infrastructure::SubmissionStore;
//!
//! let store = InMemorySubmissionStore::with_records(alice_history());
//!
//! let record = SubmissionRecordBuilder::new()
//!     .with_user("bob")
//!     .with_score(0.55)
//!     .build();
//! store.insert(&record).unwrap();
//! assert_eq!(store.load(TEST_DATASET, TEST_FOLD, None).unwrap().len(), 4);
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
pub use tempfile;
