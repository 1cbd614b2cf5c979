//! Application layer for seqbench
//!
//! This crate orchestrates the submission ledger's use cases on top of the
//! domain types and a [`SubmissionStore`](seqbench_infrastructure::SubmissionStore).
//!
//! ## Modules
//!
//! - `services` - Leaderboard, history and export services
//! - `datasets` - Builtin dataset tasks and their registry
//! - `scoring` - Regression and classification evaluators
//! - `task` - The setup/evaluate/submit workflow of one dataset fold
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use seqbench_application::LeaderboardService;
//! use seqbench_infrastructure::FileSubmissionStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(FileSubmissionStore::new("submissions"));
//! let board = LeaderboardService::new(store).get_leaderboard("RNA/translation-efficiency-muscle", "0")?;
//! for entry in &board.entries {
//!     println!("{} {} {:.6}", entry.rank, entry.record.user, entry.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod datasets;
pub mod scoring;
pub mod services;
pub mod task;

// Re-export commonly used types
pub use datasets::{DataSplit, DatasetDescription, DatasetRegistry, DatasetTask, LabeledFrame};
pub use scoring::{ClassificationEvaluator, Evaluator, RegressionEvaluator};
pub use services::{
    ExportService, ExportTable, HistoryEntry, HistoryReport, HistoryService, HistorySummary,
    Leaderboard, LeaderboardEntry, LeaderboardService, DEFAULT_EXPORT_FILE,
};
pub use task::{BenchmarkTask, SubmitOutcome};
