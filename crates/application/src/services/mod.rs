//! Application Services
//!
//! Read-side orchestration over a [`SubmissionStore`]: ranking, per-user
//! history and tabular export.
//!
//! [`SubmissionStore`]: seqbench_infrastructure::SubmissionStore

mod export;
mod history;
mod leaderboard;

pub use export::*;
pub use history::*;
pub use leaderboard::*;

use seqbench_domain::{SubmissionRecord, ValidationError};

/// The primary metric shared by `records`, taken from the first one.
///
/// Returns `None` for an empty slice and fails if any record ranks by a
/// different metric.
pub fn common_primary_metric(records: &[SubmissionRecord]) -> Result<Option<String>, ValidationError> {
    let Some(first) = records.first() else {
        return Ok(None);
    };
    let expected = first.primary_metric();

    if let Some(odd) = records.iter().find(|r| r.primary_metric() != expected) {
        return Err(ValidationError::InconsistentPrimaryMetric {
            expected: expected.to_string(),
            found: odd.primary_metric().to_string(),
            timestamp: odd.timestamp.clone(),
        });
    }

    Ok(Some(expected.to_string()))
}
