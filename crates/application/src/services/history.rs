//! History Service
//!
//! A user's submissions to one `dataset/fold` in chronological order, with
//! the change in primary score between consecutive submissions.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use seqbench_domain::{LedgerResult, SubmissionRecord, ValidationError};
use seqbench_infrastructure::SubmissionStore;

use super::common_primary_metric;

/// One submission in a history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// 1-based position in chronological order
    pub index: usize,
    pub score: f64,
    /// Difference to the previous entry's score; `None` for the first
    pub change: Option<f64>,
    #[serde(flatten)]
    pub record: SubmissionRecord,
}

impl HistoryEntry {
    /// Whether this submission moved the score at all
    pub fn has_change(&self) -> bool {
        matches!(self.change, Some(c) if c != 0.0)
    }
}

/// Aggregate view of a non-empty history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub submissions: usize,
    pub first_score: f64,
    pub best_score: f64,
    pub latest_score: f64,
    /// `latest_score - first_score`
    pub total_improvement: f64,
}

/// A user's submissions with progress information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryReport {
    pub dataset: String,
    pub fold: String,
    pub user: String,
    pub primary_metric: Option<String>,
    pub entries: Vec<HistoryEntry>,
    /// `None` when the user has not submitted
    pub summary: Option<HistorySummary>,
}

impl HistoryReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// History service
pub struct HistoryService<S: SubmissionStore> {
    store: Arc<S>,
}

impl<S: SubmissionStore> HistoryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The user's submissions, oldest first
    #[instrument(skip(self))]
    pub fn get_history(&self, dataset: &str, fold: &str, user: &str) -> LedgerResult<Vec<SubmissionRecord>> {
        self.store.load(dataset, fold, Some(user))
    }

    /// The user's submissions with per-entry changes and a summary
    #[instrument(skip(self))]
    pub fn report(&self, dataset: &str, fold: &str, user: &str) -> LedgerResult<HistoryReport> {
        let records = self.get_history(dataset, fold, user)?;
        debug!(submissions = records.len(), "Building history report");
        Ok(build_history(dataset, fold, user, records)?)
    }
}

/// Turn chronologically ordered `records` into a report
pub fn build_history(
    dataset: &str,
    fold: &str,
    user: &str,
    records: Vec<SubmissionRecord>,
) -> Result<HistoryReport, ValidationError> {
    let primary_metric = common_primary_metric(&records)?;

    let mut previous: Option<f64> = None;
    let entries: Vec<HistoryEntry> = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let score = record.score();
            let change = previous.map(|p| score - p);
            previous = Some(score);
            HistoryEntry {
                index: i + 1,
                score,
                change,
                record,
            }
        })
        .collect();

    let summary = summarize(&entries);

    Ok(HistoryReport {
        dataset: dataset.to_string(),
        fold: fold.to_string(),
        user: user.to_string(),
        primary_metric,
        entries,
        summary,
    })
}

fn summarize(entries: &[HistoryEntry]) -> Option<HistorySummary> {
    let first = entries.first()?.score;
    let latest = entries.last()?.score;
    let best = entries.iter().map(|e| e.score).fold(f64::NEG_INFINITY, f64::max);

    Some(HistorySummary {
        submissions: entries.len(),
        first_score: first,
        best_score: best,
        latest_score: latest,
        total_improvement: latest - first,
    })
}
