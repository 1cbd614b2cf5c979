//! Leaderboard Service
//!
//! Ranks users of one `dataset/fold` by their best submission.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use seqbench_common::config::TieBreak;
use seqbench_domain::{LedgerResult, SubmissionRecord, ValidationError};
use seqbench_infrastructure::SubmissionStore;

use super::common_primary_metric;

/// One ranked user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    /// The user's best primary-metric value
    pub score: f64,
    /// The submission that achieved `score`
    #[serde(flatten)]
    pub record: SubmissionRecord,
}

/// Users of a `dataset/fold` ranked by their best submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub dataset: String,
    pub fold: String,
    /// `None` when nothing has been submitted
    pub primary_metric: Option<String>,
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The entry of `user`, if they have submitted
    pub fn entry_for(&self, user: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.record.user == user)
    }

    /// Users in rank order
    pub fn users(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.record.user.as_str()).collect()
    }
}

/// Leaderboard service
pub struct LeaderboardService<S: SubmissionStore> {
    store: Arc<S>,
    tie_break: TieBreak,
}

impl<S: SubmissionStore> LeaderboardService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            tie_break: TieBreak::default(),
        }
    }

    /// Choose which of a user's equally scored submissions represents them
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Rank the users of `dataset/fold`. Reading never changes the store.
    #[instrument(skip(self), fields(tie_break = %self.tie_break))]
    pub fn get_leaderboard(&self, dataset: &str, fold: &str) -> LedgerResult<Leaderboard> {
        let records = self.store.load(dataset, fold, None)?;
        debug!(submissions = records.len(), "Building leaderboard");
        Ok(build_leaderboard(dataset, fold, records, self.tie_break)?)
    }
}

/// Rank `records` (all from one `dataset/fold`) keeping each user's best
pub fn build_leaderboard(
    dataset: &str,
    fold: &str,
    records: Vec<SubmissionRecord>,
    tie_break: TieBreak,
) -> Result<Leaderboard, ValidationError> {
    let primary_metric = common_primary_metric(&records)?;

    let mut best: HashMap<String, SubmissionRecord> = HashMap::new();
    for record in records {
        match best.get(&record.user) {
            Some(current) if !replaces(&record, current, tie_break) => {}
            _ => {
                best.insert(record.user.clone(), record);
            }
        }
    }

    let mut winners: Vec<SubmissionRecord> = best.into_values().collect();
    winners.sort_by(rank_order);

    let entries = winners
        .into_iter()
        .enumerate()
        .map(|(i, record)| LeaderboardEntry {
            rank: i + 1,
            score: record.score(),
            record,
        })
        .collect();

    Ok(Leaderboard {
        dataset: dataset.to_string(),
        fold: fold.to_string(),
        primary_metric,
        entries,
    })
}

/// Whether `candidate` should represent its user instead of `current`
fn replaces(candidate: &SubmissionRecord, current: &SubmissionRecord, tie_break: TieBreak) -> bool {
    match candidate.score().total_cmp(&current.score()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match tie_break {
            TieBreak::Earliest => candidate.timestamp < current.timestamp,
            TieBreak::Latest => candidate.timestamp >= current.timestamp,
        },
    }
}

/// Score descending, then user, then timestamp
fn rank_order(a: &SubmissionRecord, b: &SubmissionRecord) -> Ordering {
    b.score()
        .total_cmp(&a.score())
        .then_with(|| a.user.cmp(&b.user))
        .then_with(|| a.timestamp.cmp(&b.timestamp))
}
