//! Test fixtures for generating submission records with realistic data.
//!
//! Timestamps produced here are one minute apart and strictly increasing, so
//! fixtures can be inserted in any order and still load in a known order.

use chrono::{Duration, TimeZone, Utc};
use fake::{faker::internet::en::Username, Fake};
use seqbench_common::datetime::submission_timestamp;
use seqbench_domain::SubmissionRecord;
use seqbench_infrastructure::FileSubmissionStore;
use tempfile::TempDir;

use crate::builders::SubmissionRecordBuilder;

/// Dataset used by fixtures unless overridden
pub const TEST_DATASET: &str = "RNA/translation-efficiency-muscle";

/// Fold used by fixtures unless overridden
pub const TEST_FOLD: &str = "0";

/// The `n`-th fixture timestamp
pub fn timestamp_at(n: u32) -> String {
    let base = Utc
        .with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
        .single()
        .expect("valid base timestamp");
    submission_timestamp(&(base + Duration::minutes(i64::from(n))))
}

/// A random user name that is a valid scope segment
pub fn random_user() -> String {
    let raw: String = Username().fake();
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    format!("user_{}", cleaned)
}

/// A user's submissions with the given primary scores, in time order
pub fn create_user_history(user: &str, scores: &[f64], first_tick: u32) -> Vec<SubmissionRecord> {
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            SubmissionRecordBuilder::new()
                .with_user(user)
                .at(first_tick + i as u32)
                .with_score(*score)
                .with_metric("mse", 1.0 - score)
                .with_name(format!("{}-v{}", user, i + 1))
                .build()
        })
        .collect()
}

/// alice scores 0.10, 0.40, 0.25 on spearman
pub fn alice_history() -> Vec<SubmissionRecord> {
    create_user_history("alice", &[0.10, 0.40, 0.25], 0)
}

/// alice's history plus bob scoring 0.30 then 0.55
pub fn two_user_board() -> Vec<SubmissionRecord> {
    let mut records = alice_history();
    records.extend(create_user_history("bob", &[0.30, 0.55], 10));
    records
}

/// A filesystem store in a fresh temporary directory
///
/// Keep the returned `TempDir` alive for as long as the store is used.
pub fn temp_file_store() -> (TempDir, FileSubmissionStore) {
    let dir = TempDir::new().expect("create temp dir");
    let store = FileSubmissionStore::new(dir.path().join("submissions"));
    (dir, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqbench_domain::Scope;

    #[test]
    fn test_timestamps_increase() {
        assert!(timestamp_at(0) < timestamp_at(1));
        assert!(timestamp_at(9) < timestamp_at(10));
        assert_eq!(timestamp_at(0), "2024-05-01T10:00:00.000000Z");
    }

    #[test]
    fn test_random_user_is_valid_segment() {
        for _ in 0..50 {
            let user = random_user();
            assert!(Scope::new(TEST_DATASET, TEST_FOLD, user.as_str()).is_ok(), "{}", user);
        }
    }

    #[test]
    fn test_alice_history() {
        let scores: Vec<f64> = alice_history().iter().map(|r| r.score()).collect();
        assert_eq!(scores, vec![0.10, 0.40, 0.25]);
    }
}
