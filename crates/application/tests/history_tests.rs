//! Tests for per-user submission history

use std::sync::Arc;

use proptest::prelude::*;
use seqbench_application::HistoryService;
use seqbench_domain::{LedgerError, ValidationError};
use seqbench_infrastructure::SubmissionStore;
use seqbench_testing::{
    alice_history, create_user_history, temp_file_store, two_user_board, InMemorySubmissionStore,
    SubmissionRecordBuilder, TEST_DATASET, TEST_FOLD,
};

#[test]
fn test_history_is_chronological_and_per_user() {
    // Arrange
    let (_dir, store) = temp_file_store();
    let mut records = two_user_board();
    records.reverse();
    for record in &records {
        store.insert(record).unwrap();
    }
    let service = HistoryService::new(Arc::new(store));

    // Act
    let history = service.get_history(TEST_DATASET, TEST_FOLD, "alice").unwrap();

    // Assert
    let names: Vec<&str> = history.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["alice-v1", "alice-v2", "alice-v3"]);
}

#[test]
fn test_report_changes_and_summary() {
    // Arrange
    let service = HistoryService::new(Arc::new(InMemorySubmissionStore::with_records(alice_history())));

    // Act
    let report = service.report(TEST_DATASET, TEST_FOLD, "alice").unwrap();

    // Assert
    assert_eq!(report.len(), 3);
    assert_eq!(report.primary_metric.as_deref(), Some("spearman"));
    assert_eq!(report.entries[0].change, None);
    assert!((report.entries[1].change.unwrap() - 0.30).abs() < 1e-12);
    assert!((report.entries[2].change.unwrap() + 0.15).abs() < 1e-12);

    let summary = report.summary.unwrap();
    assert_eq!(summary.submissions, 3);
    assert_eq!(summary.first_score, 0.10);
    assert_eq!(summary.best_score, 0.40);
    assert_eq!(summary.latest_score, 0.25);
    assert!((summary.total_improvement - 0.15).abs() < 1e-12);
}

#[test]
fn test_unknown_user_has_empty_report() {
    // Arrange
    let service = HistoryService::new(Arc::new(InMemorySubmissionStore::with_records(alice_history())));

    // Act
    let report = service.report(TEST_DATASET, TEST_FOLD, "mallory").unwrap();

    // Assert
    assert!(report.is_empty());
    assert_eq!(report.summary, None);
    assert_eq!(report.user, "mallory");
}

#[test]
fn test_mixed_primary_metric_rejected() {
    // Arrange
    let mut records = alice_history();
    records.push(
        SubmissionRecordBuilder::new()
            .with_user("alice")
            .with_primary_metric("mse")
            .at(5)
            .build(),
    );
    let service = HistoryService::new(Arc::new(InMemorySubmissionStore::with_records(records)));

    // Act
    let result = service.report(TEST_DATASET, TEST_FOLD, "alice");

    // Assert
    assert!(matches!(
        result,
        Err(LedgerError::Validation(ValidationError::InconsistentPrimaryMetric { .. }))
    ));
}

#[test]
fn test_report_serializes_flat_records() {
    let service = HistoryService::new(Arc::new(InMemorySubmissionStore::with_records(alice_history())));
    let report = service.report(TEST_DATASET, TEST_FOLD, "alice").unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["entries"][0]["index"], 1);
    assert!(json["entries"][0]["change"].is_null());
    assert_eq!(json["entries"][1]["name"], "alice-v2");
    assert_eq!(json["summary"]["best_score"], 0.40);
}

proptest! {
    #[test]
    fn prop_change_is_score_difference(scores in prop::collection::vec(-1.0f64..1.0, 1..20)) {
        let store = InMemorySubmissionStore::with_records(create_user_history("alice", &scores, 0));
        let report = HistoryService::new(Arc::new(store))
            .report(TEST_DATASET, TEST_FOLD, "alice")
            .unwrap();

        prop_assert_eq!(report.entries.len(), scores.len());
        prop_assert_eq!(report.entries[0].change, None);
        for i in 1..scores.len() {
            prop_assert_eq!(report.entries[i].change, Some(scores[i] - scores[i - 1]));
        }
    }
}
