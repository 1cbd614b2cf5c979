//! Tests for submission records and metric sets
//!
//! Tests persisted-shape round trips and the metric-set invariants.

use proptest::prelude::*;
use seqbench_domain::{MetricSet, NewSubmission, Scope, SubmissionRecord, ValidationError};

// ============================================================================
// Record round trips
// ============================================================================

#[test]
fn test_record_round_trip_preserves_every_field() {
    let record = NewSubmission::new(
        Scope::new("expression/cell-type-classification-segerstolpe", "0", "carol").unwrap(),
        MetricSet::from_pairs(
            "f1_macro",
            [
                ("f1_macro", 0.61),
                ("f1_weighted", 0.72),
                ("accuracy", 0.75),
            ],
        )
        .unwrap(),
    )
    .with_name("logreg")
    .with_description("l2, C=1.0")
    .into_record("2024-06-01T08:30:00.000001Z".to_string());

    let json = serde_json::to_string_pretty(&record).unwrap();
    let back: SubmissionRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(back, record);
    assert_eq!(back.metrics.values().keys().collect::<Vec<_>>(), vec!["f1_macro", "f1_weighted", "accuracy"]);
}

#[test]
fn test_record_with_bad_metrics_is_rejected() {
    let result: Result<SubmissionRecord, _> = serde_json::from_str(
        r#"{
            "timestamp": "2024-01-02T03:04:05.000000Z",
            "user": "bob",
            "dataset": "RNA/translation-efficiency-muscle",
            "fold": "0",
            "metrics": {"primary_metric": "spearman", "pearson": 0.3},
            "name": "x",
            "description": "y"
        }"#,
    );
    assert!(result.is_err());
}

// ============================================================================
// Metric set invariants
// ============================================================================

#[test]
fn test_empty_primary_metric() {
    assert_eq!(
        MetricSet::from_pairs("", [("a", 1.0)]).unwrap_err(),
        ValidationError::EmptyPrimaryMetric
    );
}

proptest! {
    #[test]
    fn prop_primary_value_matches_input(value in -1.0e6f64..1.0e6, other in -1.0e6f64..1.0e6) {
        let metrics = MetricSet::from_pairs("score", [("other", other), ("score", value)]).unwrap();
        prop_assert_eq!(metrics.primary_value(), value);
        prop_assert_eq!(metrics.secondary().count(), 1);
    }

    #[test]
    fn prop_serialization_round_trip(values in proptest::collection::vec(-1.0e3f64..1.0e3, 1..6)) {
        let pairs: Vec<(String, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("m{}", i), *v))
            .collect();
        let metrics = MetricSet::from_pairs("m0", pairs).unwrap();
        let json = serde_json::to_string(&metrics).unwrap();
        let back: MetricSet = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, metrics);
    }
}
