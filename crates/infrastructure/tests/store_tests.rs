//! Integration tests for the filesystem submission store

use std::collections::HashSet;
use std::fs;

use proptest::prelude::*;
use seqbench_domain::{
    LedgerError, MetricSet, NewSubmission, Scope, StoreError, DEFAULT_SUBMISSION_DESCRIPTION,
    DEFAULT_SUBMISSION_NAME,
};
use seqbench_infrastructure::{FileSubmissionStore, SubmissionStore};
use seqbench_testing::{
    alice_history, create_user_history, random_user, temp_file_store, timestamp_at, two_user_board,
    SubmissionRecordBuilder, TEST_DATASET, TEST_FOLD,
};

#[test]
fn test_save_then_load_round_trip() {
    let (_dir, store) = temp_file_store();

    let scope = Scope::new(TEST_DATASET, TEST_FOLD, "alice").unwrap();
    let metrics =
        MetricSet::from_pairs("spearman", [("spearman", 0.41), ("pearson", 0.39), ("mse", 0.2)])
            .unwrap();
    let draft = NewSubmission::new(scope, metrics.clone())
        .with_name("cnn")
        .with_description("two conv layers");

    store.save(draft).unwrap();

    let loaded = store.load(TEST_DATASET, TEST_FOLD, Some("alice")).unwrap();
    assert_eq!(loaded.len(), 1);
    let record = &loaded[0];
    assert_eq!(record.user, "alice");
    assert_eq!(record.dataset, TEST_DATASET);
    assert_eq!(record.fold, TEST_FOLD);
    assert_eq!(record.metrics, metrics);
    assert_eq!(record.name, "cnn");
    assert_eq!(record.description, "two conv layers");
    assert!(record.timestamp.ends_with('Z'));
}

#[test]
fn test_save_applies_defaults() {
    let (_dir, store) = temp_file_store();

    let scope = Scope::new(TEST_DATASET, TEST_FOLD, "alice").unwrap();
    let metrics = MetricSet::from_pairs("spearman", [("spearman", 0.1)]).unwrap();
    store.save(NewSubmission::new(scope, metrics)).unwrap();

    let record = store
        .load(TEST_DATASET, TEST_FOLD, Some("alice"))
        .unwrap()
        .remove(0);
    assert_eq!(record.name, DEFAULT_SUBMISSION_NAME);
    assert_eq!(record.description, DEFAULT_SUBMISSION_DESCRIPTION);
}

#[test]
fn test_user_names_with_spaces_and_accents() {
    let (_dir, store) = temp_file_store();

    for user in ["Caleb Ellington", "josé"] {
        let scope = Scope::new(TEST_DATASET, TEST_FOLD, user).unwrap();
        let metrics = MetricSet::from_pairs("spearman", [("spearman", 0.3)]).unwrap();
        store.save(NewSubmission::new(scope, metrics)).unwrap();
    }

    let caleb = store.load(TEST_DATASET, TEST_FOLD, Some("Caleb Ellington")).unwrap();
    assert_eq!(caleb.len(), 1);
    assert_eq!(caleb[0].user, "Caleb Ellington");
    assert_eq!(store.load(TEST_DATASET, TEST_FOLD, None).unwrap().len(), 2);
}

#[test]
fn test_insert_then_load_is_equal() {
    let (_dir, store) = temp_file_store();
    let records = alice_history();
    for record in &records {
        store.insert(record).unwrap();
    }

    assert_eq!(store.load(TEST_DATASET, TEST_FOLD, Some("alice")).unwrap(), records);
}

#[test]
fn test_missing_scope_is_empty() {
    let (_dir, store) = temp_file_store();
    assert!(store.load(TEST_DATASET, TEST_FOLD, None).unwrap().is_empty());
    assert!(store
        .load(TEST_DATASET, TEST_FOLD, Some("nobody"))
        .unwrap()
        .is_empty());
}

#[test]
fn test_load_all_users_sorted_by_timestamp() {
    let (_dir, store) = temp_file_store();
    // bob's records are older than alice's but his directory sorts later
    for record in create_user_history("bob", &[0.3, 0.5], 0) {
        store.insert(&record).unwrap();
    }
    for record in create_user_history("alice", &[0.2], 5) {
        store.insert(&record).unwrap();
    }

    let users: Vec<String> = store
        .load(TEST_DATASET, TEST_FOLD, None)
        .unwrap()
        .into_iter()
        .map(|r| r.user)
        .collect();
    assert_eq!(users, vec!["bob", "bob", "alice"]);
}

#[test]
fn test_folds_are_isolated() {
    let (_dir, store) = temp_file_store();
    store
        .insert(&SubmissionRecordBuilder::new().with_user("alice").with_fold("1").build())
        .unwrap();
    store
        .insert(&SubmissionRecordBuilder::new().with_user("alice").with_fold("2").build())
        .unwrap();

    assert_eq!(store.load(TEST_DATASET, "1", None).unwrap().len(), 1);
    assert_eq!(store.load(TEST_DATASET, "2", None).unwrap().len(), 1);
    assert!(store.load(TEST_DATASET, "3", None).unwrap().is_empty());
}

#[test]
fn test_malformed_entry_skipped_in_lenient_mode() {
    let (_dir, store) = temp_file_store();
    let location = store.insert(&alice_history()[0]).unwrap();
    let user_dir = location.path.parent().unwrap();
    fs::write(user_dir.join("0000-broken.json"), "{ not json").unwrap();

    let loaded = store.load(TEST_DATASET, TEST_FOLD, Some("alice")).unwrap();
    assert_eq!(loaded.len(), 1);
}

#[test]
fn test_malformed_entry_fails_in_strict_mode() {
    let (_dir, store) = temp_file_store();
    let store = store.with_strict_load(true);
    let location = store.insert(&alice_history()[0]).unwrap();
    let user_dir = location.path.parent().unwrap();
    let broken = user_dir.join("0000-broken.json");
    fs::write(&broken, r#"{"timestamp": "2024-01-01T00:00:00.000000Z"}"#).unwrap();

    match store.load(TEST_DATASET, TEST_FOLD, Some("alice")) {
        Err(LedgerError::Store(StoreError::Malformed { path, .. })) => assert_eq!(path, broken),
        other => panic!("expected malformed error, got {:?}", other),
    }
}

#[test]
fn test_scan_all_collects_every_scope() {
    let (_dir, store) = temp_file_store();
    for record in two_user_board() {
        store.insert(&record).unwrap();
    }
    store
        .insert(
            &SubmissionRecordBuilder::new()
                .with_dataset("expression/cell-type-classification-segerstolpe")
                .with_primary_metric("f1_macro")
                .with_user("carol")
                .at(100)
                .build(),
        )
        .unwrap();

    let all = store.scan_all().unwrap();
    assert_eq!(all.len(), 6);
    assert!(all.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(all.last().unwrap().user, "carol");
}

#[test]
fn test_scan_all_on_empty_root() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSubmissionStore::new(dir.path());
    assert!(store.scan_all().unwrap().is_empty());
}

#[test]
fn test_entries_are_pretty_json() {
    let (_dir, store) = temp_file_store();
    let location = store.insert(&alice_history()[0]).unwrap();
    let text = fs::read_to_string(&location.path).unwrap();
    assert!(text.contains("\n  \"timestamp\": "));
    assert!(text.contains("\"primary_metric\": \"spearman\""));
}

#[test]
fn test_legacy_timestamps_are_normalized() {
    // Arrange
    let (_dir, store) = temp_file_store();
    store.insert(&alice_history()[1]).unwrap();
    let user_dir = store.root().join(TEST_DATASET).join(TEST_FOLD).join("alice");
    fs::write(
        user_dir.join("legacy.json"),
        r#"{"timestamp": "2024-05-01 09:00:00", "user": "alice",
            "dataset": "RNA/translation-efficiency-muscle", "fold": "0",
            "metrics": {"primary_metric": "spearman", "spearman": 0.05}}"#,
    )
    .unwrap();

    // Act
    let loaded = store.load(TEST_DATASET, TEST_FOLD, Some("alice")).unwrap();

    // Assert
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].timestamp, "2024-05-01T09:00:00.000000Z");
    assert_eq!(loaded[0].score(), 0.05);
    assert_eq!(loaded[1].timestamp, timestamp_at(1));
}

#[test]
fn test_generated_users_each_get_a_directory() {
    let (_dir, store) = temp_file_store();
    let users: HashSet<String> = (0..5).map(|_| random_user()).collect();

    for (i, user) in users.iter().enumerate() {
        let record = SubmissionRecordBuilder::new().with_user(user.as_str()).at(i as u32).build();
        store.insert(&record).unwrap();
    }

    let loaded: HashSet<String> = store
        .load(TEST_DATASET, TEST_FOLD, None)
        .unwrap()
        .into_iter()
        .map(|r| r.user)
        .collect();
    assert_eq!(loaded, users);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_load_preserves_insertion_order(scores in prop::collection::vec(-1.0f64..1.0, 1..12)) {
        let (_dir, store) = temp_file_store();
        for (i, score) in scores.iter().enumerate() {
            let record = SubmissionRecordBuilder::new()
                .with_user("alice")
                .with_timestamp(timestamp_at(i as u32))
                .with_score(*score)
                .build();
            store.insert(&record).unwrap();
        }

        let loaded: Vec<f64> = store
            .load(TEST_DATASET, TEST_FOLD, Some("alice"))
            .unwrap()
            .iter()
            .map(|r| r.score())
            .collect();
        prop_assert_eq!(loaded, scores);
    }
}
