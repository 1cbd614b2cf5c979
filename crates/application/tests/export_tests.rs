//! Tests for CSV export of the whole ledger

use std::sync::Arc;

use seqbench_application::{ExportService, DEFAULT_EXPORT_FILE};
use seqbench_domain::{ExportError, LedgerError, StoreError};
use seqbench_infrastructure::{FileSubmissionStore, SubmissionStore};
use seqbench_testing::{
    temp_file_store, two_user_board, InMemorySubmissionStore, SubmissionRecordBuilder,
};

#[test]
fn test_zero_records_is_an_error() {
    // Arrange
    let (dir, store) = temp_file_store();
    std::fs::create_dir_all(store.root()).unwrap();
    let service = ExportService::new(Arc::new(store));
    let output = dir.path().join(DEFAULT_EXPORT_FILE);

    // Act
    let result = service.export(&output);

    // Assert
    assert!(matches!(result, Err(LedgerError::Export(ExportError::NoSubmissions))));
    assert!(!output.exists(), "no file is written for an empty ledger");
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = ExportService::new(Arc::new(FileSubmissionStore::new(dir.path().join("absent"))));

    let result = service.to_table();

    assert!(matches!(result, Err(LedgerError::Store(StoreError::RootNotFound(_)))));
}

#[test]
fn test_union_of_metric_columns() {
    // Arrange
    let records = vec![
        SubmissionRecordBuilder::new().with_user("alice").at(0).with_score(0.1).build(),
        SubmissionRecordBuilder::new()
            .with_user("cell")
            .with_dataset("expression/cell-type-classification-segerstolpe")
            .with_primary_metric("f1_macro")
            .with_score(0.8)
            .with_metric("accuracy", 0.9)
            .at(1)
            .build(),
    ];
    let service = ExportService::new(Arc::new(InMemorySubmissionStore::with_records(records)));

    // Act
    let table = service.to_table().unwrap();

    // Assert
    assert_eq!(table.rows.len(), 2);
    let spearman = table.column("metric_spearman").unwrap();
    let accuracy = table.column("metric_accuracy").unwrap();
    let primary = table.column("metric_primary_metric").unwrap();
    assert!(spearman < accuracy, "metric columns follow first appearance");
    assert_eq!(table.rows[0][spearman], "0.1");
    assert_eq!(table.rows[0][accuracy], "");
    assert_eq!(table.rows[1][spearman], "");
    assert_eq!(table.rows[1][accuracy], "0.9");
    assert_eq!(table.rows[1][primary], "f1_macro");
}

#[test]
fn test_export_file_round_trip() {
    // Arrange
    let (dir, store) = temp_file_store();
    for record in two_user_board() {
        store.insert(&record).unwrap();
    }
    let service = ExportService::new(Arc::new(store));
    let output = dir.path().join("out.csv");

    // Act
    let path = service.export(&output).unwrap();

    // Assert
    assert_eq!(path, output);
    let mut reader = csv::Reader::from_path(&output).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(&header[..4], ["dataset", "fold", "user", "timestamp"]);
    assert!(header.contains(&"metric_mse".to_string()));

    let users: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[2].to_string())
        .collect();
    assert_eq!(users, vec!["alice", "alice", "alice", "bob", "bob"]);
}

#[test]
fn test_rows_sorted_by_timestamp() {
    let records = vec![
        SubmissionRecordBuilder::new().with_user("late").at(9).build(),
        SubmissionRecordBuilder::new().with_user("early").at(1).build(),
    ];
    let service = ExportService::new(Arc::new(InMemorySubmissionStore::with_records(records)));

    let table = service.to_table().unwrap();

    let user = table.column("user").unwrap();
    assert_eq!(table.rows[0][user], "early");
    assert_eq!(table.rows[1][user], "late");
}
