//! Export Service
//!
//! Flattens every persisted submission into one CSV table.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use tracing::{info, instrument};

use seqbench_domain::{ExportError, LedgerResult, SubmissionRecord, PRIMARY_METRIC_KEY};
use seqbench_infrastructure::SubmissionStore;

/// Default output file of an export
pub const DEFAULT_EXPORT_FILE: &str = "benchmark_export.csv";

/// Prefix of every metric column
pub const METRIC_COLUMN_PREFIX: &str = "metric_";

/// Columns every exported row has, in order
pub const BASE_COLUMNS: [&str; 6] = ["dataset", "fold", "user", "timestamp", "name", "description"];

/// Flattened submissions: a header and one row per submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Flatten `records`, sorting them by timestamp first
    pub fn from_records(mut records: Vec<SubmissionRecord>) -> Self {
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        let mut metric_keys: IndexSet<String> = IndexSet::new();
        for record in &records {
            metric_keys.insert(PRIMARY_METRIC_KEY.to_string());
            for name in record.metrics.values().keys() {
                metric_keys.insert(name.clone());
            }
        }

        let header = BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(metric_keys.iter().map(|k| format!("{}{}", METRIC_COLUMN_PREFIX, k)))
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                let mut row = vec![
                    record.dataset.clone(),
                    record.fold.clone(),
                    record.user.clone(),
                    record.timestamp.clone(),
                    record.name.clone(),
                    record.description.clone(),
                ];
                row.extend(metric_keys.iter().map(|key| metric_cell(record, key)));
                row
            })
            .collect();

        Self { header, rows }
    }

    /// Index of a column by name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV, replacing any existing file
    pub fn write_csv(&self, path: &Path) -> Result<(), ExportError> {
        let fail = |e: csv::Error| ExportError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut writer = csv::Writer::from_path(path).map_err(fail)?;
        writer.write_record(&self.header).map_err(fail)?;
        for row in &self.rows {
            writer.write_record(row).map_err(fail)?;
        }
        writer.flush().map_err(|e| ExportError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

fn metric_cell(record: &SubmissionRecord, key: &str) -> String {
    if key == PRIMARY_METRIC_KEY {
        return record.primary_metric().to_string();
    }
    record
        .metrics
        .get(key)
        .map(|v| v.to_string())
        .unwrap_or_default()
}

/// Export service
pub struct ExportService<S: SubmissionStore> {
    store: Arc<S>,
}

impl<S: SubmissionStore> ExportService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Flatten every stored submission.
    ///
    /// Fails with [`ExportError::NoSubmissions`] when nothing is stored.
    #[instrument(skip(self))]
    pub fn to_table(&self) -> LedgerResult<ExportTable> {
        let records = self.store.scan_all()?;
        if records.is_empty() {
            return Err(ExportError::NoSubmissions.into());
        }
        Ok(ExportTable::from_records(records))
    }

    /// Write every stored submission to `output` as CSV
    #[instrument(skip(self), fields(output = %output.display()))]
    pub fn export(&self, output: &Path) -> LedgerResult<PathBuf> {
        let table = self.to_table()?;
        table.write_csv(output)?;
        info!(
            rows = table.rows.len(),
            columns = table.header.len(),
            "Exported submissions"
        );
        Ok(output.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqbench_domain::{MetricSet, NewSubmission, Scope};

    fn record(user: &str, ts: &str, metrics: MetricSet) -> SubmissionRecord {
        NewSubmission::new(Scope::new("RNA/demo", "0", user).unwrap(), metrics).into_record(ts.to_string())
    }

    #[test]
    fn test_header_and_sorting() {
        let later = record(
            "bob",
            "2024-05-01T10:00:02.000000Z",
            MetricSet::from_pairs("spearman", [("spearman", 0.2), ("mse", 0.9)]).unwrap(),
        );
        let earlier = record(
            "alice",
            "2024-05-01T10:00:01.000000Z",
            MetricSet::from_pairs("spearman", [("spearman", 0.1)]).unwrap(),
        );

        let table = ExportTable::from_records(vec![later, earlier]);
        assert_eq!(
            table.header,
            vec![
                "dataset",
                "fold",
                "user",
                "timestamp",
                "name",
                "description",
                "metric_primary_metric",
                "metric_spearman",
                "metric_mse",
            ]
        );
        assert_eq!(table.rows[0][2], "alice");
        assert_eq!(table.rows[0][6], "spearman");
        assert_eq!(table.rows[0][8], "", "missing metric is an empty cell");
        assert_eq!(table.rows[1][8], "0.9");
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let table = ExportTable::from_records(vec![record(
            "alice",
            "2024-05-01T10:00:01.000000Z",
            MetricSet::from_pairs("spearman", [("spearman", 0.5)]).unwrap(),
        )]);

        table.write_csv(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next().unwrap(),
            "dataset,fold,user,timestamp,name,description,metric_primary_metric,metric_spearman"
        );
        assert_eq!(
            lines.next().unwrap(),
            "RNA/demo,0,alice,2024-05-01T10:00:01.000000Z,No name provided,No description provided,spearman,0.5"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let table = ExportTable::default();
        let err = table.write_csv(Path::new("/nonexistent/dir/out.csv")).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
