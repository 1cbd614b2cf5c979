//! Labeled tables exchanged with dataset tasks.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use seqbench_domain::DatasetError;

/// Rows of `(id, label)` in a fixed order.
///
/// Labels are kept as text; evaluators decide whether they are numbers or
/// class names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledFrame {
    ids: Vec<String>,
    labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PredictionRow {
    #[serde(default)]
    id: Option<String>,
    labels: String,
}

impl LabeledFrame {
    /// Build a frame from `(id, label)` pairs
    pub fn from_pairs<I, A, B>(rows: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let (ids, labels) = rows
            .into_iter()
            .map(|(id, label)| (id.into(), label.into()))
            .unzip();
        Self { ids, labels }
    }

    /// Build a frame from labels alone, numbering rows from 0
    pub fn from_labels<I, B>(labels: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<String>,
    {
        Self::from_pairs(
            labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| (i.to_string(), label)),
        )
    }

    /// Read a predictions table with a `labels` column and an optional `id`
    /// column.
    pub fn read_csv(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|e| unavailable(path, e))?;
        let frame = Self::from_csv_reader(file).map_err(|e| match e {
            DatasetError::DataUnavailable { reason, .. } => DatasetError::DataUnavailable {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;
        debug!(path = %path.display(), rows = frame.len(), "Read labeled frame");
        Ok(frame)
    }

    /// Parse a predictions table from any reader
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();

        for (row_num, row) in reader.deserialize::<PredictionRow>().enumerate() {
            let row = row.map_err(|e| DatasetError::DataUnavailable {
                path: PathBuf::new(),
                reason: format!("Failed to parse CSV row {}: {}", row_num + 1, e),
            })?;
            rows.push((row.id.unwrap_or_else(|| row_num.to_string()), row.labels));
        }

        Ok(Self::from_pairs(rows))
    }

    /// Write the frame as an `id,labels` table
    pub fn write_csv(&self, path: &Path) -> Result<(), DatasetError> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| unavailable(path, e))?;
        writer
            .write_record(["id", "labels"])
            .map_err(|e| unavailable(path, e))?;
        for (id, label) in self.ids.iter().zip(&self.labels) {
            writer
                .write_record([id, label])
                .map_err(|e| unavailable(path, e))?;
        }
        writer.flush().map_err(|e| unavailable(path, e))
    }

    /// Row ids
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Row labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// A frame with the same ids and every label replaced by `label`
    pub fn with_constant_label(&self, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            ids: self.ids.clone(),
            labels: vec![label; self.ids.len()],
        }
    }
}

/// Train and test partitions of one fold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSplit {
    pub train: LabeledFrame,
    pub test: LabeledFrame,
}

fn unavailable(path: &Path, e: impl std::fmt::Display) -> DatasetError {
    DatasetError::DataUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_with_ids() {
        let frame = LabeledFrame::from_csv_reader("id,labels\nseq1,0.5\nseq2,1.5\n".as_bytes()).unwrap();
        assert_eq!(frame.ids(), ["seq1", "seq2"]);
        assert_eq!(frame.labels(), ["0.5", "1.5"]);
    }

    #[test]
    fn test_from_csv_without_ids() {
        let frame = LabeledFrame::from_csv_reader("labels\n3\n1\n".as_bytes()).unwrap();
        assert_eq!(frame.ids(), ["0", "1"]);
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn test_missing_labels_column() {
        let err = LabeledFrame::from_csv_reader("id,prediction\na,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::DataUnavailable { .. }));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preds.csv");
        let frame = LabeledFrame::from_pairs([("a", "1"), ("b", "2")]);
        frame.write_csv(&path).unwrap();
        assert_eq!(LabeledFrame::read_csv(&path).unwrap(), frame);
    }

    #[test]
    fn test_constant_label() {
        let frame = LabeledFrame::from_labels(["1", "2", "3"]).with_constant_label("2");
        assert_eq!(frame.labels(), ["2", "2", "2"]);
        assert_eq!(frame.ids(), ["0", "1", "2"]);
    }
}
