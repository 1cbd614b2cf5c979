//! Dataset task implementations.

use std::path::PathBuf;

use tracing::{info, instrument};

use seqbench_domain::{DatasetError, LedgerResult, MetricSet};

use super::frame::{DataSplit, LabeledFrame};
use super::source::{data_file, in_fold, read_rows, DataRow};
use super::DatasetTask;
use crate::scoring::Evaluator;

/// A dataset cross-validated over numbered folds.
///
/// Fold `k` tests on the rows whose `fold_id` is `k` and trains on the rest.
pub struct FoldedDataset<E> {
    id: &'static str,
    description: &'static str,
    fold_count: u32,
    data_dir: PathBuf,
    evaluator: E,
}

impl<E: Evaluator> FoldedDataset<E> {
    pub fn new(
        id: &'static str,
        description: &'static str,
        fold_count: u32,
        data_dir: impl Into<PathBuf>,
        evaluator: E,
    ) -> Self {
        Self {
            id,
            description,
            fold_count,
            data_dir: data_dir.into(),
            evaluator,
        }
    }
}

impl<E: Evaluator> DatasetTask for FoldedDataset<E> {
    fn id(&self) -> &'static str {
        self.id
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn folds(&self) -> Vec<String> {
        (0..self.fold_count).map(|k| k.to_string()).collect()
    }

    fn primary_metric(&self) -> &'static str {
        self.evaluator.primary_metric()
    }

    fn evaluator(&self) -> &dyn Evaluator {
        &self.evaluator
    }

    fn data_path(&self) -> PathBuf {
        data_file(&self.data_dir, self.id)
    }

    #[instrument(skip(self), fields(dataset = self.id))]
    fn load(&self, fold: &str) -> Result<DataSplit, DatasetError> {
        self.check_fold(fold)?;
        let rows = read_rows(&self.data_path())?;
        let (test, train): (Vec<DataRow>, Vec<DataRow>) =
            rows.into_iter().partition(|row| in_fold(row, fold));

        let split = DataSplit {
            train: to_frame(train),
            test: to_frame(test),
        };
        info!(train = split.train.len(), test = split.test.len(), "Loaded fold");
        Ok(split)
    }

    fn evaluate(&self, predictions: &LabeledFrame, targets: &LabeledFrame) -> LedgerResult<MetricSet> {
        self.evaluator.evaluate(predictions.labels(), targets.labels())
    }
}

/// A dataset with one fixed train/test split, exposed as fold `0`.
pub struct SplitDataset<E> {
    id: &'static str,
    description: &'static str,
    data_dir: PathBuf,
    evaluator: E,
}

impl<E: Evaluator> SplitDataset<E> {
    /// The only fold of a fixed-split dataset
    pub const FOLD: &'static str = "0";

    pub fn new(
        id: &'static str,
        description: &'static str,
        data_dir: impl Into<PathBuf>,
        evaluator: E,
    ) -> Self {
        Self {
            id,
            description,
            data_dir: data_dir.into(),
            evaluator,
        }
    }
}

impl<E: Evaluator> DatasetTask for SplitDataset<E> {
    fn id(&self) -> &'static str {
        self.id
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn folds(&self) -> Vec<String> {
        vec![Self::FOLD.to_string()]
    }

    fn primary_metric(&self) -> &'static str {
        self.evaluator.primary_metric()
    }

    fn evaluator(&self) -> &dyn Evaluator {
        &self.evaluator
    }

    fn data_path(&self) -> PathBuf {
        data_file(&self.data_dir, self.id)
    }

    #[instrument(skip(self), fields(dataset = self.id))]
    fn load(&self, fold: &str) -> Result<DataSplit, DatasetError> {
        self.check_fold(fold)?;
        let rows = read_rows(&self.data_path())?;

        let mut train = Vec::new();
        let mut test = Vec::new();
        for (i, row) in rows.into_iter().enumerate() {
            match row.split.as_deref().map(str::trim) {
                Some("train") => train.push(row),
                Some("test") => test.push(row),
                other => {
                    return Err(DatasetError::DataUnavailable {
                        path: self.data_path(),
                        reason: format!(
                            "row {} has split {:?}, expected 'train' or 'test'",
                            i + 1,
                            other.unwrap_or("")
                        ),
                    })
                }
            }
        }

        let split = DataSplit {
            train: to_frame(train),
            test: to_frame(test),
        };
        info!(train = split.train.len(), test = split.test.len(), "Loaded split");
        Ok(split)
    }

    fn evaluate(&self, predictions: &LabeledFrame, targets: &LabeledFrame) -> LedgerResult<MetricSet> {
        self.evaluator.evaluate(predictions.labels(), targets.labels())
    }
}

fn to_frame(rows: Vec<DataRow>) -> LabeledFrame {
    LabeledFrame::from_pairs(rows.into_iter().map(|row| (row.id, row.labels)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ClassificationEvaluator, RegressionEvaluator};
    use std::fs;
    use std::path::Path;

    fn write_data(dir: &Path, id: &str, contents: &str) {
        let path = data_file(dir, id);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_folded_load_partitions_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_data(
            dir.path(),
            "RNA/demo",
            "id,labels,fold_id\na,0.1,0\nb,0.2,1\nc,0.3,0\nd,0.4,2\n",
        );
        let task = FoldedDataset::new("RNA/demo", "demo", 3, dir.path(), RegressionEvaluator);

        let split = task.load("0").unwrap();
        assert_eq!(split.test.ids(), ["a", "c"]);
        assert_eq!(split.train.ids(), ["b", "d"]);
    }

    #[test]
    fn test_folded_rejects_unknown_fold() {
        let dir = tempfile::tempdir().unwrap();
        let task = FoldedDataset::new("RNA/demo", "demo", 10, dir.path(), RegressionEvaluator);
        match task.load("10") {
            Err(DatasetError::UnsupportedFold { supported, .. }) => assert_eq!(supported.len(), 10),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_split_dataset() {
        let dir = tempfile::tempdir().unwrap();
        write_data(
            dir.path(),
            "expression/demo",
            "id,labels,split\nc1,3,train\nc2,5,test\nc3,3,train\n",
        );
        let task = SplitDataset::new("expression/demo", "demo", dir.path(), ClassificationEvaluator);

        assert_eq!(task.folds(), vec!["0"]);
        let split = task.load("0").unwrap();
        assert_eq!(split.train.len(), 2);
        assert_eq!(split.test.labels(), ["5"]);
        assert!(matches!(task.load("1"), Err(DatasetError::UnsupportedFold { .. })));
    }

    #[test]
    fn test_split_dataset_bad_split_value() {
        let dir = tempfile::tempdir().unwrap();
        write_data(dir.path(), "expression/demo", "id,labels,split\nc1,3,validation\n");
        let task = SplitDataset::new("expression/demo", "demo", dir.path(), ClassificationEvaluator);
        assert!(matches!(task.load("0"), Err(DatasetError::DataUnavailable { .. })));
    }
}
