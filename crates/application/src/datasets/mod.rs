//! Dataset tasks and the registry of builtin datasets.
//!
//! A dataset task knows how to split its local data for a fold and how to
//! score predictions against held-out labels. The set of datasets is fixed at
//! compile time; [`DatasetRegistry::builtin`] lists them.
//!
//! # Example
//!
//! ```rust
//! use seqbench_application::datasets::DatasetRegistry;
//!
//! let registry = DatasetRegistry::builtin("data");
//! let task = registry.get("RNA/translation-efficiency-muscle").unwrap();
//! assert_eq!(task.primary_metric(), "spearman");
//! assert_eq!(task.folds().len(), 10);
//! ```

mod frame;
pub mod source;
mod tasks;

pub use frame::{DataSplit, LabeledFrame};
pub use tasks::{FoldedDataset, SplitDataset};

use std::path::{Path, PathBuf};

use serde::Serialize;

use seqbench_domain::{DatasetError, LedgerResult, MetricSet, ValidationError};

use crate::scoring::{ClassificationEvaluator, Evaluator, RegressionEvaluator};

/// Dataset id of the muscle translation-efficiency task
pub const TRANSLATION_EFFICIENCY_MUSCLE: &str = "RNA/translation-efficiency-muscle";

/// Dataset id of the PC3 translation-efficiency task
pub const TRANSLATION_EFFICIENCY_PC3: &str = "RNA/translation-efficiency-pc3";

/// Dataset id of the Segerstolpe cell-type classification task
pub const CELL_TYPE_SEGERSTOLPE: &str = "expression/cell-type-classification-segerstolpe";

/// Number of cross-validation folds of the translation-efficiency tasks
pub const TRANSLATION_EFFICIENCY_FOLDS: u32 = 10;

/// Canonical trait for dataset tasks.
pub trait DatasetTask: Send + Sync {
    /// Returns the unique dataset id, possibly namespaced with `/`.
    fn id(&self) -> &'static str;

    /// Returns a human-readable description of the dataset.
    fn description(&self) -> &'static str;

    /// Fold identifiers the dataset can be split by.
    fn folds(&self) -> Vec<String>;

    /// Metric submissions on this dataset are ranked by.
    fn primary_metric(&self) -> &'static str;

    /// The evaluator scoring predictions for this dataset.
    fn evaluator(&self) -> &dyn Evaluator;

    /// Location of the dataset's local table.
    fn data_path(&self) -> PathBuf;

    /// Load the train and test partitions of `fold`.
    fn load(&self, fold: &str) -> Result<DataSplit, DatasetError>;

    /// Score predictions against targets, row by row.
    fn evaluate(&self, predictions: &LabeledFrame, targets: &LabeledFrame) -> LedgerResult<MetricSet>;

    /// Fail unless `fold` is one of [`DatasetTask::folds`].
    fn check_fold(&self, fold: &str) -> Result<(), DatasetError> {
        let supported = self.folds();
        if supported.iter().any(|f| f == fold) {
            Ok(())
        } else {
            Err(DatasetError::UnsupportedFold {
                dataset: self.id().to_string(),
                fold: fold.to_string(),
                supported,
            })
        }
    }

    /// Summary of the dataset for listings.
    fn describe(&self) -> DatasetDescription {
        DatasetDescription {
            id: self.id().to_string(),
            description: self.description().to_string(),
            task: self.evaluator().name().to_string(),
            folds: self.folds(),
            primary_metric: self.primary_metric().to_string(),
            metrics: self
                .evaluator()
                .metric_names()
                .iter()
                .map(|m| m.to_string())
                .collect(),
            data_path: self.data_path(),
        }
    }
}

/// What a dataset is and how it is scored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetDescription {
    pub id: String,
    pub description: String,
    /// Task family (`regression` or `classification`)
    pub task: String,
    pub folds: Vec<String>,
    pub primary_metric: String,
    /// Every reported metric, primary first
    pub metrics: Vec<String>,
    pub data_path: PathBuf,
}

/// Registry of dataset tasks, in listing order
pub struct DatasetRegistry {
    tasks: Vec<Box<dyn DatasetTask>>,
}

impl DatasetRegistry {
    /// Build a registry from arbitrary tasks
    pub fn new(tasks: Vec<Box<dyn DatasetTask>>) -> Self {
        Self { tasks }
    }

    /// The builtin datasets, reading their tables below `data_dir`
    pub fn builtin(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let tasks: Vec<Box<dyn DatasetTask>> = vec![
            Box::new(FoldedDataset::new(
                TRANSLATION_EFFICIENCY_MUSCLE,
                "Translation efficiency of mRNA sequences in human muscle tissue (regression, 10-fold)",
                TRANSLATION_EFFICIENCY_FOLDS,
                data_dir,
                RegressionEvaluator,
            )),
            Box::new(FoldedDataset::new(
                TRANSLATION_EFFICIENCY_PC3,
                "Translation efficiency of mRNA sequences in the PC3 prostate cancer cell line (regression, 10-fold)",
                TRANSLATION_EFFICIENCY_FOLDS,
                data_dir,
                RegressionEvaluator,
            )),
            Box::new(SplitDataset::new(
                CELL_TYPE_SEGERSTOLPE,
                "Cell type classification of human pancreatic islet scRNA-seq with 13 cell types (single split)",
                data_dir,
                ClassificationEvaluator,
            )),
        ];
        Self::new(tasks)
    }

    /// Returns a specific dataset task by id.
    pub fn get(&self, id: &str) -> Result<&dyn DatasetTask, ValidationError> {
        self.tasks
            .iter()
            .find(|t| t.id() == id)
            .map(|t| &**t)
            .ok_or_else(|| ValidationError::UnknownDataset(id.to_string()))
    }

    /// All registered tasks.
    pub fn tasks(&self) -> impl Iterator<Item = &dyn DatasetTask> {
        self.tasks.iter().map(|t| &**t)
    }

    /// Returns the ids of all registered datasets.
    pub fn ids(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|t| t.id()).collect()
    }

    /// Descriptions of all registered datasets.
    pub fn describe_all(&self) -> Vec<DatasetDescription> {
        self.tasks.iter().map(|t| t.describe()).collect()
    }
}
