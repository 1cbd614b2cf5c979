//! Benchmark task workflow.
//!
//! A [`BenchmarkTask`] binds one dataset, fold and user. It loads the fold's
//! data once with [`BenchmarkTask::setup`], then scores predictions and files
//! them in the submission store.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use seqbench_application::datasets::{DatasetRegistry, LabeledFrame};
//! use seqbench_application::task::BenchmarkTask;
//! use seqbench_infrastructure::FileSubmissionStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = DatasetRegistry::builtin("data");
//! let store = Arc::new(FileSubmissionStore::new("submissions"));
//! let mut task = BenchmarkTask::new(&registry, store, "RNA/translation-efficiency-muscle", "0", "alice")?;
//!
//! let split = task.setup()?;
//! let preds = split.test.with_constant_label("0.5");
//! let outcome = task.submit(&preds, Some("constant"), None)?;
//! println!("{}", outcome.metrics.primary_value());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use seqbench_domain::{LedgerResult, MetricSet, NewSubmission, Scope, ValidationError};
use seqbench_infrastructure::{SubmissionLocation, SubmissionStore};

use crate::datasets::{DataSplit, DatasetDescription, DatasetRegistry, DatasetTask, LabeledFrame};

/// Result of a submit call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitOutcome {
    pub metrics: MetricSet,
    /// Where the submission was stored; `None` for a dummy submission
    pub location: Option<SubmissionLocation>,
}

impl SubmitOutcome {
    /// Whether the predictions were the test labels themselves and were not
    /// stored
    pub fn is_dummy(&self) -> bool {
        self.location.is_none()
    }
}

/// One user's work on one `dataset/fold`
pub struct BenchmarkTask<'r, S: SubmissionStore> {
    dataset: &'r dyn DatasetTask,
    scope: Scope,
    store: Arc<S>,
    test_data: Option<LabeledFrame>,
}

impl<'r, S: SubmissionStore> BenchmarkTask<'r, S> {
    /// Bind a task, failing for unknown datasets, unsupported folds and
    /// unusable names
    pub fn new(
        registry: &'r DatasetRegistry,
        store: Arc<S>,
        dataset: &str,
        fold: &str,
        user: &str,
    ) -> LedgerResult<Self> {
        let task = registry.get(dataset)?;
        task.check_fold(fold)?;
        let scope = Scope::new(dataset, fold, user)?;

        Ok(Self {
            dataset: task,
            scope,
            store,
            test_data: None,
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn is_set_up(&self) -> bool {
        self.test_data.is_some()
    }

    /// Load the fold's train and test data and keep the test split for
    /// [`BenchmarkTask::submit`]
    #[instrument(skip(self), fields(dataset = %self.scope.dataset, fold = %self.scope.fold))]
    pub fn setup(&mut self) -> LedgerResult<DataSplit> {
        let split = self.dataset.load(&self.scope.fold)?;
        self.test_data = Some(split.test.clone());
        Ok(split)
    }

    /// The held-out test split, once set up
    pub fn test_data(&self) -> Option<&LabeledFrame> {
        self.test_data.as_ref()
    }

    /// Score `predictions` against arbitrary `targets`
    pub fn evaluate(&self, predictions: &LabeledFrame, targets: &LabeledFrame) -> LedgerResult<MetricSet> {
        if !self.is_set_up() {
            return Err(ValidationError::TaskNotSetUp("evaluate").into());
        }
        self.dataset.evaluate(predictions, targets)
    }

    /// Score `predictions` against the test split and store the result.
    ///
    /// Predictions equal to the test split are scored but not stored.
    #[instrument(skip(self, predictions), fields(user = %self.scope.user, rows = predictions.len()))]
    pub fn submit(
        &self,
        predictions: &LabeledFrame,
        name: Option<&str>,
        description: Option<&str>,
    ) -> LedgerResult<SubmitOutcome> {
        let test = self
            .test_data
            .as_ref()
            .ok_or(ValidationError::TaskNotSetUp("submit"))?;
        let metrics = self.dataset.evaluate(predictions, test)?;

        if predictions == test {
            info!("Predictions match the test data, logging as dummy submission");
            return Ok(SubmitOutcome {
                metrics,
                location: None,
            });
        }

        let mut submission = NewSubmission::new(self.scope.clone(), metrics.clone());
        if let Some(name) = name {
            submission = submission.with_name(name);
        }
        if let Some(description) = description {
            submission = submission.with_description(description);
        }
        let location = self.store.save(submission)?;

        Ok(SubmitOutcome {
            metrics,
            location: Some(location),
        })
    }

    /// What the bound dataset is and how it is scored
    pub fn describe(&self) -> DatasetDescription {
        self.dataset.describe()
    }
}
