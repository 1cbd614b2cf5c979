//! Fluent builder pattern for constructing test data.
//!
//! This module provides builder structs for creating submission records and
//! metric sets with a fluent API for customization.

use indexmap::IndexMap;
use seqbench_domain::{MetricSet, SubmissionRecord, DEFAULT_SUBMISSION_DESCRIPTION, DEFAULT_SUBMISSION_NAME};

use crate::fixtures::{timestamp_at, TEST_DATASET, TEST_FOLD};

/// Builder for creating MetricSet test instances
#[derive(Clone)]
pub struct MetricSetBuilder {
    primary_metric: String,
    values: IndexMap<String, f64>,
}

impl MetricSetBuilder {
    pub fn new(primary_metric: impl Into<String>) -> Self {
        Self {
            primary_metric: primary_metric.into(),
            values: IndexMap::new(),
        }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Set the value of the primary metric
    pub fn with_score(mut self, value: f64) -> Self {
        self.values.insert(self.primary_metric.clone(), value);
        self
    }

    pub fn build(self) -> MetricSet {
        MetricSet::new(self.primary_metric, self.values).expect("builder produced invalid metrics")
    }
}

/// Builder for creating SubmissionRecord test instances
#[derive(Clone)]
pub struct SubmissionRecordBuilder {
    timestamp: String,
    user: String,
    dataset: String,
    fold: String,
    primary_metric: String,
    score: f64,
    extra_metrics: Vec<(String, f64)>,
    name: String,
    description: String,
}

impl SubmissionRecordBuilder {
    pub fn new() -> Self {
        Self {
            timestamp: timestamp_at(0),
            user: "testuser".to_string(),
            dataset: TEST_DATASET.to_string(),
            fold: TEST_FOLD.to_string(),
            primary_metric: "spearman".to_string(),
            score: 0.5,
            extra_metrics: Vec::new(),
            name: DEFAULT_SUBMISSION_NAME.to_string(),
            description: DEFAULT_SUBMISSION_DESCRIPTION.to_string(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Use the `n`-th fixture timestamp (one minute apart)
    pub fn at(mut self, n: u32) -> Self {
        self.timestamp = timestamp_at(n);
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    pub fn with_fold(mut self, fold: impl Into<String>) -> Self {
        self.fold = fold.into();
        self
    }

    pub fn with_primary_metric(mut self, metric: impl Into<String>) -> Self {
        self.primary_metric = metric.into();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.extra_metrics.push((name.into(), value));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn build(self) -> SubmissionRecord {
        let metrics = self
            .extra_metrics
            .into_iter()
            .fold(
                MetricSetBuilder::new(self.primary_metric).with_score(self.score),
                |builder, (name, value)| builder.with_metric(name, value),
            )
            .build();

        SubmissionRecord {
            timestamp: self.timestamp,
            user: self.user,
            dataset: self.dataset,
            fold: self.fold,
            metrics,
            name: self.name,
            description: self.description,
        }
    }
}

impl Default for SubmissionRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
