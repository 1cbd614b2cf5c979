//! Evaluator implementations for the dataset task families.
//!
//! Each evaluator checks its inputs, computes a fixed list of metrics and
//! reports them as a `MetricSet` with the family's primary metric.

use seqbench_domain::{DatasetError, LedgerResult, MetricSet};
use tracing::{debug, instrument, warn};

use super::metrics::{self, ClassStats};

/// Evaluator trait for scoring predictions against targets.
pub trait Evaluator: Send + Sync {
    /// Evaluate predicted labels against target labels, in matching order.
    fn evaluate(&self, predictions: &[String], targets: &[String]) -> LedgerResult<MetricSet>;

    /// Metric submissions are ranked by.
    fn primary_metric(&self) -> &'static str;

    /// Every metric the evaluator reports, in output order.
    fn metric_names(&self) -> &'static [&'static str];

    /// Get the evaluator type name.
    fn name(&self) -> &'static str;
}

/// Regression metrics, ranked by Spearman correlation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegressionEvaluator;

impl RegressionEvaluator {
    const METRICS: &'static [&'static str] = &["spearman", "pearson", "mse", "mae", "rmse", "r2"];
}

impl Evaluator for RegressionEvaluator {
    #[instrument(skip(self, predictions, targets), fields(n = targets.len()))]
    fn evaluate(&self, predictions: &[String], targets: &[String]) -> LedgerResult<MetricSet> {
        check_lengths(predictions, targets)?;
        let p = parse_values(predictions)?;
        let t = parse_values(targets)?;

        let mse = metrics::mse(&p, &t);
        let values = [
            ("spearman", metrics::spearman(&p, &t)),
            ("pearson", metrics::pearson(&p, &t)),
            ("mse", mse),
            ("mae", metrics::mae(&p, &t)),
            ("rmse", mse.sqrt()),
            ("r2", metrics::r2(&p, &t)),
        ];

        debug!(?values, "Regression evaluation");
        Ok(MetricSet::from_pairs(
            self.primary_metric(),
            values.into_iter().map(|(name, value)| (name, finite_or_zero(name, value))),
        )?)
    }

    fn primary_metric(&self) -> &'static str {
        "spearman"
    }

    fn metric_names(&self) -> &'static [&'static str] {
        Self::METRICS
    }

    fn name(&self) -> &'static str {
        "regression"
    }
}

/// Classification metrics, ranked by macro F1.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationEvaluator;

impl ClassificationEvaluator {
    const METRICS: &'static [&'static str] = &[
        "f1_macro",
        "f1_weighted",
        "accuracy",
        "precision_macro",
        "recall_macro",
    ];
}

impl Evaluator for ClassificationEvaluator {
    #[instrument(skip(self, predictions, targets), fields(n = targets.len()))]
    fn evaluate(&self, predictions: &[String], targets: &[String]) -> LedgerResult<MetricSet> {
        check_lengths(predictions, targets)?;

        let stats = metrics::class_stats(predictions, targets);
        let values = [
            ("f1_macro", metrics::macro_average(&stats, ClassStats::f1)),
            ("f1_weighted", metrics::weighted_average(&stats, ClassStats::f1)),
            ("accuracy", metrics::accuracy(predictions, targets)),
            ("precision_macro", metrics::macro_average(&stats, ClassStats::precision)),
            ("recall_macro", metrics::macro_average(&stats, ClassStats::recall)),
        ];

        debug!(classes = stats.len(), ?values, "Classification evaluation");
        Ok(MetricSet::from_pairs(
            self.primary_metric(),
            values.into_iter().map(|(name, value)| (name, finite_or_zero(name, value))),
        )?)
    }

    fn primary_metric(&self) -> &'static str {
        "f1_macro"
    }

    fn metric_names(&self) -> &'static [&'static str] {
        Self::METRICS
    }

    fn name(&self) -> &'static str {
        "classification"
    }
}

fn check_lengths(predictions: &[String], targets: &[String]) -> Result<(), DatasetError> {
    if predictions.len() != targets.len() {
        return Err(DatasetError::LengthMismatch {
            predictions: predictions.len(),
            targets: targets.len(),
        });
    }
    if targets.is_empty() {
        return Err(DatasetError::EmptyInput);
    }
    Ok(())
}

fn parse_values(labels: &[String]) -> Result<Vec<f64>, DatasetError> {
    labels
        .iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| DatasetError::InvalidLabel {
                    row: row + 1,
                    value: value.clone(),
                })
        })
        .collect()
}

fn finite_or_zero(name: &str, value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!(metric = name, value = %value, "Metric is undefined for these inputs, reporting 0.0");
        0.0
    }
}
