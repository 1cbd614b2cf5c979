//! Evaluate command: score predictions without storing them

use std::path::Path;

use anyhow::{Context, Result};

use seqbench_application::LabeledFrame;
use seqbench_domain::{LedgerError, MetricSet};

use crate::commands::CommandContext;

/// Score a predictions file against the test split of `dataset/fold`
pub fn evaluate(ctx: &CommandContext, dataset: &str, fold: &str, predictions: &Path) -> Result<MetricSet> {
    let registry = ctx.registry();
    let task = registry.get(dataset).map_err(LedgerError::from)?;
    let split = task.load(fold).map_err(LedgerError::from)?;

    let predictions = LabeledFrame::read_csv(predictions)
        .map_err(LedgerError::from)
        .with_context(|| format!("Failed to read predictions from {}", predictions.display()))?;

    Ok(task.evaluate(&predictions, &split.test)?)
}

/// Evaluate and print the metrics
pub fn run(ctx: &CommandContext, dataset: &str, fold: &str, predictions: &Path) -> Result<()> {
    let metrics = evaluate(ctx, dataset, fold, predictions)?;
    ctx.emit(&metrics)
}
