//! Submit command

use std::path::Path;

use anyhow::{Context, Result};

use seqbench_application::{BenchmarkTask, LabeledFrame, SubmitOutcome};
use seqbench_domain::LedgerError;

use crate::commands::CommandContext;

/// Arguments of a submission
#[derive(Debug, Clone)]
pub struct SubmitArgs<'a> {
    pub dataset: &'a str,
    pub fold: &'a str,
    pub user: &'a str,
    pub predictions: &'a Path,
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Score a predictions file against the fold's test split and store it
pub fn submit(ctx: &CommandContext, args: &SubmitArgs<'_>) -> Result<SubmitOutcome> {
    let registry = ctx.registry();
    let mut task = BenchmarkTask::new(&registry, ctx.store(), args.dataset, args.fold, args.user)?;
    task.setup()?;

    let predictions = LabeledFrame::read_csv(args.predictions)
        .map_err(LedgerError::from)
        .with_context(|| format!("Failed to read predictions from {}", args.predictions.display()))?;

    Ok(task.submit(&predictions, args.name, args.description)?)
}

/// Submit and print the outcome
pub fn run(ctx: &CommandContext, args: &SubmitArgs<'_>) -> Result<()> {
    let outcome = submit(ctx, args)?;
    ctx.emit(&outcome)
}
