//! History command

use anyhow::Result;

use seqbench_application::{HistoryReport, HistoryService};

use crate::commands::CommandContext;
use crate::error::CliError;

/// Build `user`'s history on `dataset/fold`
pub fn build(ctx: &CommandContext, dataset: &str, fold: &str, user: &str) -> Result<HistoryReport> {
    let report = HistoryService::new(ctx.store()).report(dataset, fold, user)?;

    if report.is_empty() {
        return Err(CliError::NothingToShow(format!(
            "No submissions found for user '{}' on {} fold {}",
            user, dataset, fold
        ))
        .into());
    }
    Ok(report)
}

/// Show `user`'s history on `dataset/fold`
pub fn show(ctx: &CommandContext, dataset: &str, fold: &str, user: &str) -> Result<()> {
    let report = build(ctx, dataset, fold, user)?;
    ctx.emit(&report)
}
