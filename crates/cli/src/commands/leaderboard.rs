//! Leaderboard command

use anyhow::Result;

use seqbench_application::{Leaderboard, LeaderboardService};

use crate::commands::CommandContext;
use crate::error::CliError;

/// Build the leaderboard of `dataset/fold`
pub fn build(ctx: &CommandContext, dataset: &str, fold: &str) -> Result<Leaderboard> {
    let service = LeaderboardService::new(ctx.store()).with_tie_break(ctx.config.leaderboard.tie_break);
    let board = service.get_leaderboard(dataset, fold)?;

    if board.is_empty() {
        return Err(CliError::NothingToShow(format!(
            "No submissions found for {} fold {}",
            dataset, fold
        ))
        .into());
    }
    Ok(board)
}

/// Show the leaderboard of `dataset/fold`
pub fn show(ctx: &CommandContext, dataset: &str, fold: &str) -> Result<()> {
    let board = build(ctx, dataset, fold)?;
    ctx.emit(&board)
}
