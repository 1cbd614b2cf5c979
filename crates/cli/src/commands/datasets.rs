//! Dataset listing commands

use anyhow::Result;

use seqbench_domain::LedgerError;

use crate::commands::CommandContext;

/// List the builtin datasets
pub fn list(ctx: &CommandContext) -> Result<()> {
    ctx.emit(&ctx.registry().describe_all())
}

/// Describe one dataset
pub fn describe(ctx: &CommandContext, id: &str) -> Result<()> {
    let registry = ctx.registry();
    let task = registry.get(id).map_err(LedgerError::from)?;
    ctx.emit(&task.describe())
}
