//! Config command

use anyhow::Result;

use crate::commands::CommandContext;

/// Print the effective configuration
pub fn show(ctx: &CommandContext) -> Result<()> {
    ctx.emit(&ctx.config)
}
