//! Export command

use std::path::{Path, PathBuf};

use anyhow::Result;

use seqbench_application::ExportService;

use crate::commands::CommandContext;
use crate::output::colors;

/// Write every stored submission to `output` as CSV
pub fn run(ctx: &CommandContext, output: &Path) -> Result<PathBuf> {
    let path = ExportService::new(ctx.store()).export(output)?;
    println!(
        "{}",
        colors::success(&format!("Benchmark data successfully exported to: {}", path.display()))
    );
    Ok(path)
}
