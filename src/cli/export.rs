//! Export command

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{CommandContext, GlobalOptions};
use crate::error::Result;

/// Download an export and write it to disk
pub async fn run(opts: &GlobalOptions, module: &str, output: Option<PathBuf>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Exporting {}...", module));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = ctx.guard(ctx.client.export(module).await);
    spinner.finish_and_clear();
    let file = result?;

    let path = output.unwrap_or_else(|| PathBuf::from(&file.filename));
    std::fs::write(&path, &file.bytes)?;

    println!(
        "{} Saved {} ({} bytes)",
        "✓".green(),
        path.display().to_string().cyan(),
        file.bytes.len()
    );
    Ok(())
}
