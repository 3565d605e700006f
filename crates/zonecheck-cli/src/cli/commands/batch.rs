//! Scan every target listed in a file.

use std::path::Path;

use colored::Colorize;

use super::{scan, Context};
use crate::cli::exit;
use crate::sanitize::sanitize;

/// Scan each non-blank line of `path` as a target.
///
/// Lines that sanitize to nothing are skipped with a warning. A failing
/// target never aborts the batch; the process exits with the most severe
/// code observed across all targets.
pub async fn execute(ctx: &Context, path: &Path) -> u8 {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!(
                "{} cannot read {}: {err}",
                "error:".red().bold(),
                path.display()
            );
            return exit::USAGE;
        }
    };

    let mut codes = Vec::new();
    for line in contents.lines() {
        let target = sanitize(line);
        if target.is_empty() {
            if !line.trim().is_empty() {
                eprintln!("{} skipping line {line:?}", "warning:".yellow().bold());
            }
            continue;
        }
        if !codes.is_empty() {
            println!();
        }
        codes.push(scan::execute(ctx, &target).await);
    }
    exit::combine(&codes)
}
