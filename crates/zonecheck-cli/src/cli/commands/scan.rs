//! Scan a single target.

use colored::Colorize;
use zonecheck_probe::Scanner;

use super::Context;
use crate::cli::exit;
use crate::output;
use crate::sanitize::sanitize;

/// Scan one target and print the result.
///
/// Returns the exit code for this target; the caller decides whether it
/// terminates the process or folds into a batch.
pub async fn execute(ctx: &Context, target: &str) -> u8 {
    let target = sanitize(target);
    if target.is_empty() {
        eprintln!("{} target is empty after sanitization", "error:".red().bold());
        return exit::USAGE;
    }

    let mut scanner = Scanner::new().timeout(ctx.timeout);
    if let Some(resolver) = ctx.resolver {
        scanner = scanner.resolver(resolver);
    }

    let result = scanner.scan(&target).await;
    match &result {
        Ok(report) => output::print_report(report, ctx.format, ctx.list_subdomains),
        Err(err) => output::print_scan_error(&target, err, ctx.format),
    }
    exit::code_for(&result)
}
