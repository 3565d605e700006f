//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;
pub mod exit;

use std::net::IpAddr;
use std::process::ExitCode;
use std::time::Duration;

use args::Cli;
use clap::Parser;
use colored::Colorize;

use crate::sanitize::sanitize;

/// Run the CLI application.
pub async fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too; only real usage errors
            // get the invalid-invocation code
            let code = if err.use_stderr() { exit::USAGE } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "zonecheck=debug,zonecheck_probe=debug".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    let resolver = match cli.nameserver.as_deref() {
        Some(raw) => match sanitize(raw).parse::<IpAddr>() {
            Ok(ip) => Some(ip),
            Err(_) => {
                eprintln!(
                    "{} nameserver must be an IP address, got {raw:?}",
                    "error:".red().bold()
                );
                return ExitCode::from(exit::USAGE);
            }
        },
        None => None,
    };

    let ctx = commands::Context {
        resolver,
        timeout: Duration::from_secs(cli.timeout),
        format: cli.output,
        list_subdomains: cli.subdomains,
    };

    let code = match (&cli.target, &cli.file) {
        (Some(target), None) => commands::scan::execute(&ctx, target).await,
        (None, Some(path)) => commands::batch::execute(&ctx, path).await,
        // clap enforces exactly one of target/file
        _ => exit::USAGE,
    };
    ExitCode::from(code)
}
