//! Presentation layer.
//!
//! The core only classifies; every status line, color, and JSON document is
//! produced here.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use zonecheck_core::{ProbeOutcome, ScanError, ScanReport, ScanVerdict};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable status lines with colors
    #[default]
    Pretty,
    /// One JSON document per target
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ScanReport,
    verdict: ScanVerdict,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    target: &'a str,
    error: String,
}

/// Print one finished scan.
pub fn print_report(report: &ScanReport, format: OutputFormat, list_subdomains: bool) {
    match format {
        OutputFormat::Json => {
            let doc = JsonReport {
                report,
                verdict: report.verdict(),
            };
            match serde_json::to_string_pretty(&doc) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("{} {e}", "error:".red().bold()),
            }
        }
        OutputFormat::Pretty => print_pretty(report, list_subdomains),
    }
}

fn print_pretty(report: &ScanReport, list_subdomains: bool) {
    println!("{} {}", "Resolver:".bold(), report.resolver);
    println!("{} {}", "Target:  ".bold(), report.target.cyan());

    for probe in &report.probes {
        println!("  {:<39} {}", probe.addr, outcome_line(&probe.outcome));
    }

    match report.verdict() {
        ScanVerdict::Vulnerable { subdomain_count } => {
            println!(
                "{} is {} to zone transfers ({subdomain_count} subdomains)",
                report.target,
                "VULNERABLE".red().bold(),
            );
            if list_subdomains {
                for subdomain in report.subdomains() {
                    println!("    {}", subdomain.yellow());
                }
            }
        }
        ScanVerdict::Secure { reason } => {
            println!(
                "{} is {} against zone transfers ({reason})",
                report.target,
                "secure".green().bold(),
            );
        }
    }
}

fn outcome_line(outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Vulnerable { .. } => outcome.to_string().red().to_string(),
        ProbeOutcome::SecureRefused | ProbeOutcome::SecureMalformed | ProbeOutcome::SecureTimeout => {
            outcome.to_string().green().to_string()
        }
        ProbeOutcome::NetworkUnreachable | ProbeOutcome::TargetUnresolvable => {
            outcome.to_string().yellow().to_string()
        }
    }
}

/// Print a scan that aborted before probing.
pub fn print_scan_error(target: &str, err: &ScanError, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let doc = JsonFailure {
                target,
                error: err.to_string(),
            };
            match serde_json::to_string_pretty(&doc) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("{} {e}", "error:".red().bold()),
            }
        }
        OutputFormat::Pretty => {
            eprintln!(
                "{} {err}. Check the domain name and your network connection.",
                "lookup failure:".red().bold()
            );
        }
    }
}
