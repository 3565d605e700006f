//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

/// zonecheck - DNS zone-transfer (AXFR) exposure tester
///
/// Resolves the authoritative nameservers of a target domain and asks each
/// one for a full zone transfer. A nameserver that answers is leaking its
/// entire zone contents to anyone who asks.
#[derive(Parser, Debug)]
#[command(name = "zonecheck", version, about, long_about = None)]
pub struct Cli {
    /// Domain name or nameserver IP to test
    #[arg(
        value_name = "TARGET",
        required_unless_present = "file",
        conflicts_with = "file"
    )]
    pub target: Option<String>,

    /// Resolver IP used for the NS lookup (default: system resolv.conf)
    #[arg(short = 'n', long = "nameserver", value_name = "IP")]
    pub nameserver: Option<String>,

    /// File with one target per line
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// List every discovered subdomain, not just the count
    #[arg(short = 's', long = "subdomains")]
    pub subdomains: bool,

    /// Per-connection timeout in seconds
    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = 10)]
    pub timeout: u64,

    /// Enable debug logging (or set RUST_LOG)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color", env = "NO_COLOR")]
    pub no_color: bool,
}
