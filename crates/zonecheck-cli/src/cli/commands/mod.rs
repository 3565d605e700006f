//! Command implementations.

pub mod batch;
pub mod scan;

use std::net::IpAddr;
use std::time::Duration;

use crate::output::OutputFormat;

/// Shared context passed to all commands.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Resolver override from `-n`, None for the system resolver
    pub resolver: Option<IpAddr>,
    /// Per-connection timeout
    pub timeout: Duration,
    /// Output format
    pub format: OutputFormat,
    /// Print every discovered subdomain
    pub list_subdomains: bool,
}
