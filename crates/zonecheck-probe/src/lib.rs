//! Zone-transfer probe pipeline for zonecheck.
//!
//! The pipeline runs strictly in sequence for one target:
//!
//! 1. [`resolver::resolve_nameservers`] turns the target into an ordered set
//!    of authoritative nameserver IPs (or fails the scan with
//!    `TargetUnresolvable`)
//! 2. [`transfer::ZoneTransfer`] attempts one AXFR per nameserver and
//!    classifies each attempt into a `ProbeOutcome`
//! 3. [`scan::Scanner`] drives both and aggregates a `ScanReport`
//!
//! Every network operation is bounded by the configured timeout; nothing is
//! retried and nothing runs concurrently.

pub mod resolv;
pub mod resolver;
pub mod scan;
pub mod transfer;

mod wire;

pub use resolv::{system_resolver, FALLBACK_RESOLVER};
pub use scan::Scanner;
pub use transfer::{ProbeConfig, ZoneTransfer};
