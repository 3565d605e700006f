//! Core types for the zonecheck zone-transfer tester.
//!
//! This crate holds everything the probe pipeline and the CLI share but that
//! performs no I/O of its own:
//!
//! - **IP classification**: [`is_ip`] and friends decide whether a target is
//!   a literal address or a domain name
//! - **Outcome taxonomy**: [`ProbeOutcome`] tags the result of a single AXFR
//!   attempt; [`ScanVerdict`] aggregates outcomes across nameservers
//! - **Errors**: [`ScanError`] for failures that abort a scan
//!
//! # Example
//!
//! ```rust
//! use zonecheck_core::{is_ip, ProbeOutcome, ScanVerdict};
//!
//! assert!(is_ip("192.0.2.1"));
//! assert!(!is_ip("example.com"));
//!
//! let outcome = ProbeOutcome::SecureRefused;
//! assert!(!outcome.is_vulnerable());
//! ```

mod error;
pub mod ip;
pub mod types;

pub use error::{Result, ScanError};
pub use ip::{is_ip, is_ipv4, is_ipv6};
pub use types::*;
