//! Outcome taxonomy and scan report types.

mod outcome;
mod report;

pub use outcome::{ProbeOutcome, SecureReason};
pub use report::{NameserverProbe, ScanReport, ScanVerdict};
