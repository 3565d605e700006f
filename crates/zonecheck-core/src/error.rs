use thiserror::Error;

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that abort a scan before any transfer is attempted.
///
/// Per-nameserver transfer failures are not errors; they are modeled as
/// [`crate::ProbeOutcome`] values so that probing the remaining nameservers
/// can continue.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The resolver reported the target does not exist, or returned no
    /// reachable authoritative nameservers
    #[error("unable to resolve authoritative nameservers for {target}")]
    TargetUnresolvable {
        /// The domain or address that failed to resolve
        target: String,
    },

    /// The target string could not be encoded as a DNS name
    #[error("invalid target name: {0}")]
    InvalidTarget(String),
}

impl ScanError {
    /// Returns true if the error means the target itself could not be found
    #[must_use]
    pub const fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::TargetUnresolvable { .. } | Self::InvalidTarget(_))
    }
}
