use serde::{Deserialize, Serialize};

/// Result of a single zone-transfer attempt against one nameserver.
///
/// Exactly one tag per attempt; no variant mixes data and failure. Every
/// variant is an expected, modeled outcome -- none represents a programming
/// fault, and none is ever retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The server permitted the transfer. An empty subdomain list still
    /// counts: permission is the signal, not content volume.
    Vulnerable {
        /// Discovered subdomains, deduplicated within this transfer
        subdomains: Vec<String>,
    },

    /// Connection actively refused, or the server answered with a
    /// transfer-denied response code
    SecureRefused,

    /// Protocol-level parse failure or unexpected response structure
    SecureMalformed,

    /// The attempt exceeded its deadline with no response; evidence of
    /// strict filtering, not a transient fault
    SecureTimeout,

    /// The transport itself was unreachable (no route, network down, or an
    /// IP target that failed its reverse-lookup liveness check)
    NetworkUnreachable,

    /// The target name could not be resolved at all
    TargetUnresolvable,
}

impl ProbeOutcome {
    /// Returns true if the server permitted the transfer
    #[must_use]
    pub const fn is_vulnerable(&self) -> bool {
        matches!(self, Self::Vulnerable { .. })
    }

    /// The secure-classification reason this outcome contributes to a
    /// verdict, if any.
    ///
    /// A permitted-but-empty transfer maps to [`SecureReason::EmptyZone`];
    /// a transfer that yielded subdomains maps to nothing.
    #[must_use]
    pub fn secure_reason(&self) -> Option<SecureReason> {
        match self {
            Self::Vulnerable { subdomains } if subdomains.is_empty() => {
                Some(SecureReason::EmptyZone)
            }
            Self::Vulnerable { .. } => None,
            Self::SecureRefused => Some(SecureReason::Refused),
            Self::SecureMalformed => Some(SecureReason::Malformed),
            Self::SecureTimeout => Some(SecureReason::Timeout),
            Self::NetworkUnreachable | Self::TargetUnresolvable => {
                Some(SecureReason::Unreachable)
            }
        }
    }

    /// Short status label for display
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Vulnerable { .. } => "transfer permitted",
            Self::SecureRefused => "transfer refused",
            Self::SecureMalformed => "malformed response",
            Self::SecureTimeout => "timed out",
            Self::NetworkUnreachable => "unreachable",
            Self::TargetUnresolvable => "unresolvable",
        }
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vulnerable { subdomains } => {
                write!(f, "transfer permitted ({} subdomains)", subdomains.len())
            }
            other => f.write_str(other.label()),
        }
    }
}

/// Why a scan classified as secure.
///
/// Ordered by reporting specificity: a permitted-but-empty transfer is the
/// strongest observation short of vulnerable, then a timeout (strict
/// filtering), then a malformed denial, then an active refusal, then plain
/// unreachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecureReason {
    /// The transfer was permitted but the zone held no non-apex nodes
    EmptyZone,
    /// No response within the deadline
    Timeout,
    /// Protocol-level parse failure
    Malformed,
    /// Active refusal or transfer-denied response
    Refused,
    /// Transport unreachable
    Unreachable,
}

impl SecureReason {
    /// Reporting specificity; higher wins when aggregating a verdict
    #[must_use]
    pub const fn specificity(self) -> u8 {
        match self {
            Self::EmptyZone => 5,
            Self::Timeout => 4,
            Self::Malformed => 3,
            Self::Refused => 2,
            Self::Unreachable => 1,
        }
    }
}

impl std::fmt::Display for SecureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::EmptyZone => "transfer permitted but zone is empty",
            Self::Timeout => "timed out",
            Self::Malformed => "malformed response",
            Self::Refused => "refused",
            Self::Unreachable => "unreachable",
        };
        f.write_str(s)
    }
}
