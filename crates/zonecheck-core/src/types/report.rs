use std::collections::BTreeSet;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::{ProbeOutcome, SecureReason};

/// One transfer attempt against one authoritative nameserver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameserverProbe {
    /// Nameserver that was probed
    pub addr: IpAddr,
    /// Classified result of the attempt
    pub outcome: ProbeOutcome,
}

/// Aggregate result of probing every resolved nameserver for one target.
///
/// Probes appear in the order the nameservers resolved. Subdomain sets are
/// deduplicated per transfer but kept per-nameserver here; use
/// [`ScanReport::subdomains`] for the union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Domain or IP literal that was scanned
    pub target: String,
    /// Resolver used for the NS query
    pub resolver: IpAddr,
    /// Per-nameserver outcomes, in resolution order
    pub probes: Vec<NameserverProbe>,
}

impl ScanReport {
    /// Union of discovered subdomains across all nameservers, ordered.
    #[must_use]
    pub fn subdomains(&self) -> BTreeSet<&str> {
        self.probes
            .iter()
            .filter_map(|probe| match &probe.outcome {
                ProbeOutcome::Vulnerable { subdomains } => Some(subdomains),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Overall verdict for the target.
    ///
    /// Vulnerable if any nameserver permitted a transfer that yielded at
    /// least one subdomain; otherwise secure, annotated with the most
    /// specific reason observed across the probes.
    #[must_use]
    pub fn verdict(&self) -> ScanVerdict {
        let subdomain_count = self.subdomains().len();
        if subdomain_count > 0 {
            return ScanVerdict::Vulnerable { subdomain_count };
        }

        let reason = self
            .probes
            .iter()
            .filter_map(|probe| probe.outcome.secure_reason())
            .max_by_key(|reason| reason.specificity())
            .unwrap_or(SecureReason::Unreachable);
        ScanVerdict::Secure { reason }
    }
}

/// Final classification of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ScanVerdict {
    /// At least one nameserver leaked a non-empty zone
    Vulnerable {
        /// Number of distinct subdomains discovered across all nameservers
        subdomain_count: usize,
    },
    /// No nameserver leaked anything
    Secure {
        /// Most specific secure classification observed
        reason: SecureReason,
    },
}

impl ScanVerdict {
    /// Returns true for the vulnerable classification
    #[must_use]
    pub const fn is_vulnerable(&self) -> bool {
        matches!(self, Self::Vulnerable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(addr: &str, outcome: ProbeOutcome) -> NameserverProbe {
        NameserverProbe {
            addr: addr.parse().unwrap(),
            outcome,
        }
    }

    fn report(probes: Vec<NameserverProbe>) -> ScanReport {
        ScanReport {
            target: "example.com".into(),
            resolver: "1.1.1.1".parse().unwrap(),
            probes,
        }
    }

    #[test]
    fn any_nonempty_transfer_makes_target_vulnerable() {
        let report = report(vec![
            probe("192.0.2.1", ProbeOutcome::SecureRefused),
            probe(
                "192.0.2.2",
                ProbeOutcome::Vulnerable {
                    subdomains: vec!["www.example.com".into(), "mail.example.com".into()],
                },
            ),
        ]);
        assert_eq!(
            report.verdict(),
            ScanVerdict::Vulnerable { subdomain_count: 2 }
        );
    }

    #[test]
    fn subdomains_union_deduplicates_across_nameservers() {
        let report = report(vec![
            probe(
                "192.0.2.1",
                ProbeOutcome::Vulnerable {
                    subdomains: vec!["www.example.com".into()],
                },
            ),
            probe(
                "192.0.2.2",
                ProbeOutcome::Vulnerable {
                    subdomains: vec!["www.example.com".into(), "mail.example.com".into()],
                },
            ),
        ]);
        assert_eq!(report.subdomains().len(), 2);
        assert_eq!(
            report.verdict(),
            ScanVerdict::Vulnerable { subdomain_count: 2 }
        );
    }

    #[test]
    fn secure_verdict_keeps_most_specific_reason() {
        let report = report(vec![
            probe("192.0.2.1", ProbeOutcome::SecureRefused),
            probe("192.0.2.2", ProbeOutcome::SecureTimeout),
            probe("192.0.2.3", ProbeOutcome::NetworkUnreachable),
        ]);
        assert_eq!(
            report.verdict(),
            ScanVerdict::Secure {
                reason: SecureReason::Timeout
            }
        );
    }

    #[test]
    fn refusal_and_malformed_stay_distinct() {
        let refused = report(vec![probe("192.0.2.1", ProbeOutcome::SecureRefused)]);
        let malformed = report(vec![probe("192.0.2.1", ProbeOutcome::SecureMalformed)]);
        assert_ne!(refused.verdict(), malformed.verdict());
    }

    #[test]
    fn empty_transfer_reports_empty_zone_reason() {
        let report = report(vec![probe(
            "192.0.2.1",
            ProbeOutcome::Vulnerable { subdomains: vec![] },
        )]);
        assert_eq!(
            report.verdict(),
            ScanVerdict::Secure {
                reason: SecureReason::EmptyZone
            }
        );
    }

    #[test]
    fn no_probes_defaults_to_unreachable() {
        let report = report(vec![]);
        assert_eq!(
            report.verdict(),
            ScanVerdict::Secure {
                reason: SecureReason::Unreachable
            }
        );
    }
}
