//! Exit-code contract.
//!
//! Calling scripts branch on these codes, so they are part of the public
//! surface: 0 vulnerable, 1 secure, 2 unreachable, 3 resolution failure,
//! 4 invalid invocation.

use zonecheck_core::{ScanError, ScanReport, ScanVerdict, SecureReason};

pub const VULNERABLE: u8 = 0;
pub const SECURE: u8 = 1;
pub const UNREACHABLE: u8 = 2;
pub const UNRESOLVABLE: u8 = 3;
pub const USAGE: u8 = 4;

/// Map a finished scan onto its exit code.
#[must_use]
pub fn code_for(result: &Result<ScanReport, ScanError>) -> u8 {
    match result {
        Ok(report) => match report.verdict() {
            ScanVerdict::Vulnerable { .. } => VULNERABLE,
            ScanVerdict::Secure {
                reason: SecureReason::Unreachable,
            } => UNREACHABLE,
            ScanVerdict::Secure { .. } => SECURE,
        },
        Err(_) => UNRESOLVABLE,
    }
}

/// Collapse per-target codes from a batch run into one.
///
/// A vulnerable finding anywhere dominates, then unreachable, then
/// resolution failures; an all-secure batch exits secure.
#[must_use]
pub fn combine(codes: &[u8]) -> u8 {
    // total order so ties cannot make the result depend on target order
    const fn severity(code: u8) -> u8 {
        match code {
            VULNERABLE => 4,
            UNREACHABLE => 3,
            UNRESOLVABLE => 2,
            USAGE => 1,
            _ => 0,
        }
    }

    codes
        .iter()
        .copied()
        .max_by_key(|&code| severity(code))
        .unwrap_or(SECURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonecheck_core::{NameserverProbe, ProbeOutcome};

    fn report(outcome: ProbeOutcome) -> Result<ScanReport, ScanError> {
        Ok(ScanReport {
            target: "example.com".into(),
            resolver: "1.1.1.1".parse().unwrap(),
            probes: vec![NameserverProbe {
                addr: "192.0.2.1".parse().unwrap(),
                outcome,
            }],
        })
    }

    #[test]
    fn verdicts_map_onto_the_documented_codes() {
        assert_eq!(
            code_for(&report(ProbeOutcome::Vulnerable {
                subdomains: vec!["www.example.com".into()],
            })),
            VULNERABLE
        );
        assert_eq!(code_for(&report(ProbeOutcome::SecureRefused)), SECURE);
        assert_eq!(
            code_for(&report(ProbeOutcome::NetworkUnreachable)),
            UNREACHABLE
        );
        assert_eq!(
            code_for(&Err(ScanError::TargetUnresolvable {
                target: "example.com".into(),
            })),
            UNRESOLVABLE
        );
    }

    #[test]
    fn batch_reports_the_most_severe_code() {
        assert_eq!(combine(&[SECURE, VULNERABLE, UNRESOLVABLE]), VULNERABLE);
        assert_eq!(combine(&[SECURE, UNRESOLVABLE, UNREACHABLE]), UNREACHABLE);
        assert_eq!(combine(&[SECURE, UNRESOLVABLE]), UNRESOLVABLE);
        assert_eq!(combine(&[SECURE, SECURE]), SECURE);
    }

    #[test]
    fn empty_batch_is_secure() {
        assert_eq!(combine(&[]), SECURE);
    }

    #[test]
    fn usage_and_secure_fold_the_same_in_either_order() {
        assert_eq!(combine(&[SECURE, USAGE]), USAGE);
        assert_eq!(combine(&[USAGE, SECURE]), USAGE);
    }
}
