//! The scan orchestrator.

use std::net::IpAddr;
use std::time::Duration;

use tracing::debug;

use zonecheck_core::{NameserverProbe, Result, ScanReport};

use crate::resolv;
use crate::resolver::resolve_nameservers;
use crate::transfer::{ProbeConfig, ZoneTransfer};

/// Drives one full scan: resolve the target's nameservers once, probe each
/// in resolution order, aggregate the outcomes.
///
/// Probes run strictly one after another; there is no concurrency and no
/// retry anywhere in the pipeline.
pub struct Scanner {
    resolver: Option<IpAddr>,
    config: ProbeConfig,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Create a scanner that discovers the system resolver on first use
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resolver: None,
            config: ProbeConfig {
                timeout: Duration::from_secs(10),
                port: 53,
            },
        }
    }

    /// Use a specific resolver for the NS query instead of the system one
    #[must_use]
    pub const fn resolver(mut self, resolver: IpAddr) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Set the per-operation deadline
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the DNS port
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Scan one target.
    ///
    /// # Errors
    ///
    /// Returns [`zonecheck_core::ScanError`] when the target's nameservers
    /// cannot be resolved; no transfer is attempted in that case.
    pub async fn scan(&self, target: &str) -> Result<ScanReport> {
        let resolver = self.resolver.unwrap_or_else(resolv::system_resolver);
        debug!(%target, %resolver, "starting scan");

        let nameservers = resolve_nameservers(target, resolver, &self.config).await?;
        debug!(%target, count = nameservers.len(), "resolved nameservers");

        let prober = ZoneTransfer::with_config(self.config.clone());
        let mut probes = Vec::with_capacity(nameservers.len());
        for addr in nameservers {
            let outcome = prober.probe(target, addr).await;
            debug!(%addr, %outcome, "probe finished");
            probes.push(NameserverProbe { addr, outcome });
        }

        Ok(ScanReport {
            target: target.to_string(),
            resolver,
            probes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonecheck_core::ScanError;

    #[tokio::test]
    async fn unresolvable_target_aborts_before_any_probe() {
        // a name that cannot be encoded never reaches the network
        let scanner = Scanner::new().resolver("127.0.0.1".parse().unwrap());
        let err = scanner.scan("a..b").await.unwrap_err();
        assert!(matches!(err, ScanError::InvalidTarget(_)));
    }

    #[tokio::test]
    async fn literal_ip_target_reports_itself_as_nameserver() {
        // resolution is offline for literal addresses; the probe itself
        // fails fast against a loopback port with nothing listening
        let scanner = Scanner::new()
            .resolver("127.0.0.1".parse().unwrap())
            .port(1)
            .timeout(Duration::from_millis(200));
        let report = scanner.scan("127.0.0.1").await.unwrap();
        assert_eq!(report.probes.len(), 1);
        assert_eq!(
            report.probes[0].addr,
            "127.0.0.1".parse::<IpAddr>().unwrap()
        );
    }
}
