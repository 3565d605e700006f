//! The AXFR prober.
//!
//! One probe is one transfer attempt against one authoritative nameserver,
//! classified into exactly one [`ProbeOutcome`]. Every failure class is
//! terminal for the (target, nameserver) pair; a timeout is evidence of
//! strict filtering, never a reason to retry.

use std::collections::BTreeSet;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{Name, RecordType};
use hickory_resolver::TokioResolver;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use zonecheck_core::{is_ip, ProbeOutcome};

use crate::wire;

/// Probe settings shared by the prober and the orchestrator.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Deadline for each network operation (connect, write, each read)
    pub timeout: Duration,
    /// DNS port used for queries and transfers
    pub port: u16,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            port: 53,
        }
    }
}

/// Zone transfer prober.
pub struct ZoneTransfer {
    config: ProbeConfig,
}

impl Default for ZoneTransfer {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneTransfer {
    /// Create a prober with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ProbeConfig::default())
    }

    /// Create a prober with custom configuration
    #[must_use]
    pub const fn with_config(config: ProbeConfig) -> Self {
        Self { config }
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

    /// Attempt one AXFR for `target` against `auth_ns` and classify it.
    ///
    /// Literal-IP targets are reverse-looked-up first as a liveness check;
    /// if the address has no PTR name the transfer would be meaningless and
    /// the probe reports `NetworkUnreachable` without touching the server.
    pub async fn probe(&self, target: &str, auth_ns: IpAddr) -> ProbeOutcome {
        if is_ip(target) {
            let Ok(ip) = target.parse::<IpAddr>() else {
                return ProbeOutcome::TargetUnresolvable;
            };
            if !reverse_lookup_ok(ip).await {
                return ProbeOutcome::NetworkUnreachable;
            }
        }

        let Ok(mut apex) = Name::from_utf8(target) else {
            return ProbeOutcome::TargetUnresolvable;
        };
        apex.set_fqdn(true);

        let addr = SocketAddr::new(auth_ns, self.config.port);
        self.transfer(&apex, target, addr).await
    }

    async fn transfer(&self, apex: &Name, target: &str, addr: SocketAddr) -> ProbeOutcome {
        debug!(%addr, zone = %apex, "attempting zone transfer");

        let mut stream = match timeout(self.config.timeout, TcpStream::connect(addr)).await {
            Err(_) => return ProbeOutcome::SecureTimeout,
            Ok(Err(e)) => return classify_io(&e),
            Ok(Ok(stream)) => stream,
        };

        let query = wire::build_query(apex.clone(), RecordType::AXFR, false);
        match timeout(self.config.timeout, wire::write_message(&mut stream, &query)).await {
            Err(_) => return ProbeOutcome::SecureTimeout,
            Ok(Err(e)) => return classify_io(&e),
            Ok(Ok(())) => {}
        }

        // Collect every owner name until the second SOA closes the stream.
        let mut owners: BTreeSet<Name> = BTreeSet::new();
        let mut soa_count = 0u8;
        let mut first_message = true;

        loop {
            let message = match timeout(self.config.timeout, wire::read_message(&mut stream)).await
            {
                Err(_) => return ProbeOutcome::SecureTimeout,
                Ok(Err(e)) => return classify_io(&e),
                // closed before the closing SOA
                Ok(Ok(None)) => return ProbeOutcome::SecureMalformed,
                Ok(Ok(Some(message))) => message,
            };

            match message.response_code() {
                ResponseCode::NoError => {}
                ResponseCode::FormErr => return ProbeOutcome::SecureMalformed,
                code => {
                    // REFUSED, NOTAUTH, NXDOMAIN, SERVFAIL: the server denied
                    // the transfer
                    debug!(%addr, %code, "transfer denied");
                    return ProbeOutcome::SecureRefused;
                }
            }

            let answers = message.answers();
            if first_message {
                // a well-formed AXFR stream opens with the zone SOA
                if answers.first().map(hickory_proto::rr::Record::record_type)
                    != Some(RecordType::SOA)
                {
                    return ProbeOutcome::SecureMalformed;
                }
                first_message = false;
            }

            for record in answers {
                if record.record_type() == RecordType::SOA {
                    soa_count += 1;
                }
                owners.insert(record.name().clone());
                if soa_count == 2 {
                    break;
                }
            }

            if soa_count >= 2 {
                break;
            }
        }

        let subdomains = subdomains_from_owners(apex, &owners, target);
        debug!(%addr, count = subdomains.len(), "zone transfer permitted");
        ProbeOutcome::Vulnerable { subdomains }
    }
}

/// Map a transport error onto the outcome taxonomy (first match wins:
/// refused, malformed, timeout, unreachable).
fn classify_io(err: &io::Error) -> ProbeOutcome {
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted => ProbeOutcome::SecureRefused,
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => ProbeOutcome::SecureMalformed,
        io::ErrorKind::TimedOut => ProbeOutcome::SecureTimeout,
        // no route to host, network down, and anything else transport-level
        _ => ProbeOutcome::NetworkUnreachable,
    }
}

/// Every non-apex node name, joined back onto the target.
fn subdomains_from_owners(apex: &Name, owners: &BTreeSet<Name>, target: &str) -> Vec<String> {
    let apex_depth = apex.iter().count();
    let mut subdomains = Vec::new();
    for owner in owners {
        // the zone apex is the self node; never a subdomain
        if owner == apex || !apex.zone_of(owner) {
            continue;
        }
        // num_labels() discounts a leading `*`; count raw labels so wildcard
        // nodes survive
        let depth = owner.iter().count().saturating_sub(apex_depth);
        let node = owner
            .iter()
            .take(depth)
            .map(|label| String::from_utf8_lossy(label).into_owned())
            .collect::<Vec<_>>()
            .join(".");
        if node.is_empty() {
            continue;
        }
        subdomains.push(format!("{node}.{target}"));
    }
    subdomains
}

/// PTR liveness check for literal-IP targets.
async fn reverse_lookup_ok(ip: IpAddr) -> bool {
    let Ok(builder) = TokioResolver::builder_tokio() else {
        return false;
    };
    let resolver = builder.build();
    match resolver.reverse_lookup(ip).await {
        Ok(ptr) => ptr.iter().next().is_some(),
        Err(e) => {
            debug!(%ip, error = %e, "reverse lookup failed");
            false
        }
    }
}
