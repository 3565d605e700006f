//! Authoritative nameserver resolution.
//!
//! Turns a target into the ordered set of nameserver IPs to probe. Literal
//! IP targets short-circuit: the "nameserver" is the target itself and no
//! query is issued.

use std::net::{IpAddr, SocketAddr};

use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{Name, RData, RecordType};
use hickory_resolver::TokioResolver;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use zonecheck_core::{is_ip, Result, ScanError};

use crate::transfer::ProbeConfig;
use crate::wire;

/// Resolve the authoritative nameserver IPs for `target`.
///
/// The NS query goes to `resolver_ip`; each returned NS hostname is then
/// forward-resolved to its first IPv4 address through the system resolver,
/// preserving the NS answer order.
///
/// # Errors
///
/// Returns [`ScanError::TargetUnresolvable`] when the resolver reports the
/// name does not exist or no nameserver IP can be produced. The caller must
/// treat that as a resolution failure and attempt no transfer.
pub async fn resolve_nameservers(
    target: &str,
    resolver_ip: IpAddr,
    config: &ProbeConfig,
) -> Result<Vec<IpAddr>> {
    if is_ip(target) {
        let addr: IpAddr = target
            .parse()
            .map_err(|_| ScanError::InvalidTarget(target.to_string()))?;
        debug!(%target, "target is a literal address, probing it directly");
        return Ok(vec![addr]);
    }

    let name = Name::from_utf8(target).map_err(|_| ScanError::InvalidTarget(target.to_string()))?;

    let hosts = ns_query(name, resolver_ip, config)
        .await
        .ok_or_else(|| ScanError::TargetUnresolvable {
            target: target.to_string(),
        })?;

    let addrs = forward_resolve(&hosts).await;
    if addrs.is_empty() {
        return Err(ScanError::TargetUnresolvable {
            target: target.to_string(),
        });
    }
    Ok(addrs)
}

/// NS query against the chosen resolver. `None` covers every failure mode:
/// unreachable resolver, error response code, or an answer with no NS
/// records.
async fn ns_query(name: Name, resolver_ip: IpAddr, config: &ProbeConfig) -> Option<Vec<Name>> {
    let addr = SocketAddr::new(resolver_ip, config.port);
    debug!(resolver = %addr, query = %name, "querying NS records");

    let mut stream = timeout(config.timeout, TcpStream::connect(addr))
        .await
        .ok()?
        .ok()?;

    let query = wire::build_query(name, RecordType::NS, true);
    timeout(config.timeout, wire::write_message(&mut stream, &query))
        .await
        .ok()?
        .ok()?;
    let response = timeout(config.timeout, wire::read_message(&mut stream))
        .await
        .ok()?
        .ok()??;

    if response.response_code() != ResponseCode::NoError {
        debug!(code = %response.response_code(), "resolver returned an error");
        return None;
    }

    let hosts: Vec<Name> = response
        .answers()
        .iter()
        .filter_map(|record| match record.data() {
            RData::NS(ns) => Some(ns.0.clone()),
            _ => None,
        })
        .collect();

    if hosts.is_empty() {
        None
    } else {
        Some(hosts)
    }
}

/// Forward-resolve each NS hostname to its first IPv4 address, dropping
/// hosts that do not resolve.
async fn forward_resolve(hosts: &[Name]) -> Vec<IpAddr> {
    let Ok(builder) = TokioResolver::builder_tokio() else {
        return Vec::new();
    };
    let resolver = builder.build();

    let mut addrs = Vec::with_capacity(hosts.len());
    for host in hosts {
        match resolver.ipv4_lookup(host.clone()).await {
            Ok(lookup) => {
                if let Some(a) = lookup.iter().next() {
                    addrs.push(IpAddr::V4(a.0));
                }
            }
            Err(e) => {
                debug!(host = %host, error = %e, "nameserver hostname did not resolve");
            }
        }
    }
    addrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::{Message, MessageType, OpCode};
    use hickory_proto::rr::rdata::NS;
    use hickory_proto::rr::Record;
    use hickory_proto::serialize::binary::BinDecodable;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config(port: u16) -> ProbeConfig {
        ProbeConfig {
            timeout: Duration::from_millis(500),
            port,
        }
    }

    /// Accept one connection, read the framed NS query, answer with `rcode`
    /// and one NS record per host in `hosts`, in order.
    async fn serve_ns_once(listener: TcpListener, rcode: ResponseCode, hosts: Vec<&'static str>) {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut len_bytes = [0u8; 2];
        socket.read_exact(&mut len_bytes).await.unwrap();
        let mut body = vec![0u8; usize::from(u16::from_be_bytes(len_bytes))];
        socket.read_exact(&mut body).await.unwrap();
        let request = Message::from_bytes(&body).unwrap();

        let mut response = Message::new();
        response.set_id(request.id());
        response.set_message_type(MessageType::Response);
        response.set_op_code(OpCode::Query);
        response.set_response_code(rcode);
        for query in request.queries() {
            response.add_query(query.clone());
            for host in &hosts {
                let ns = NS(Name::from_utf8(host).unwrap());
                response.add_answer(Record::from_rdata(
                    query.name().clone(),
                    3600,
                    RData::NS(ns),
                ));
            }
        }

        let body = response.to_vec().unwrap();
        let mut framed = Vec::with_capacity(body.len() + 2);
        framed.extend_from_slice(&u16::try_from(body.len()).unwrap().to_be_bytes());
        framed.extend_from_slice(&body);
        socket.write_all(&framed).await.unwrap();
        socket.flush().await.unwrap();
    }

    #[tokio::test]
    async fn ns_answer_order_is_preserved() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(serve_ns_once(
            listener,
            ResponseCode::NoError,
            vec!["ns2.example.com.", "ns1.example.com."],
        ));

        let name = Name::from_utf8("example.com").unwrap();
        let hosts = ns_query(name, "127.0.0.1".parse().unwrap(), &config(port))
            .await
            .unwrap();
        assert_eq!(
            hosts,
            vec![
                Name::from_utf8("ns2.example.com.").unwrap(),
                Name::from_utf8("ns1.example.com.").unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn nxdomain_maps_to_target_unresolvable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(serve_ns_once(listener, ResponseCode::NXDomain, vec![]));

        let err = resolve_nameservers("example.com", "127.0.0.1".parse().unwrap(), &config(port))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::TargetUnresolvable { .. }));
    }

    #[tokio::test]
    async fn answer_without_ns_records_maps_to_target_unresolvable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(serve_ns_once(listener, ResponseCode::NoError, vec![]));

        let err = resolve_nameservers("example.com", "127.0.0.1".parse().unwrap(), &config(port))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::TargetUnresolvable { .. }));
    }

    #[tokio::test]
    async fn literal_ipv4_target_is_its_own_nameserver() {
        let config = ProbeConfig::default();
        let resolver: IpAddr = "1.1.1.1".parse().unwrap();
        let addrs = resolve_nameservers("192.0.2.7", resolver, &config)
            .await
            .unwrap();
        assert_eq!(addrs, vec!["192.0.2.7".parse::<IpAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn full_form_ipv6_target_is_its_own_nameserver() {
        let config = ProbeConfig::default();
        let resolver: IpAddr = "1.1.1.1".parse().unwrap();
        let addrs = resolve_nameservers("2001:0db8:0:0:0:0:0:1", resolver, &config)
            .await
            .unwrap();
        assert_eq!(addrs, vec!["2001:db8::1".parse::<IpAddr>().unwrap()]);
    }
}
