//! System resolver discovery.
//!
//! Reads the first `nameserver` directive from the resolver configuration,
//! falling back to a well-known public resolver when none is found.

use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use tracing::debug;

/// Used when no resolver configuration is readable.
pub const FALLBACK_RESOLVER: IpAddr = IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1));

const RESOLV_CONF: &str = "/etc/resolv.conf";

/// The local system's configured DNS resolver, or [`FALLBACK_RESOLVER`].
#[must_use]
pub fn system_resolver() -> IpAddr {
    resolver_from_path(Path::new(RESOLV_CONF))
}

/// First `nameserver` directive in `path`; first match wins.
#[must_use]
pub fn resolver_from_path(path: &Path) -> IpAddr {
    let Ok(contents) = std::fs::read_to_string(path) else {
        debug!(path = %path.display(), "resolver configuration unreadable, using fallback");
        return FALLBACK_RESOLVER;
    };

    contents
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("nameserver")?;
            rest.split_whitespace().next()?.parse::<IpAddr>().ok()
        })
        .next()
        .unwrap_or(FALLBACK_RESOLVER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn conf(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn first_nameserver_wins() {
        let file = conf("nameserver 10.0.0.53\nnameserver 10.0.0.54\n");
        assert_eq!(
            resolver_from_path(file.path()),
            "10.0.0.53".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn comments_and_other_directives_ignored() {
        let file = conf(
            "# local overrides\nsearch example.internal\noptions ndots:2\nnameserver 192.0.2.53\n",
        );
        assert_eq!(
            resolver_from_path(file.path()),
            "192.0.2.53".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn unparsable_directive_skipped() {
        let file = conf("nameserver not-an-ip\nnameserver 192.0.2.53\n");
        assert_eq!(
            resolver_from_path(file.path()),
            "192.0.2.53".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn missing_directive_falls_back() {
        let file = conf("search example.internal\n");
        assert_eq!(resolver_from_path(file.path()), FALLBACK_RESOLVER);
    }

    #[test]
    fn missing_file_falls_back() {
        assert_eq!(
            resolver_from_path(Path::new("/nonexistent/resolv.conf")),
            FALLBACK_RESOLVER
        );
    }
}
