//! Literal IP address classification.
//!
//! Decides whether a target token is an IP literal or domain text. The IPv6
//! check is deliberately simplified: it requires all eight groups to be
//! written out and does not recognize `::` zero-compression. Compressed
//! addresses therefore classify as domain text and go through NS resolution
//! like any other name.

/// Returns true if `token` is a literal IPv4 or IPv6 address.
#[must_use]
pub fn is_ip(token: &str) -> bool {
    is_ipv4(token) || is_ipv6(token)
}

/// Returns true if `token` is a dotted-quad IPv4 literal in canonical
/// decimal form.
///
/// Each group must be in `[0, 255]` and round-trip exactly, so forms that
/// parse to the same value but are written differently (`00.0.0.1`,
/// `+1.2.3.4`) are rejected.
#[must_use]
pub fn is_ipv4(token: &str) -> bool {
    let groups: Vec<&str> = token.split('.').collect();
    if groups.len() != 4 {
        return false;
    }
    groups.iter().all(|group| {
        group
            .parse::<u8>()
            .is_ok_and(|value| value.to_string() == *group)
    })
}

/// Returns true if `token` is a fully-written IPv6 literal: exactly eight
/// colon-separated groups of 1-4 hex digits each.
#[must_use]
pub fn is_ipv6(token: &str) -> bool {
    let groups: Vec<&str> = token.split(':').collect();
    if groups.len() != 8 {
        return false;
    }
    groups.iter().all(|group| {
        !group.is_empty()
            && group.len() <= 4
            && group.chars().all(|c| c.is_ascii_hexdigit())
    })
}
