//! Input sanitization.
//!
//! Target and nameserver strings come straight from argv or a batch file;
//! shell and protocol metacharacters are stripped before the core sees
//! them. The core assumes clean input.

/// Characters stripped from targets and nameserver strings.
const STRIPPED: &[char] = &[
    ';', ':', '!', '*', '"', '\'', '#', '$', '|', '%', '^', '&', '(', ')', '<', '>', ',', '/',
    '?', '\\', '[', ']', '{', '}', '-', '_', '+', '=',
];

/// Strip metacharacters, control characters, and surrounding whitespace.
#[must_use]
pub fn sanitize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !c.is_control() && !STRIPPED.contains(c))
        .collect()
}
