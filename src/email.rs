//! Email validation

use std::sync::LazyLock;

use regex::Regex;

// Local part, @, dotted domain, 2+ letter TLD. A failed compile (which a
// literal pattern never produces) degrades to rejecting everything.
static PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

/// Whether `value` looks like a deliverable email address.
#[must_use]
pub fn is_valid(value: &str) -> bool {
    PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid("user@example.com"));
        assert!(is_valid("first.last+tag@sub.example.co.in"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid(""));
        assert!(!is_valid("example.com"));
        assert!(!is_valid("@example.com"));
        assert!(!is_valid("user@"));
        assert!(!is_valid("user@example"));
        assert!(!is_valid("user@example.c"));
        assert!(!is_valid("user name@example.com"));
    }
}
