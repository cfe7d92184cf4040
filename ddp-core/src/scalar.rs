//! Classification of leaf strings found in export documents
//!
//! Used by the flattener to tag string leaves so inspection tooling can
//! spot timestamps, IP addresses and URLs without knowing the schema.

use once_cell::sync::Lazy;
use regex::Regex;
use std::net::IpAddr;

use crate::timestamp;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:https?://|www\.)[^\s<>"']+"#).expect("valid URL pattern")
});

static URL_EXACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^(?:https?://|www\.)[^\s<>"']+$"#).expect("valid URL pattern")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid email pattern")
});

static EMAIL_EXACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("valid email pattern")
});

/// Classification of one leaf string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeafClasses {
    /// The string reads as a timestamp.
    pub is_timestamp: bool,
    /// The string is a valid IPv4 or IPv6 address.
    pub is_ip: bool,
    /// The string contains at least one URL.
    pub has_url: bool,
}

/// Classify a single leaf string.
pub fn classify(s: &str) -> LeafClasses {
    LeafClasses {
        is_timestamp: timestamp::is_timestamp(s),
        is_ip: is_ip_address(s),
        has_url: has_url(s),
    }
}

/// Whether the string is a valid IPv4 or IPv6 address.
pub fn is_ip_address(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

/// Whether the string contains a URL anywhere.
pub fn has_url(s: &str) -> bool {
    URL_RE.is_match(s)
}

/// Whether the whole string is a URL.
pub fn is_url(s: &str) -> bool {
    URL_EXACT_RE.is_match(s)
}

/// Whether the string contains an email address anywhere.
pub fn has_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Whether the whole string is an email address.
pub fn is_email(s: &str) -> bool {
    EMAIL_EXACT_RE.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_addresses() {
        assert!(is_ip_address("192.168.1.1"));
        assert!(is_ip_address("2001:db8::8a2e:370:7334"));
        assert!(!is_ip_address("999.0.0.1"));
        assert!(!is_ip_address("not an ip"));
        assert!(!is_ip_address(""));
    }

    #[test]
    fn test_url_containment() {
        assert!(has_url("see https://example.com/profile for details"));
        assert!(has_url("www.example.com"));
        assert!(!has_url("no links here"));
    }

    #[test]
    fn test_url_exact() {
        assert!(is_url("https://example.com/profile?tab=posts"));
        assert!(!is_url("see https://example.com inline"));
    }

    #[test]
    fn test_email() {
        assert!(has_email("contact me at someone@example.com please"));
        assert!(is_email("someone@example.com"));
        assert!(!is_email("someone@example.com and more"));
        assert!(!has_email("nothing at all"));
    }

    #[test]
    fn test_classify_timestamp_string() {
        let classes = classify("2022-01-15T10:30:00Z");
        assert!(classes.is_timestamp);
        assert!(!classes.is_ip);
        assert!(!classes.has_url);
    }

    #[test]
    fn test_classify_plain_string() {
        assert_eq!(classify("just some caption text"), LeafClasses::default());
    }

    #[test]
    fn test_classify_ip() {
        let classes = classify("10.0.0.1");
        assert!(classes.is_ip);
        assert!(!classes.has_url);
    }
}
