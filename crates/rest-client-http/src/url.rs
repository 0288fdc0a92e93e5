//! Base URL validation and target resolution.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// `rest_client_config::validate` checks base URLs with the same pattern.
static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+://").expect("static regex"));

/// Check whether a URL is absolute (`<scheme>://...`).
pub fn is_absolute_url(value: &str) -> bool {
    ABSOLUTE_URL.is_match(value)
}

/// An absolute URL with trailing slashes removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Validate and normalize a base URL.
    ///
    /// Returns `None` when the value is not an absolute URL.
    pub fn parse(value: &str) -> Option<Self> {
        if !is_absolute_url(value) {
            return None;
        }
        Some(Self(value.trim_end_matches('/').to_string()))
    }

    /// The stored URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve a request target against this base.
    ///
    /// Absolute targets are returned unchanged. Anything else is appended
    /// verbatim, so callers must supply the leading `/`. An empty target
    /// yields the base URL itself.
    pub fn resolve(&self, target: &str) -> String {
        if is_absolute_url(target) {
            target.to_string()
        } else {
            format!("{}{}", self.0, target)
        }
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("http://x"));
        assert!(is_absolute_url("https://api.example.com/v1"));
        assert!(is_absolute_url("ws2://host"));
        assert!(!is_absolute_url("/x"));
        assert!(!is_absolute_url(""));
        assert!(!is_absolute_url("//host/path"));
        assert!(!is_absolute_url("git+ssh://host"));
        assert!(!is_absolute_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_base_url_strips_trailing_slashes() {
        assert_eq!(BaseUrl::parse("http://h/").unwrap().as_str(), "http://h");
        assert_eq!(BaseUrl::parse("http://h/api///").unwrap().as_str(), "http://h/api");
        assert_eq!(BaseUrl::parse("http://h").unwrap().as_str(), "http://h");
    }

    #[test]
    fn test_base_url_rejects_relative() {
        assert!(BaseUrl::parse("").is_none());
        assert!(BaseUrl::parse("/api").is_none());
        assert!(BaseUrl::parse("localhost:3000").is_none());
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let base = BaseUrl::parse("http://h").unwrap();
        assert_eq!(base.resolve("/a/1"), "http://h/a/1");
        assert_eq!(base.resolve("http://other/x"), "http://other/x");
        assert_eq!(base.resolve(""), "http://h");
    }

    #[test]
    fn test_resolve_does_not_insert_slash() {
        let base = BaseUrl::parse("http://h").unwrap();
        assert_eq!(base.resolve("users"), "http://husers");
        assert_eq!(base.resolve("//users"), "http://h//users");
    }

    proptest! {
        #[test]
        fn test_parse_never_keeps_trailing_slash(
            scheme in "[a-z][a-z0-9]{0,6}",
            host in "[a-z]{1,12}",
            slashes in 0usize..4,
        ) {
            let raw = format!("{}://{}{}", scheme, host, "/".repeat(slashes));
            let base = BaseUrl::parse(&raw).unwrap();
            prop_assert!(!base.as_str().ends_with('/'));
            prop_assert_eq!(base.as_str(), format!("{}://{}", scheme, host));
        }

        #[test]
        fn test_relative_paths_are_appended(path in "/[a-z0-9/]{0,20}") {
            let base = BaseUrl::parse("https://api.example.com").unwrap();
            prop_assert_eq!(base.resolve(&path), format!("https://api.example.com{}", path));
        }
    }
}
