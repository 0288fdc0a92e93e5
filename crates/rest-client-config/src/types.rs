//! Configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration for one REST client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Absolute origin (plus optional prefix) requests are resolved against.
    pub base_url: String,
    /// Default headers sent with every request.
    pub headers: BTreeMap<String, String>,
    /// Transport settings.
    pub http: HttpSettings,
}

impl ClientConfig {
    /// Create a config for a base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Add a default header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Connection timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Whole-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// User agent override.
    pub user_agent: Option<String>,
    /// Maximum idle connections kept per host.
    pub pool_max_idle_per_host: usize,
    /// Enable gzip decompression.
    pub gzip: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            user_agent: None,
            pool_max_idle_per_host: 10,
            gzip: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_http_settings() {
        let http = HttpSettings::default();
        assert_eq!(http.connect_timeout_ms, 10_000);
        assert_eq!(http.request_timeout_ms, 30_000);
        assert!(http.user_agent.is_none());
        assert_eq!(http.pool_max_idle_per_host, 10);
        assert!(http.gzip);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
base_url: https://api.example.com
http:
  request_timeout_ms: 5000
"#;
        let config: ClientConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert!(config.headers.is_empty());
        assert_eq!(config.http.request_timeout_ms, 5000);
        assert_eq!(config.http.connect_timeout_ms, 10_000);
    }

    #[test]
    fn test_config_serializes_to_yaml() {
        let config = ClientConfig::new("http://localhost:3000").with_header("accept", "application/json");
        let yaml = serde_yaml::to_string(&config).unwrap();

        assert!(yaml.contains("base_url: http://localhost:3000"));
        assert!(yaml.contains("accept: application/json"));
        assert!(yaml.contains("http:"));
    }
}
