//! Configuration for rest-client.
//!
//! A [`ClientConfig`] holds the base URL, default headers and transport
//! settings. It can be read from a YAML file with [`ConfigLoader`] (with
//! `${VAR}` / `${VAR:-default}` expansion) or assembled from
//! `REST_CLIENT_*` environment variables with [`config_from_env`].

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_invalid_until_base_url_set() {
        let config = ClientConfig::default();
        assert!(config.base_url.is_empty());
        assert!(validate(&config).is_err());
        assert!(validate(&ClientConfig::new("http://localhost:3000")).is_ok());
    }

    #[test]
    fn test_yaml_roundtrip_keeps_headers() {
        let config = ClientConfig::new("https://api.example.com/v1")
            .with_header("accept", "application/json")
            .with_header("x-api-key", "k");

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = ConfigLoader::parse(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
