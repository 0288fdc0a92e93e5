//! Configuration file loading and parsing.

use crate::types::ClientConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

static ENV_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("static regex"));

// Same pattern as `rest_client_http::is_absolute_url`; keep them in step.
static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+://").expect("static regex"));

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },

    #[error(transparent)]
    Env(#[from] crate::env::EnvError),
}

/// Loads a client configuration from a YAML file.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given config file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load, expand and validate the configuration.
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::NotFound {
                path: self.path.clone(),
            });
        }

        let contents = std::fs::read_to_string(&self.path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn parse(contents: &str) -> Result<ClientConfig, ConfigError> {
        let expanded = expand_env_vars(contents)?;

        let config: ClientConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        validate(&config)?;
        Ok(config)
    }

    /// Save configuration to the loader's file.
    pub fn save(&self, config: &ClientConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(&self.path, yaml)?;
        Ok(())
    }
}

/// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
pub fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut result = content.to_string();

    for cap in ENV_REFERENCE.captures_iter(content) {
        let full_match = &cap[0];
        let var_name = &cap[1];
        let default = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => match default {
                Some(d) => d.to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            },
        };

        result = result.replace(full_match, &value);
    }

    Ok(result)
}

/// Validate configuration values.
pub fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    if !ABSOLUTE_URL.is_match(&config.base_url) {
        return Err(ConfigError::ValidationError {
            message: format!("base_url must be an absolute URL, got {:?}", config.base_url),
        });
    }

    for name in config.headers.keys() {
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == ':') {
            return Err(ConfigError::ValidationError {
                message: format!("invalid header name {:?}", name),
            });
        }
    }

    if config.http.connect_timeout_ms == 0 || config.http.request_timeout_ms == 0 {
        return Err(ConfigError::ValidationError {
            message: "http timeouts must be greater than 0".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().join("client.yaml"));
        match loader.load().unwrap_err() {
            ConfigError::NotFound { path } => assert!(path.ends_with("client.yaml")),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("client.yaml");
        fs::write(
            &path,
            r#"
base_url: http://localhost:3000/
headers:
  Accept: application/json
  x-api-key: helloWorld42!
http:
  gzip: false
"#,
        )
        .unwrap();

        let config = ConfigLoader::new(&path).load().unwrap();

        assert_eq!(config.base_url, "http://localhost:3000/");
        assert_eq!(config.headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(config.headers.len(), 2);
        assert!(!config.http.gzip);
        assert_eq!(config.http.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("REST_CLIENT_TEST_EXPAND", "test_value");
        let result = expand_env_vars("key: ${REST_CLIENT_TEST_EXPAND}").unwrap();
        assert_eq!(result, "key: test_value");
        std::env::remove_var("REST_CLIENT_TEST_EXPAND");
    }

    #[test]
    fn test_env_var_default() {
        let result = expand_env_vars("key: ${REST_CLIENT_NONEXISTENT:-default}").unwrap();
        assert_eq!(result, "key: default");
    }

    #[test]
    fn test_env_var_missing_error() {
        match expand_env_vars("key: ${REST_CLIENT_MISSING_VAR}").unwrap_err() {
            ConfigError::EnvVarNotFound { var } => assert_eq!(var, "REST_CLIENT_MISSING_VAR"),
            other => panic!("Expected EnvVarNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_var_expansion_in_config() {
        std::env::set_var("REST_CLIENT_TEST_TOKEN", "secret");

        let config = ConfigLoader::parse(
            r#"
base_url: ${REST_CLIENT_TEST_ORIGIN:-https://api.example.com}
headers:
  authorization: Bearer ${REST_CLIENT_TEST_TOKEN}
"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(
            config.headers.get("authorization").map(String::as_str),
            Some("Bearer secret")
        );

        std::env::remove_var("REST_CLIENT_TEST_TOKEN");
    }

    #[test]
    fn test_validation_errors() {
        let relative = ClientConfig::new("/api");
        match validate(&relative).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("base_url")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let bad_header = ClientConfig::new("http://h").with_header("bad name", "x");
        match validate(&bad_header).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("header")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let mut zero_timeout = ClientConfig::new("http://h");
        zero_timeout.http.request_timeout_ms = 0;
        match validate(&zero_timeout).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("timeouts")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let bad_yaml = r#"
base_url: http://h
headers: [unclosed
"#;

        match ConfigLoader::parse(bad_yaml).unwrap_err() {
            ConfigError::ParseError { line, .. } => assert!(line.is_some()),
            other => panic!("Expected ParseError with line number, got {other:?}"),
        }
    }

    #[test]
    fn test_save_config() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().join("nested/client.yaml"));

        let config = ClientConfig::new("https://api.example.com").with_header("accept", "text/plain");
        loader.save(&config).unwrap();

        assert!(loader.path().exists());
        assert_eq!(loader.load().unwrap(), config);
    }
}
