//! Environment variable handling.

use crate::loader::{validate, ConfigError, ConfigLoader};
use crate::types::ClientConfig;
use std::env;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("required environment variable not set: {var}")]
    NotSet { var: String },

    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    pub const REST_CLIENT_BASE_URL: &str = "REST_CLIENT_BASE_URL";
    pub const REST_CLIENT_CONFIG_PATH: &str = "REST_CLIENT_CONFIG_PATH";
    pub const REST_CLIENT_TIMEOUT_MS: &str = "REST_CLIENT_TIMEOUT_MS";
    pub const REST_CLIENT_USER_AGENT: &str = "REST_CLIENT_USER_AGENT";

    /// Prefix for default headers: `REST_CLIENT_HEADER_X_API_KEY` sets `x-api-key`.
    pub const REST_CLIENT_HEADER_PREFIX: &str = "REST_CLIENT_HEADER_";
}

/// Load `.env.local` and `.env` from `dir` into the process environment.
///
/// Variables already set are never overwritten, so `.env.local` wins over
/// `.env` and the real environment wins over both. Missing files are
/// skipped; a file that exists but fails to parse is an error.
pub fn load_env_files(dir: impl AsRef<Path>) -> Result<(), EnvError> {
    for name in [".env.local", ".env"] {
        match dotenvy::from_path(dir.as_ref().join(name)) {
            Ok(()) => {}
            Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Build a client configuration from the process environment.
///
/// Loads `.env` files from the working directory first. See
/// [`config_from_vars`] for the variables read.
pub fn config_from_env() -> Result<ClientConfig, ConfigError> {
    load_env_files(".")?;
    config_from_vars(env::vars())
}

/// Build a client configuration from a set of variables.
///
/// `REST_CLIENT_CONFIG_PATH` names a YAML file loaded as the starting point.
/// `REST_CLIENT_BASE_URL`, `REST_CLIENT_TIMEOUT_MS` and
/// `REST_CLIENT_USER_AGENT` override it, and every `REST_CLIENT_HEADER_*`
/// variable adds a default header (underscores become dashes).
pub fn config_from_vars<I>(source: I) -> Result<ClientConfig, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_vars: Vec<(String, String)> = source.into_iter().collect();
    let lookup = |name: &str| {
        env_vars
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    };

    let mut config = match lookup(vars::REST_CLIENT_CONFIG_PATH) {
        Some(path) => ConfigLoader::new(path).load()?,
        None => ClientConfig::default(),
    };

    if let Some(base_url) = lookup(vars::REST_CLIENT_BASE_URL) {
        config.base_url = base_url;
    } else if config.base_url.is_empty() {
        return Err(EnvError::NotSet {
            var: vars::REST_CLIENT_BASE_URL.to_string(),
        }
        .into());
    }

    if let Some(timeout) = lookup(vars::REST_CLIENT_TIMEOUT_MS) {
        config.http.request_timeout_ms = timeout.parse().map_err(|_| EnvError::InvalidValue {
            var: vars::REST_CLIENT_TIMEOUT_MS.to_string(),
            message: "expected integer".to_string(),
        })?;
    }

    if let Some(user_agent) = lookup(vars::REST_CLIENT_USER_AGENT) {
        config.http.user_agent = Some(user_agent);
    }

    for (key, value) in &env_vars {
        if let Some(suffix) = key.strip_prefix(vars::REST_CLIENT_HEADER_PREFIX) {
            let name = suffix.to_lowercase().replace('_', "-");
            config.headers.insert(name, value.clone());
        }
    }

    validate(&config)?;
    Ok(config)
}
