//! Per-call request options and the request handed to a transport.

use crate::body::Body;
use crate::headers::{names, HeaderMapping};
use crate::method::Method;
use std::collections::BTreeMap;
use std::time::Duration;

/// Options for a single call.
///
/// Nothing here outlives the call: the options are merged with the client's
/// defaults and moved into a [`PreparedRequest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Method override. Ignored by verb shortcuts.
    pub method: Option<Method>,
    /// Per-call headers. They win over the client's defaults.
    pub headers: HeaderMapping,
    pub body: Body,
    /// Per-request timeout, applied by transports that support it.
    pub timeout: Option<Duration>,
    /// Transport-specific fields forwarded untouched.
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Add bearer token authorization.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header(names::AUTHORIZATION, value)
    }

    /// Add API key header.
    pub fn api_key(self, key: impl Into<String>) -> Self {
        self.header(names::X_API_KEY, key)
    }

    /// Set content type to JSON.
    pub fn json_content(self) -> Self {
        self.header(names::CONTENT_TYPE, names::APPLICATION_JSON)
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a transport-specific field.
    pub fn extension(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }
}

/// A fully resolved request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMapping,
    pub body: Body,
    pub timeout: Option<Duration>,
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl PreparedRequest {
    /// Look up a merged header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}
