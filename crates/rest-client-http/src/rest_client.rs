//! REST client bound to a single API origin.
//!
//! A [`RestClient`] owns a base URL and a set of default headers. Every call
//! resolves its target against the base URL, overlays per-call headers on the
//! defaults, encodes the body through the codec registered for the merged
//! `content-type`, and hands the result to the transport. The transport's
//! future is returned untouched.
//!
//! ```no_run
//! use rest_client_http::{RestClient, ReqwestTransport, RequestOptions};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RestClient::with_headers(
//!     "https://api.example.com/",
//!     [("Accept", "application/json")],
//!     ReqwestTransport::new()?,
//! )?;
//!
//! let user = client.get("/users/1", RequestOptions::new()).await?;
//! let created = client
//!     .post("/users", json!({"name": "ada"}), RequestOptions::new().json_content())
//!     .await?;
//! # let _ = (user, created);
//! # Ok(())
//! # }
//! ```

use crate::body::Body;
use crate::codec::{BodyCodec, CodecRegistry};
use crate::headers::{names, HeaderMapping};
use crate::method::Method;
use crate::request::{PreparedRequest, RequestOptions};
use crate::transport::{Pending, Transport};
use crate::url::BaseUrl;
use std::sync::Arc;

/// Client construction errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("baseUrl must be a valid absolute URL, got {url:?}")]
    InvalidBaseUrl { url: String },

    #[error("failed to create transport: {0}")]
    Transport(#[from] crate::client::HttpError),
}

/// Issues requests against one base URL through an injected transport.
pub struct RestClient<T: Transport> {
    base_url: BaseUrl,
    headers: HeaderMapping,
    codecs: CodecRegistry,
    transport: Arc<T>,
}

impl<T: Transport> RestClient<T> {
    /// Create a client with no default headers.
    pub fn new(base_url: &str, transport: T) -> Result<Self, ClientError> {
        Self::with_headers(base_url, HeaderMapping::new(), transport)
    }

    /// Create a client with default headers.
    ///
    /// Header names are lowercased; when two names differ only by case the
    /// last one wins.
    pub fn with_headers<I, K, V>(base_url: &str, headers: I, transport: T) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::with_shared_transport(base_url, headers, Arc::new(transport))
    }

    /// Create a client over a transport shared with other clients.
    pub fn with_shared_transport<I, K, V>(
        base_url: &str,
        headers: I,
        transport: Arc<T>,
    ) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let base_url = BaseUrl::parse(base_url).ok_or_else(|| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
        })?;

        let mut client = Self {
            base_url,
            headers: HeaderMapping::new(),
            codecs: CodecRegistry::with_defaults(),
            transport,
        };
        for (name, value) in headers {
            client.set_header(name, value);
        }

        tracing::debug!(base_url = %client.base_url, headers = client.headers.len(), "created REST client");
        Ok(client)
    }

    /// The base URL, without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// The transport requests are sent through.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Set a default header. The name is stored lowercase.
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        tracing::trace!(name = name.as_ref(), "setting default header");
        self.headers.set(name, value);
    }

    /// Get a default header by name, ignoring case.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Names of all default headers (lowercase).
    pub fn header_names(&self) -> Vec<String> {
        self.headers.names()
    }

    /// The default header mapping.
    pub fn headers(&self) -> &HeaderMapping {
        &self.headers
    }

    /// Register a body codec for a MIME type.
    pub fn register_codec(&mut self, mime: impl Into<String>, codec: impl BodyCodec + 'static) {
        self.codecs.register(mime, codec);
    }

    /// Replace the codec registry.
    pub fn set_codecs(&mut self, codecs: CodecRegistry) {
        self.codecs = codecs;
    }

    /// Resolve a target against the base URL.
    pub fn resolve_url(&self, target: &str) -> String {
        self.base_url.resolve(target)
    }

    /// Build the request a call would send, without sending it.
    ///
    /// The method defaults to `GET` when the options do not set one.
    pub fn prepare(&self, target: &str, options: RequestOptions) -> PreparedRequest {
        let RequestOptions {
            method,
            headers: call_headers,
            body,
            timeout,
            extensions,
        } = options;

        let mut headers = self.headers.clone();
        headers.merge(&call_headers);

        let body = self.codecs.encode(headers.get(names::CONTENT_TYPE), body);

        PreparedRequest {
            url: self.resolve_url(target),
            method: method.unwrap_or_default(),
            headers,
            body,
            timeout,
            extensions,
        }
    }

    /// Send a request.
    ///
    /// The request is fully built before this returns, so later header
    /// changes never affect it. The returned future resolves to the
    /// transport's own response or error.
    pub fn fetch(&self, target: &str, options: RequestOptions) -> Pending<T::Response, T::Error> {
        let request = self.prepare(target, options);
        tracing::debug!("Making {} request to: {}", request.method, request.url);

        let transport = Arc::clone(&self.transport);
        Box::pin(async move { transport.fetch(request).await })
    }

    /// Send a `DELETE` request.
    pub fn delete(&self, target: &str, options: RequestOptions) -> Pending<T::Response, T::Error> {
        self.fetch(target, options.method(Method::Delete))
    }

    /// Send a `GET` request.
    pub fn get(&self, target: &str, options: RequestOptions) -> Pending<T::Response, T::Error> {
        self.fetch(target, options.method(Method::Get))
    }

    /// Send a `HEAD` request.
    pub fn head(&self, target: &str, options: RequestOptions) -> Pending<T::Response, T::Error> {
        self.fetch(target, options.method(Method::Head))
    }

    /// Send an `OPTIONS` request.
    pub fn options(&self, target: &str, options: RequestOptions) -> Pending<T::Response, T::Error> {
        self.fetch(target, options.method(Method::Options))
    }

    /// Send a `PATCH` request with a body.
    pub fn patch(
        &self,
        target: &str,
        body: impl Into<Body>,
        options: RequestOptions,
    ) -> Pending<T::Response, T::Error> {
        self.fetch(target, options.body(body).method(Method::Patch))
    }

    /// Send a `POST` request with a body.
    pub fn post(
        &self,
        target: &str,
        body: impl Into<Body>,
        options: RequestOptions,
    ) -> Pending<T::Response, T::Error> {
        self.fetch(target, options.body(body).method(Method::Post))
    }

    /// Send a `PUT` request with a body.
    pub fn put(
        &self,
        target: &str,
        body: impl Into<Body>,
        options: RequestOptions,
    ) -> Pending<T::Response, T::Error> {
        self.fetch(target, options.body(body).method(Method::Put))
    }
}

impl RestClient<crate::client::ReqwestTransport> {
    /// Build a reqwest-backed client from loaded configuration.
    pub fn from_config(config: &rest_client_config::ClientConfig) -> Result<Self, ClientError> {
        let transport = crate::client::ReqwestTransport::with_config((&config.http).into())?;
        Self::with_headers(&config.base_url, &config.headers, transport)
    }
}

impl From<&rest_client_config::HttpSettings> for crate::client::HttpConfig {
    fn from(settings: &rest_client_config::HttpSettings) -> Self {
        let defaults = crate::client::HttpConfig::default();
        Self {
            connect_timeout: std::time::Duration::from_millis(settings.connect_timeout_ms),
            request_timeout: std::time::Duration::from_millis(settings.request_timeout_ms),
            user_agent: settings.user_agent.clone().unwrap_or(defaults.user_agent),
            pool_max_idle_per_host: settings.pool_max_idle_per_host,
            gzip: settings.gzip,
        }
    }
}

impl<T: Transport> Clone for RestClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            headers: self.headers.clone(),
            codecs: self.codecs.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> std::fmt::Debug for RestClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("codecs", &self.codecs)
            .finish_non_exhaustive()
    }
}
