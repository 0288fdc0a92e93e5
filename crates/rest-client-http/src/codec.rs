//! Body codecs selected by MIME type.
//!
//! When a request is dispatched, the merged `content-type` header picks a
//! codec from the registry. No matching codec means no transformation.

use crate::body::Body;
use crate::headers::names;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Transforms a request body before it reaches the transport.
pub trait BodyCodec: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Encode the body. Bodies the codec does not handle are returned as-is.
    fn encode(&self, body: Body) -> Body;
}

/// Serializes structured bodies to JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl BodyCodec for JsonCodec {
    fn name(&self) -> &str {
        "json"
    }

    fn encode(&self, body: Body) -> Body {
        match body {
            Body::Value(value) if value.is_object() || value.is_array() => {
                Body::Text(value.to_string())
            }
            other => other,
        }
    }
}

/// Codecs keyed by exact `content-type` value.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<dyn BodyCodec>>,
}

impl CodecRegistry {
    /// A registry with no codecs: every body passes through.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The default registry: JSON under `application/json`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(names::APPLICATION_JSON, JsonCodec);
        registry
    }

    /// Register a codec for a MIME type, replacing any previous one.
    pub fn register(&mut self, mime: impl Into<String>, codec: impl BodyCodec + 'static) {
        self.codecs.insert(mime.into(), Arc::new(codec));
    }

    /// Find the codec for a content type.
    pub fn lookup(&self, content_type: &str) -> Option<&Arc<dyn BodyCodec>> {
        self.codecs.get(content_type)
    }

    /// Encode `body` for `content_type`, or return it unchanged.
    pub fn encode(&self, content_type: Option<&str>, body: Body) -> Body {
        if body.is_empty() {
            return body;
        }
        match content_type.and_then(|ct| self.lookup(ct)) {
            Some(codec) => {
                tracing::debug!(codec = codec.name(), "encoding request body");
                codec.encode(body)
            }
            None => body,
        }
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut mimes: Vec<&String> = self.codecs.keys().collect();
        mimes.sort();
        f.debug_struct("CodecRegistry").field("codecs", &mimes).finish()
    }
}
