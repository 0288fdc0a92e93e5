//! Request bodies.

use bytes::Bytes;
use serde::Serialize;

/// A request body as handed to the client.
///
/// `Value` carries structured data that has not been encoded yet. Whether
/// it is turned into text depends on the codec registered for the request's
/// `content-type`; every other variant is sent as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Text(String),
    Bytes(Bytes),
    Value(serde_json::Value),
}

impl Body {
    /// Build a structured body from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Body::Value)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    /// True for JSON objects and arrays, the only bodies a codec encodes.
    ///
    /// Scalars and `null` are not structured and pass through untouched.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            Body::Value(serde_json::Value::Object(_)) | Body::Value(serde_json::Value::Array(_))
        )
    }

    /// Text content, if the body is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Structured content, if the body has not been encoded.
    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            Body::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bytes))
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Value(value)
    }
}

impl<T: Into<Body>> From<Option<T>> for Body {
    fn from(body: Option<T>) -> Self {
        body.map(Into::into).unwrap_or_default()
    }
}
