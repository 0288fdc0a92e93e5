//! REST client over a pluggable HTTP transport.
//!
//! [`RestClient`] binds a base URL and default headers to a [`Transport`];
//! [`ReqwestTransport`] is the bundled network implementation.

pub mod body;
pub mod client;
pub mod codec;
pub mod headers;
pub mod method;
pub mod request;
pub mod response;
pub mod rest_client;
pub mod transport;
pub mod url;

pub use body::Body;
pub use client::{build_client, HttpConfig, HttpError, ReqwestTransport};
pub use codec::{BodyCodec, CodecRegistry, JsonCodec};
pub use headers::{names, HeaderMapping};
pub use method::Method;
pub use request::{PreparedRequest, RequestOptions};
pub use response::{parse_json, read_text, ResponseError};
pub use rest_client::{ClientError, RestClient};
pub use transport::{transport_fn, FnTransport, Pending, Transport};
pub use url::{is_absolute_url, BaseUrl};
