//! Shared fixtures for the integration tests.

use async_trait::async_trait;
use rest_client_http::{PreparedRequest, RestClient, Transport};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

/// Transport that records every request and answers with `status`.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    status: u16,
    requests: Arc<Mutex<Vec<PreparedRequest>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::with_status(200)
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> PreparedRequest {
        self.requests().pop().expect("no request recorded")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    type Response = u16;
    type Error = Infallible;

    async fn fetch(&self, request: PreparedRequest) -> Result<u16, Infallible> {
        self.requests.lock().unwrap().push(request);
        Ok(self.status)
    }
}

/// A client over a fresh recording transport, plus a handle to inspect it.
pub fn recording_client(
    base_url: &str,
    headers: &[(&str, &str)],
) -> (RestClient<RecordingTransport>, RecordingTransport) {
    let transport = RecordingTransport::new();
    let client = RestClient::with_headers(base_url, headers.iter().copied(), transport.clone())
        .expect("valid base url");
    (client, transport)
}
