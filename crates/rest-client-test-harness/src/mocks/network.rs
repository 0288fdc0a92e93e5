//! HTTP mocking utilities using wiremock.

use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Header checked by the `/private` route.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Key accepted by the `/private` route.
pub const API_KEY: &str = "helloWorld42!";

/// HTTP mock server wrapper with convenience methods
pub struct TestHttpServer {
    server: MockServer,
}

impl TestHttpServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Start a server with the REST API routes mounted.
    pub async fn start_rest_api() -> Self {
        let server = Self::start().await;
        server.mount_rest_api().await;
        server
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Mount the REST API used by client tests.
    ///
    /// | route              | status | body                     |
    /// |--------------------|--------|--------------------------|
    /// | `DELETE /delete/:id` | 204  | empty                    |
    /// | `GET /get/:id`     | 200    | `{"id": id}`             |
    /// | `HEAD /head/:id`   | 204    | empty, `success: true`   |
    /// | `OPTIONS /options` | 204    | empty, `success: true`   |
    /// | `PATCH /patch/:id` | 200    | `{"id": id, ..body}`     |
    /// | `POST /post/:id`   | 201    | `{"id": id, ..body}`     |
    /// | `PUT /put/:id`     | 200    | `{"id": id, ..body}`     |
    /// | `GET /private`     | 200/401/403 | checks `x-api-key`  |
    pub async fn mount_rest_api(&self) {
        let routes = [
            ("DELETE", r"^/delete/[^/]+$", RestRoute::Empty { status: 204 }),
            ("GET", r"^/get/[^/]+$", RestRoute::Echo { status: 200 }),
            ("HEAD", r"^/head/[^/]+$", RestRoute::Flagged { status: 204 }),
            ("OPTIONS", r"^/options$", RestRoute::Flagged { status: 204 }),
            ("PATCH", r"^/patch/[^/]+$", RestRoute::Echo { status: 200 }),
            ("POST", r"^/post/[^/]+$", RestRoute::Echo { status: 201 }),
            ("PUT", r"^/put/[^/]+$", RestRoute::Echo { status: 200 }),
            ("GET", r"^/private$", RestRoute::Private),
        ];

        for (verb, pattern, route) in routes {
            Mock::given(method(verb))
                .and(path_regex(pattern))
                .respond_with(route)
                .mount(&self.server)
                .await;
        }
    }

    /// Get all received requests
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<Request> {
        self.received_requests().await.pop()
    }
}

/// Responders behind [`TestHttpServer::mount_rest_api`].
#[derive(Debug, Clone, Copy)]
enum RestRoute {
    /// Status only.
    Empty { status: u16 },
    /// Status plus a `success: true` response header.
    Flagged { status: u16 },
    /// `{"id": <last path segment>}` merged with the JSON request body.
    Echo { status: u16 },
    /// Guarded by [`API_KEY_HEADER`].
    Private,
}

impl Respond for RestRoute {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match *self {
            RestRoute::Empty { status } => ResponseTemplate::new(status),
            RestRoute::Flagged { status } => {
                ResponseTemplate::new(status).insert_header("success", "true")
            }
            RestRoute::Echo { status } => {
                ResponseTemplate::new(status).set_body_json(echo_body(request))
            }
            RestRoute::Private => {
                let key = request
                    .headers
                    .get(API_KEY_HEADER)
                    .and_then(|v| v.to_str().ok());
                match key {
                    None => responses::error(401, &format!("Missing header {}", API_KEY_HEADER)),
                    Some(key) if key != API_KEY => {
                        responses::error(403, &format!("Invalid header {}", API_KEY_HEADER))
                    }
                    Some(_) => ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({ "private": true })),
                }
            }
        }
    }
}

fn echo_body(request: &Request) -> serde_json::Value {
    let id = request
        .url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string();

    let mut body = serde_json::Map::new();
    body.insert("id".to_string(), serde_json::Value::String(id));

    if let Ok(serde_json::Value::Object(fields)) =
        serde_json::from_slice::<serde_json::Value>(&request.body)
    {
        body.extend(fields);
    }

    serde_json::Value::Object(body)
}

/// Common response templates
pub mod responses {
    use wiremock::ResponseTemplate;

    /// A JSON `{"error": message}` body with the given status.
    pub fn error(status: u16, message: &str) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_json(serde_json::json!({ "error": message }))
    }
}
