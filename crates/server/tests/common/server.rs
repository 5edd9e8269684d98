//! Server test utilities.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use filecat_core::config::AppConfig;
use filecat_registry::FileRegistry;
use filecat_server::{AppState, create_router};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// A test server wrapping a router over a fresh in-memory registry.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with an empty registry.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = AppConfig::for_testing();
        modifier(&mut config);

        filecat_server::metrics::register_metrics();

        let registry = filecat_registry::from_config(&config.registry)
            .await
            .expect("Failed to create registry");
        let state = AppState::new(config, registry);
        let router = create_router(state.clone());

        Self { router, state }
    }

    /// Get access to the underlying registry.
    pub fn registry(&self) -> Arc<dyn FileRegistry> {
        self.state.registry.clone()
    }
}

/// Response captured by the request helpers.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl TestResponse {
    /// Parse the body as JSON, `Null` when empty or not JSON.
    pub fn json(&self) -> Value {
        if self.body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&self.body).unwrap_or(Value::Null)
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("body is not UTF-8")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Send a request with optional headers and a raw body.
#[allow(dead_code)]
pub async fn send(
    router: &axum::Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Body,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = builder.body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Helper to make JSON requests.
#[allow(dead_code)]
pub async fn json_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = match body {
        Some(v) => {
            send(
                router,
                method,
                uri,
                &[("Content-Type", "application/json")],
                Body::from(serde_json::to_vec(&v).unwrap()),
            )
            .await
        }
        None => send(router, method, uri, &[], Body::empty()).await,
    };

    (response.status, response.json())
}
