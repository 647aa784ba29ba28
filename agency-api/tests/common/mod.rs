//! Shared helpers for agency-api integration tests.
//!
//! Stub backends are axum routers served on an ephemeral port. Every request
//! they see is recorded so tests can assert on the headers the gateway sent.

#![allow(dead_code)]

use agency_api::config::ApiSettings;
use agency_api::gateway::{HttpBackend, MockBackend};
use agency_api::models::User;
use agency_api::session::Session;
use agency_api::ApiClient;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
    seen: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubServer {
    pub base_url: String,
    seen: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Answer every request with `status` and `body`.
    pub async fn respond_with(status: u16, body: &str) -> Self {
        Self::spawn(status, body, None).await
    }

    /// Like [`StubServer::respond_with`] but only after `delay`.
    pub async fn slow(delay: Duration) -> Self {
        Self::spawn(200, r#"{"success":true,"data":{}}"#, Some(delay)).await
    }

    async fn spawn(status: u16, body: &str, delay: Option<Duration>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = Canned {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
            delay,
            seen: seen.clone(),
        };
        let router = Router::new().fallback(canned_handler).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/api", port),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request reached the stub")
    }
}

async fn canned_handler(
    State(state): State<Canned>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.seen.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.to_string(),
        headers,
        body,
    });
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    (state.status, state.body).into_response()
}

/// Base URL on a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}

pub fn http_settings(base_url: &str, timeout_ms: u64) -> ApiSettings {
    ApiSettings {
        base_url: base_url.to_string(),
        timeout_ms,
        use_mock: false,
        ..Default::default()
    }
}

pub fn http_client(base_url: &str, session: Arc<Session>) -> ApiClient {
    agency_core::observability::init_test_tracing();
    ApiClient::new(http_settings(base_url, 2_000), session).expect("client")
}

pub fn mock_client() -> ApiClient {
    agency_core::observability::init_test_tracing();
    ApiClient::with_backend(
        Arc::new(MockBackend::new()),
        ApiSettings::default(),
        Arc::new(Session::in_memory()),
    )
}

pub fn http_backend(base_url: &str, timeout_ms: u64, session: Arc<Session>) -> HttpBackend {
    HttpBackend::new(&http_settings(base_url, timeout_ms), session).expect("backend")
}

pub fn demo_user() -> User {
    User {
        id: "user_1".to_string(),
        username: "demo".to_string(),
        email: Some("demo@agency.test".to_string()),
        role: Some("ACCOUNT_MANAGER".to_string()),
        organization_id: Some("org_1".to_string()),
    }
}
