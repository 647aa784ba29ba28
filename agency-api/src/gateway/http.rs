//! Production backend: real HTTP calls against the configured API.

use super::{ApiMode, ApiRequest, Backend, ResponseShape};
use crate::config::ApiSettings;
use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::session::Session;
use agency_core::observability::TracedClientExt;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub struct HttpBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
    session: Arc<Session>,
}

impl HttpBackend {
    pub fn new(settings: &ApiSettings, session: Arc<Session>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::unexpected(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout: settings.timeout(),
            session,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn exchange(&self, request: ApiRequest, url: &str) -> Result<ApiResponse<Value>, ApiError> {
        let mut builder = self
            .client
            .traced_request(request.method.clone(), url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token().await {
            builder = builder.bearer_auth(token.expose_secret());
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        tracing::debug!(method = %request.method, url = %url, "Sending API request");

        let response = builder
            .send()
            .await
            .map_err(|e| classify_transport(e, url))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_transport(e, url))?;

        if !status.is_success() {
            return Err(http_failure(status, &bytes));
        }

        let malformed = |e: serde_json::Error| {
            ApiError::unexpected_with(
                format!("Malformed response from {}: {}", url, e),
                Value::String(String::from_utf8_lossy(&bytes).into_owned()),
            )
        };

        match request.shape {
            ResponseShape::Envelope => serde_json::from_slice(&bytes).map_err(malformed),
            ResponseShape::Bare => {
                let body: Value = serde_json::from_slice(&bytes).map_err(malformed)?;
                if is_envelope(&body) {
                    serde_json::from_value(body).map_err(malformed)
                } else {
                    Ok(ApiResponse::ok(body))
                }
            }
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn invoke(&self, request: ApiRequest) -> Result<ApiResponse<Value>, ApiError> {
        let url = self.url_for(&request.path);

        match tokio::time::timeout(self.timeout, self.exchange(request, &url)).await {
            Ok(result) => result,
            // Dropping the exchange future aborts the in-flight request.
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                Err(ApiError::Network {
                    message: format!("Request timed out after {}ms", timeout_ms),
                    details: Some(json!({ "url": url, "timeoutMs": timeout_ms })),
                })
            }
        }
    }

    fn mode(&self) -> ApiMode {
        ApiMode::Production
    }
}

/// Bare routes may still answer with an envelope.
fn is_envelope(body: &Value) -> bool {
    body.get("success").map(Value::is_boolean).unwrap_or(false)
}

/// Non-2xx: prefer the server's own message, fall back to the status line.
/// A missing or malformed body becomes `{}`.
fn http_failure(status: StatusCode, body: &[u8]) -> ApiError {
    let details: Value = serde_json::from_slice(body).unwrap_or_else(|_| json!({}));
    let message = details
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| details.get("error").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        });

    ApiError::http(status.as_u16(), message, details)
}

fn classify_transport(err: reqwest::Error, url: &str) -> ApiError {
    if err.is_timeout() {
        return ApiError::network(format!("Request to {} timed out", url));
    }
    if err.is_connect() || err.is_request() {
        tracing::error!(url = %url, error = %err, "API unreachable");
        return ApiError::Network {
            message: format!(
                "Network error: unable to reach {}. The backend may not be running.",
                url
            ),
            details: Some(json!({ "cause": err.to_string() })),
        };
    }
    ApiError::unexpected_with(
        format!("Unexpected error calling {}", url),
        json!({ "cause": err.to_string() }),
    )
}
