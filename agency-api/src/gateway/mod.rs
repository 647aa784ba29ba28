pub mod http;
pub mod mock;
pub mod operation;

use crate::error::ApiError;
use crate::models::ApiResponse;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

pub use http::HttpBackend;
pub use mock::MockBackend;
pub use operation::{Operation, ResponseShape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Mock,
    Production,
}

impl ApiMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMode::Mock => "mock",
            ApiMode::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, query string included.
    pub path: String,
    pub body: Option<Value>,
    pub shape: ResponseShape,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            shape: ResponseShape::Envelope,
        }
    }

    pub fn for_operation(op: &Operation, body: Option<Value>) -> Self {
        Self::new(op.method(), op.path(), body).with_shape(op.response_shape())
    }

    pub fn with_shape(mut self, shape: ResponseShape) -> Self {
        self.shape = shape;
        self
    }
}

/// One call, one envelope. Implemented once against the network and once
/// against canned data, so callers never care which one they hold.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn invoke(&self, request: ApiRequest) -> Result<ApiResponse<Value>, ApiError>;

    fn mode(&self) -> ApiMode;
}
