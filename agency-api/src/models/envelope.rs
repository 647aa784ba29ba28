use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Uniform response shape for every gateway call, mock or real.
///
/// Some list endpoints put totals beside `data` (`count`, `unreadCount`).
/// Those land in `meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            meta: Map::new(),
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
            meta: Map::new(),
        }
    }

    /// Failure envelope for callers that branch on `success` instead of
    /// matching on `ApiError`.
    pub fn failure(err: &ApiError) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(err.message().to_string()),
            meta: Map::new(),
        }
    }

    pub fn with_meta(mut self, key: &str, value: Value) -> Self {
        self.meta.insert(key.to_string(), value);
        self
    }

    /// Non-negative integer sibling of `data`, if the server sent one.
    pub fn meta_u64(&self, key: &str) -> Option<u64> {
        self.meta.get(key).and_then(Value::as_u64)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            error: self.error,
            meta: self.meta,
        }
    }

    /// Unwrap the payload, turning a failed or empty envelope into an error.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            let reason = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "Request failed".to_string());
            return Err(ApiError::unexpected(reason));
        }
        self.data
            .ok_or_else(|| ApiError::unexpected("Successful response is missing data"))
    }
}

impl ApiResponse<Value> {
    /// Decode `data` into the payload type of the operation.
    pub fn decode<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, ApiError> {
        let data = match self.data {
            Some(raw) => Some(serde_json::from_value::<T>(raw.clone()).map_err(|e| {
                ApiError::unexpected_with(format!("Unexpected response payload: {}", e), raw)
            })?),
            None if self.success => {
                return Err(ApiError::unexpected("Successful response is missing data"));
            }
            None => None,
        };

        Ok(ApiResponse {
            success: self.success,
            data,
            message: self.message,
            error: self.error,
            meta: self.meta,
        })
    }
}
