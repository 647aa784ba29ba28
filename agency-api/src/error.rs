//! Failure taxonomy for gateway calls.
//!
//! Every failure carries `{status_code, message, details}`:
//!
//! | Kind | status_code |
//! |------|-------------|
//! | `Network` (timeout, connection refused) | `0` |
//! | `Http` (non-2xx response) | server status |
//! | `Unexpected` (anything else) | `500` |

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Http,
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Http => "http",
            ErrorKind::Unexpected => "unexpected",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Network {
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    Http {
        status_code: u16,
        message: String,
        details: Value,
    },

    #[error("{message}")]
    Unexpected {
        message: String,
        details: Option<Value>,
    },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
            details: None,
        }
    }

    pub fn http(status_code: u16, message: impl Into<String>, details: Value) -> Self {
        ApiError::Http {
            status_code,
            message: message.into(),
            details,
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        ApiError::Unexpected {
            message: message.into(),
            details: None,
        }
    }

    pub fn unexpected_with(message: impl Into<String>, details: Value) -> Self {
        ApiError::Unexpected {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network { .. } => ErrorKind::Network,
            ApiError::Http { .. } => ErrorKind::Http,
            ApiError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Network { .. } => 0,
            ApiError::Http { status_code, .. } => *status_code,
            ApiError::Unexpected { .. } => 500,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { message, .. }
            | ApiError::Http { message, .. }
            | ApiError::Unexpected { message, .. } => message,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            ApiError::Network { details, .. } | ApiError::Unexpected { details, .. } => {
                details.as_ref()
            }
            ApiError::Http { details, .. } => Some(details),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::unexpected(format!("JSON error: {}", err))
    }
}
