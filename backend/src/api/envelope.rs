//! Response Envelope
//!
//! Every endpoint answers `{success, data?, error?}`. Callers treat
//! non-2xx or `success: false` as failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;
use axum::http::StatusCode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                success: true,
                data: Some(value),
                error: None,
            },
            Err(e) => Self::err(format!("Failed to serialize response: {}", e)),
        }
    }

    /// Success with an explicit `data: null` (e.g. profile before first save)
    pub fn ok_null() -> Self {
        Self {
            success: true,
            data: Some(Value::Null),
            error: None,
        }
    }

    /// Success without a data payload
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Map store errors onto HTTP statuses
pub fn error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
