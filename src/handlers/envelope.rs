//! JSON response envelope
//!
//! Every response body is wrapped in the same envelope:
//! `{success, message, data, error, timestamp, path}` with null fields
//! omitted.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Standard response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response with a payload
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
            path: None,
        }
    }

    /// Successful response without a payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
            timestamp: Utc::now(),
            path: None,
        }
    }

    /// Error response with a stable code and a human-readable message
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: Some(code.into()),
            timestamp: Utc::now(),
            path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error_field() {
        let body = serde_json::to_value(ApiResponse::success(42, "ok")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 42);
        assert_eq!(body["message"], "ok");
        assert!(body.get("error").is_none());
        assert!(body.get("timestamp").is_some());
    }

    #[test]
    fn error_envelope_carries_stable_code() {
        let body = serde_json::to_value(ApiResponse::<()>::error("NOT_FOUND", "missing")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "NOT_FOUND");
        assert!(body.get("data").is_none());
    }
}
