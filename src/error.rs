//! Custom error types and handling
//!
//! This module defines the application's error taxonomy and implements
//! conversion to the JSON response envelope for the Axum framework.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{handlers::envelope::ApiResponse, storage::ContentStoreError};

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Account is deactivated")]
    AccountInactive,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // State invariant violations (e.g. last-admin removal)
    #[error("Invariant violation: {0}")]
    Invariant(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // External service errors
    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Content store error: {0}")]
    ContentStore(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Get the stable error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::AccountInactive => "ACCOUNT_INACTIVE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Conflict(_) => "CONFLICT",
            Self::Invariant(_) => "STATE_INVARIANT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Identity(_) => "IDENTITY_PROVIDER_ERROR",
            Self::ContentStore(_) => "CONTENT_STORE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) | Self::AccountInactive => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) | Self::Conflict(_) | Self::Invariant(_) => StatusCode::CONFLICT,
            Self::Identity(_) | Self::ContentStore(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Internal(_) | Self::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log upstream/internal errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
            AppError::ContentStore(e) => {
                tracing::error!("Content store error: {}", e);
                "Content storage is unavailable".to_string()
            }
            AppError::Identity(e) => {
                tracing::error!("Identity provider error: {}", e);
                "Identity verification is unavailable".to_string()
            }
            _ => self.to_string(),
        };

        let body = ApiResponse::<()>::error(self.error_code(), message);

        (status, Json(body)).into_response()
    }
}

// Implement From for common error types
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    AppError::AlreadyExists("Resource already exists".to_string())
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ContentStoreError> for AppError {
    fn from(err: ContentStoreError) -> Self {
        match err {
            ContentStoreError::NotFound(key) => {
                // Key layout stays in the logs, not in the response
                tracing::warn!(key = %key, "Content blob missing");
                AppError::NotFound("Test case content not found".to_string())
            }
            other => AppError::ContentStore(other.to_string()),
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_denials_surface_as_not_found() {
        let err = AppError::NotFound("Problem not found".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn invariant_violations_are_conflicts_with_distinct_code() {
        let err = AppError::Invariant("last admin".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "STATE_INVARIANT");

        let dup = AppError::AlreadyExists("title".to_string());
        assert_eq!(dup.status_code(), StatusCode::CONFLICT);
        assert_ne!(dup.error_code(), err.error_code());
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let err = AppError::ContentStore("connect refused".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn missing_content_error_hides_the_storage_key() {
        let err: AppError =
            ContentStoreError::NotFound("testcases/p1/tc1/input.txt".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(!err.to_string().contains("testcases/"));
        assert!(!err.to_string().contains("input.txt"));
    }
}
