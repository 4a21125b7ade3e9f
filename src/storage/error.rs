//! Content store error type

/// Errors that can occur during content store operations.
#[derive(Debug, thiserror::Error)]
pub enum ContentStoreError {
    /// The requested blob was not found.
    #[error("content not found: {0}")]
    NotFound(String),

    /// The blob exceeds the configured size limit.
    #[error("content exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },

    /// The storage provider rejected or failed the call.
    #[error("content store upstream error: {0}")]
    Upstream(String),
}
