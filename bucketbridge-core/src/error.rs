//! Storage error type

use thiserror::Error;

/// Errors from object store operations.
///
/// Backends map the failures they can identify onto the typed variants and
/// pass everything else through as [`StoreError::Backend`] with the original
/// error kept as the source.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Bucket not found: {0}")]
    NoSuchBucket(String),

    #[error("Object not found: {bucket}/{key}")]
    NoSuchKey { bucket: String, key: String },

    #[error("Bucket already exists: {0}")]
    BucketAlreadyExists(String),

    #[error("Bucket not empty: {0}")]
    BucketNotEmpty(String),

    #[error("Invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Body stream error: {0}")]
    Body(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }

    pub fn no_such_key(bucket: &str, key: &str) -> Self {
        Self::NoSuchKey {
            bucket: bucket.to_string(),
            key: key.to_string(),
        }
    }

    /// True for missing buckets and missing objects
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoSuchBucket(_) | Self::NoSuchKey { .. })
    }
}
