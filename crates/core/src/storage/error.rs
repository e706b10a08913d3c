//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
///
/// Each variant carries the backend's rendered error chain in `detail` so
/// callers can surface it without holding onto SDK types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Bucket existence probe failed.
    #[error("bucket check failed for '{bucket}': {detail}")]
    BucketCheck {
        /// Bucket that was probed.
        bucket: String,
        /// Backend error description.
        detail: String,
    },

    /// Bucket creation failed.
    #[error("bucket creation failed for '{bucket}': {detail}")]
    BucketCreate {
        /// Bucket that could not be created.
        bucket: String,
        /// Backend error description.
        detail: String,
    },

    /// Object write failed.
    #[error("upload failed for object '{key}': {detail}")]
    Upload {
        /// Object key that could not be written.
        key: String,
        /// Backend error description.
        detail: String,
    },
}

impl StorageError {
    /// Create a bucket check error.
    #[must_use]
    pub fn bucket_check(bucket: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::BucketCheck {
            bucket: bucket.into(),
            detail: detail.into(),
        }
    }

    /// Create a bucket creation error.
    #[must_use]
    pub fn bucket_create(bucket: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::BucketCreate {
            bucket: bucket.into(),
            detail: detail.into(),
        }
    }

    /// Create an upload error.
    #[must_use]
    pub fn upload(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Upload {
            key: key.into(),
            detail: detail.into(),
        }
    }
}
