//! Object store contract shared by the S3 and in-memory backends.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use super::error::StorageError;

/// Minimal object-store surface the upload service depends on.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check whether a bucket exists.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError>;

    /// Create a bucket.
    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError>;

    /// Write a single object with its declared size and content type.
    ///
    /// An existing object under the same key is replaced.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        size: u64,
        content_type: &str,
    ) -> Result<(), StorageError>;
}

/// Shared handle to an [`ObjectStore`] implementation.
pub type DynObjectStore = Arc<dyn ObjectStore>;
