//! Upload service over an object-store backend.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use super::config::StorageConfig;
use super::error::StorageError;
use super::s3::S3ObjectStore;
use super::store::DynObjectStore;

/// A file received from a client, ready to be stored.
///
/// Lives for a single request: the handler builds it from the multipart
/// field and the upload call consumes it.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Original client-supplied filename.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Declared size in bytes.
    pub size: u64,
    /// File content.
    pub bytes: Bytes,
}

/// Storage service for uploaded files.
///
/// Owns the destination bucket name and a backend handle. The bucket is
/// provisioned once at startup via [`StorageService::ensure_bucket`]; after
/// that every request goes straight to [`StorageService::upload`].
pub struct StorageService {
    store: DynObjectStore,
    bucket: String,
}

impl StorageService {
    /// Create a service over an existing backend.
    #[must_use]
    pub fn new(store: DynObjectStore, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Create a service over an S3-compatible endpoint.
    pub async fn connect(config: &StorageConfig) -> Self {
        let store = S3ObjectStore::connect(config).await;
        Self::new(Arc::new(store), config.bucket.clone())
    }

    /// Make sure the destination bucket exists, creating it when absent.
    ///
    /// Called once at startup. Any failure here means the service cannot
    /// store anything and the caller is expected to abort.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence probe or the creation call fails.
    pub async fn ensure_bucket(&self) -> Result<(), StorageError> {
        if self.store.bucket_exists(&self.bucket).await? {
            info!(bucket = %self.bucket, "Bucket already exists");
        } else {
            self.store.create_bucket(&self.bucket).await?;
            info!(bucket = %self.bucket, "Bucket created");
        }
        Ok(())
    }

    /// Store one uploaded file in the bucket.
    ///
    /// The object key is the sanitized filename, so a re-upload under the
    /// same name replaces the previous object.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub async fn upload(&self, request: UploadRequest) -> Result<(), StorageError> {
        let key = sanitize_filename(&request.filename);
        debug!(bucket = %self.bucket, key = %key, size = request.size, "Uploading object");

        let UploadRequest {
            content_type,
            size,
            bytes,
            ..
        } = request;

        self.store
            .put_object(&self.bucket, &key, bytes, size, &content_type)
            .await
    }

    /// Get the destination bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Sanitize a filename for use as an object key.
///
/// Only ASCII alphanumeric characters, dots, hyphens, and underscores pass
/// through; everything else becomes an underscore. This keeps path-like
/// filenames from steering the object key.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::storage::{MemoryObjectStore, ObjectStore};

    fn upload_request(filename: &str, data: &'static [u8]) -> UploadRequest {
        UploadRequest {
            filename: filename.to_string(),
            content_type: "application/pdf".to_string(),
            size: data.len() as u64,
            bytes: Bytes::from_static(data),
        }
    }

    fn service(store: &Arc<MemoryObjectStore>) -> StorageService {
        StorageService::new(store.clone(), "uploads")
    }

    /// Backend that refuses every call.
    struct FailingStore;

    #[async_trait]
    impl ObjectStore for FailingStore {
        async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
            Err(StorageError::bucket_check(bucket, "connection refused"))
        }

        async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
            Err(StorageError::bucket_create(bucket, "connection refused"))
        }

        async fn put_object(
            &self,
            _bucket: &str,
            key: &str,
            _bytes: Bytes,
            _size: u64,
            _content_type: &str,
        ) -> Result<(), StorageError> {
            Err(StorageError::upload(key, "connection refused"))
        }
    }

    /// Backend where the bucket is always absent and cannot be created.
    struct CreateFailsStore;

    #[async_trait]
    impl ObjectStore for CreateFailsStore {
        async fn bucket_exists(&self, _bucket: &str) -> Result<bool, StorageError> {
            Ok(false)
        }

        async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
            Err(StorageError::bucket_create(bucket, "access denied"))
        }

        async fn put_object(
            &self,
            _bucket: &str,
            _key: &str,
            _bytes: Bytes,
            _size: u64,
            _content_type: &str,
        ) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_ensure_bucket_creates_missing_bucket() {
        let store = Arc::new(MemoryObjectStore::new());
        let service = service(&store);

        service.ensure_bucket().await.expect("should ensure");

        assert_eq!(store.create_calls(), 1);
        assert!(store.bucket_exists("uploads").await.expect("probe"));
    }

    #[tokio::test]
    async fn test_ensure_bucket_skips_existing_bucket() {
        let store = Arc::new(MemoryObjectStore::with_bucket("uploads"));
        let service = service(&store);

        service.ensure_bucket().await.expect("should ensure");
        service.ensure_bucket().await.expect("should ensure again");

        assert_eq!(store.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_ensure_bucket_propagates_probe_failure() {
        let service = StorageService::new(Arc::new(FailingStore), "uploads");

        let err = service.ensure_bucket().await.unwrap_err();
        assert!(matches!(err, StorageError::BucketCheck { .. }));
    }

    #[tokio::test]
    async fn test_ensure_bucket_propagates_create_failure() {
        let service = StorageService::new(Arc::new(CreateFailsStore), "uploads");

        let err = service.ensure_bucket().await.unwrap_err();
        assert!(matches!(err, StorageError::BucketCreate { .. }));
        assert!(err.to_string().contains("access denied"));
    }

    #[tokio::test]
    async fn test_upload_stores_object_with_metadata() {
        let store = Arc::new(MemoryObjectStore::with_bucket("uploads"));
        let service = service(&store);

        service
            .upload(upload_request("invoice.pdf", b"%PDF-1.4"))
            .await
            .expect("should upload");

        let stored = store.object("uploads", "invoice.pdf").expect("stored");
        assert_eq!(&stored.bytes[..], b"%PDF-1.4");
        assert_eq!(stored.size, 8);
        assert_eq!(stored.content_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_upload_sanitizes_object_key() {
        let store = Arc::new(MemoryObjectStore::with_bucket("uploads"));
        let service = service(&store);

        service
            .upload(upload_request("../../etc/passwd", b"root"))
            .await
            .expect("should upload");

        assert!(store.object("uploads", ".._.._etc_passwd").is_some());
        assert!(store.object("uploads", "../../etc/passwd").is_none());
    }

    #[tokio::test]
    async fn test_uploads_with_distinct_names_are_independent() {
        let store = Arc::new(MemoryObjectStore::with_bucket("uploads"));
        let service = service(&store);

        service
            .upload(upload_request("a.txt", b"first"))
            .await
            .expect("should upload");
        service
            .upload(upload_request("b.txt", b"second"))
            .await
            .expect("should upload");

        assert_eq!(store.object_count("uploads"), 2);
        let a = store.object("uploads", "a.txt").expect("a stored");
        let b = store.object("uploads", "b.txt").expect("b stored");
        assert_eq!(&a.bytes[..], b"first");
        assert_eq!(&b.bytes[..], b"second");
    }

    #[tokio::test]
    async fn test_repeated_upload_replaces_previous_object() {
        let store = Arc::new(MemoryObjectStore::with_bucket("uploads"));
        let service = service(&store);

        service
            .upload(upload_request("notes.txt", b"old"))
            .await
            .expect("should upload");
        service
            .upload(upload_request("notes.txt", b"new"))
            .await
            .expect("should upload");

        assert_eq!(store.object_count("uploads"), 1);
        let stored = store.object("uploads", "notes.txt").expect("stored");
        assert_eq!(&stored.bytes[..], b"new");
    }

    #[tokio::test]
    async fn test_zero_byte_upload_stores_empty_object() {
        let store = Arc::new(MemoryObjectStore::with_bucket("uploads"));
        let service = service(&store);

        service
            .upload(upload_request("empty.bin", b""))
            .await
            .expect("should upload");

        let stored = store.object("uploads", "empty.bin").expect("stored");
        assert!(stored.bytes.is_empty());
        assert_eq!(stored.size, 0);
    }

    #[tokio::test]
    async fn test_upload_propagates_backend_failure() {
        let store = Arc::new(MemoryObjectStore::with_bucket("uploads"));
        store.fail_puts("injected failure");
        let service = service(&store);

        let err = service
            .upload(upload_request("doomed.txt", b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Upload { .. }));
        assert!(err.to_string().contains("injected failure"));
    }

    #[rstest]
    #[case("invoice.pdf", "invoice.pdf")]
    #[case("my file (1).pdf", "my_file__1_.pdf")]
    #[case("test@#$%.doc", "test____.doc")]
    #[case("日本語.pdf", "___.pdf")]
    #[case("../../etc/passwd", ".._.._etc_passwd")]
    fn test_sanitize_replaces_unsafe_chars(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_filename(input), expected);
    }
}
