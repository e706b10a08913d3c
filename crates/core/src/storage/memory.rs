//! In-memory object store for tests and local development.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;

use super::error::StorageError;
use super::store::ObjectStore;

/// A stored object with the metadata it was written with.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Object content.
    pub bytes: Bytes,
    /// Declared size passed at write time.
    pub size: u64,
    /// Declared content type.
    pub content_type: String,
}

/// In-memory [`ObjectStore`] keeping buckets in a map.
///
/// Counts bucket-creation calls and supports injected put failures so tests
/// can drive both halves of the upload contract.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    buckets: HashMap<String, HashMap<String, StoredObject>>,
    create_calls: u64,
    put_failure: Option<String>,
}

impl MemoryObjectStore {
    /// Create an empty store with no buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one existing empty bucket.
    #[must_use]
    pub fn with_bucket(bucket: impl Into<String>) -> Self {
        let store = Self::default();
        store.lock().buckets.insert(bucket.into(), HashMap::new());
        store
    }

    /// Make every subsequent put fail with the given message.
    pub fn fail_puts(&self, message: impl Into<String>) {
        self.lock().put_failure = Some(message.into());
    }

    /// Number of `create_bucket` calls issued so far.
    #[must_use]
    pub fn create_calls(&self) -> u64 {
        self.lock().create_calls
    }

    /// Fetch a stored object, if present.
    #[must_use]
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
    }

    /// Number of objects stored in a bucket.
    #[must_use]
    pub fn object_count(&self, bucket: &str) -> usize {
        self.lock().buckets.get(bucket).map_or(0, HashMap::len)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
        Ok(self.lock().buckets.contains_key(bucket))
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.create_calls += 1;
        state.buckets.entry(bucket.to_string()).or_default();
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        size: u64,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let mut state = self.lock();
        if let Some(message) = state.put_failure.clone() {
            return Err(StorageError::upload(key, message));
        }
        let Some(objects) = state.buckets.get_mut(bucket) else {
            return Err(StorageError::upload(
                key,
                format!("bucket '{bucket}' does not exist"),
            ));
        };
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                size,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
