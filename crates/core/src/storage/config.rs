//! Storage configuration types.

/// Connection settings for an S3-compatible object store.
///
/// Works with MinIO, AWS S3, Cloudflare R2, and anything else speaking the
/// S3 API.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Endpoint URL, e.g. `http://localhost:9000` for a local MinIO.
    pub endpoint: String,
    /// Destination bucket for uploads.
    pub bucket: String,
    /// Access key ID.
    pub access_key: String,
    /// Secret access key.
    pub secret_key: String,
    /// Region name. Self-hosted backends accept any value here.
    pub region: String,
}

impl StorageConfig {
    /// Create a config for an S3-compatible endpoint.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into(),
        }
    }
}
