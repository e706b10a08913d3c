//! S3-compatible object store backed by the AWS SDK.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

use super::config::StorageConfig;
use super::error::StorageError;
use super::store::ObjectStore;

/// Object store talking to any S3-compatible endpoint.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Build a client for the configured endpoint.
    ///
    /// Uses static credentials and path-style addressing, which MinIO and
    /// other self-hosted backends require.
    pub async fn connect(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "depot-config",
        );
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.clone())
            .credentials_provider(credentials)
            .load()
            .await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[tracing::instrument(skip(self))]
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
        let resp = self.client.head_bucket().bucket(bucket).send().await;

        if let Err(e) = resp {
            if e.as_service_error().map(HeadBucketError::is_not_found) == Some(true) {
                return Ok(false);
            }
            return Err(StorageError::bucket_check(
                bucket,
                DisplayErrorContext(e).to_string(),
            ));
        }

        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        self.client
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| StorageError::bucket_create(bucket, DisplayErrorContext(e).to_string()))?;
        Ok(())
    }

    #[tracing::instrument(skip(self, bytes))]
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        size: u64,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_length(i64::try_from(size).unwrap_or(i64::MAX))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::upload(key, DisplayErrorContext(e).to_string()))?;
        Ok(())
    }
}
