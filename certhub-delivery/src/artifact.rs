use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{primitives::ByteStream, Client};
use certhub_error::{delivery::DeliveryError, DeliveryResult};
use tracing::debug;

/// Durable archive for rendered certificate PDFs, keyed by
/// `certificates/{certificate_id}.pdf`.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> DeliveryResult<()>;

    /// None when no artifact exists for the key.
    async fn get(&self, key: &str) -> DeliveryResult<Option<Vec<u8>>>;

    async fn delete(&self, key: &str) -> DeliveryResult<()>;
}

pub struct S3ArtifactStore {
    client: Client,
    bucket: String,
}

impl S3ArtifactStore {
    /// Credentials and region come from the ambient AWS environment
    /// (env vars, profile, or instance metadata).
    pub async fn new(bucket: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        S3ArtifactStore {
            client: Client::new(&config),
            bucket,
        }
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> DeliveryResult<()> {
        debug!(bucket = %self.bucket, key, size = bytes.len(), "storing artifact");
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/pdf")
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| DeliveryError::Artifact(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> DeliveryResult<Option<Vec<u8>>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;
        match resp {
            Ok(output) => {
                let data = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| DeliveryError::Artifact(e.to_string()))?;
                Ok(Some(data.into_bytes().to_vec()))
            }
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false)
                {
                    return Ok(None);
                }
                Err(DeliveryError::Artifact(err.to_string()))
            }
        }
    }

    async fn delete(&self, key: &str) -> DeliveryResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| DeliveryError::Artifact(e.to_string()))?;
        Ok(())
    }
}

/// No-op store used when archival is disabled; certificates are still
/// rendered and mailed, just not retained.
pub struct NullArtifactStore;

#[async_trait]
impl ArtifactStore for NullArtifactStore {
    async fn put(&self, _key: &str, _bytes: Vec<u8>) -> DeliveryResult<()> {
        Ok(())
    }

    async fn get(&self, _key: &str) -> DeliveryResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn delete(&self, _key: &str) -> DeliveryResult<()> {
        Ok(())
    }
}
