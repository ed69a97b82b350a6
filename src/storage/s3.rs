use crate::{
    error::{BedrockError, Result},
    storage::traits::ContentStore,
};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    presigning::PresigningConfig,
    primitives::ByteStream,
    Client,
};
use std::time::Duration;

#[derive(Clone)]
pub struct S3ContentStore {
    client: Client,
}

impl S3ContentStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl ContentStore for S3ContentStore {
    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        log::info!("Uploading {} bytes to s3://{}/{}", bytes.len(), bucket, key);

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| storage_error("PutObject", e))?;

        Ok(())
    }

    async fn signed_url(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| BedrockError::ConfigError(format!("invalid presign expiry: {}", e)))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| storage_error("GetObject presign", e))?;

        log::debug!("Presigned s3://{}/{} for {}s", bucket, key, ttl.as_secs());
        Ok(request.uri().to_string())
    }
}

fn storage_error<E, R>(operation: &str, err: SdkError<E, R>) -> BedrockError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    log::error!("S3 {} error details: {:?}", operation, err);

    match err.as_service_error() {
        Some(service_error) => BedrockError::StorageError(format!(
            "{} failed: {} - {}",
            operation,
            service_error.code().unwrap_or("unknown"),
            service_error.message().unwrap_or("no message")
        )),
        None => BedrockError::StorageError(format!(
            "{} failed: {}",
            operation,
            DisplayErrorContext(&err)
        )),
    }
}
