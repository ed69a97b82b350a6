pub mod image_client;
pub mod text_client;

use crate::{
    config::AwsConfig,
    error::{BedrockError, Result},
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_bedrockruntime::{
    config::{Credentials, Region},
    error::{DisplayErrorContext, ProvideErrorMetadata},
    primitives::Blob,
    Client,
};

pub use image_client::ImageClient;
pub use text_client::TextClient;

/// Synchronous request/response call into a model-serving API.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>>;
}

/// Loads the shared SDK configuration once per process. Static credentials
/// win over the default provider chain when both halves are set.
pub async fn load_sdk_config(config: &AwsConfig) -> SdkConfig {
    let loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region_or_default().to_string()));

    let loader = match static_credentials(config) {
        Some(credentials) => loader.credentials_provider(credentials),
        None => loader,
    };

    loader.load().await
}

/// Credentials from the environment, session token included. Lambda hands
/// out temporary role credentials that are useless without it.
pub fn static_credentials(config: &AwsConfig) -> Option<Credentials> {
    let (access_key, secret_key) = (config.access_key.as_ref()?, config.secret_key.as_ref()?);
    Some(Credentials::new(
        access_key,
        secret_key,
        config.session_token.clone(),
        None,
        "rgenai-handlers",
    ))
}

/// `ModelInvoker` backed by the Bedrock runtime `InvokeModel` API.
#[derive(Clone)]
pub struct BedrockRuntime {
    client: Client,
}

impl BedrockRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl ModelInvoker for BedrockRuntime {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                log::error!("Bedrock InvokeModel error details: {:?}", e);

                if let Some(service_error) = e.as_service_error() {
                    log::error!("Service error code: {:?}", service_error.code());
                    log::error!("Service error message: {:?}", service_error.message());
                    BedrockError::AwsServiceError(format!(
                        "{} - {}",
                        service_error.code().unwrap_or("unknown"),
                        service_error.message().unwrap_or("no message")
                    ))
                } else {
                    BedrockError::AwsError(DisplayErrorContext(&e).to_string())
                }
            })?;

        Ok(response.body.into_inner())
    }
}
