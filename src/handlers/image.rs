use crate::{
    bedrock::{ImageClient, ModelInvoker},
    config::{ImageHandlerConfig, SIGNED_URL_TTL},
    error::Result,
    handlers::{require_prompt, respond},
    models::{HandlerResponse, InvocationRequest, ResponseBody},
    storage::{object_name, ContentStore, SignedLink, StoredObject},
};
use std::sync::Arc;

/// Prompt in, presigned download link out.
///
/// Each successful call performs exactly one model invocation, one upload
/// under a fresh key, and one presign.
#[derive(Clone)]
pub struct ImageGenerationHandler {
    images: ImageClient,
    store: Arc<dyn ContentStore>,
    bucket: String,
}

impl ImageGenerationHandler {
    pub fn new(
        invoker: Arc<dyn ModelInvoker>,
        store: Arc<dyn ContentStore>,
        config: ImageHandlerConfig,
    ) -> Self {
        Self {
            images: ImageClient::new(invoker, config.model_id, config.style_preset),
            store,
            bucket: config.bucket,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub async fn generate(&self, prompt: &str) -> Result<SignedLink> {
        let image = self.images.generate(prompt).await?;

        let object = StoredObject {
            bucket: self.bucket.clone(),
            key: object_name(image.extension),
        };
        self.store
            .put(&object.bucket, &object.key, image.bytes, image.content_type)
            .await?;

        let url = self
            .store
            .signed_url(&object.bucket, &object.key, SIGNED_URL_TTL)
            .await?;

        log::info!("Stored generated image as {}", object.key);

        Ok(SignedLink {
            object,
            url,
            expires_in_secs: SIGNED_URL_TTL.as_secs(),
        })
    }

    pub async fn handle(&self, request: &InvocationRequest) -> HandlerResponse {
        let result = match require_prompt(request) {
            Ok(prompt) => {
                log::debug!("Image prompt: {}", prompt);
                self.generate(prompt).await
            }
            Err(err) => Err(err),
        };

        respond(result, |link| ResponseBody::download(link.url))
    }
}
