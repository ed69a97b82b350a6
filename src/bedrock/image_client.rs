use crate::{
    bedrock::ModelInvoker,
    error::{BedrockError, Result},
    logger,
    models::{GeneratedImage, StabilityImageRequest, StabilityImageResponse},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

#[derive(Clone)]
pub struct ImageClient {
    invoker: Arc<dyn ModelInvoker>,
    model_id: String,
    style_preset: String,
}

impl ImageClient {
    pub fn new(
        invoker: Arc<dyn ModelInvoker>,
        model_id: impl Into<String>,
        style_preset: impl Into<String>,
    ) -> Self {
        Self {
            invoker,
            model_id: model_id.into(),
            style_preset: style_preset.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Runs one text-to-image generation and returns the decoded image.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        let request = StabilityImageRequest::new(prompt, self.style_preset.as_str());
        let request_json = serde_json::to_vec(&request)
            .map_err(|e| BedrockError::SerializationError(e.to_string()))?;

        log::info!("Generating image with model: {}", self.model_id);

        let response_bytes = {
            let _timer = logger::timer("image model invocation");
            self.invoker.invoke(&self.model_id, request_json).await?
        };

        let response: StabilityImageResponse = serde_json::from_slice(&response_bytes)
            .map_err(|e| BedrockError::ResponseError(e.to_string()))?;

        let encoded = response
            .artifacts
            .first()
            .and_then(|artifact| artifact.base64.as_deref())
            .ok_or_else(|| BedrockError::ResponseError("No image artifact in model response".into()))?;

        log::debug!("Received image payload of {} base64 characters", encoded.len());

        decode_image(encoded)
    }
}

/// Decodes a base64 image payload. The bytes are returned untouched once
/// they are confirmed to be a readable image.
pub fn decode_image(encoded: &str) -> Result<GeneratedImage> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| BedrockError::DecodeError(format!("invalid base64 payload: {}", e)))?;

    let format = image::guess_format(&bytes)
        .map_err(|e| BedrockError::DecodeError(format!("unrecognised image data: {}", e)))?;
    image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| BedrockError::DecodeError(format!("unreadable {:?} image: {}", format, e)))?;

    Ok(GeneratedImage {
        bytes,
        extension: format.extensions_str().first().copied().unwrap_or("bin"),
        content_type: format.to_mime_type(),
    })
}
