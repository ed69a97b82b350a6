use crate::{
    bedrock::ModelInvoker,
    error::{BedrockError, Result},
    logger,
    models::{ClaudeCompletionRequest, ClaudeCompletionResponse},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TextClient {
    invoker: Arc<dyn ModelInvoker>,
    model_id: String,
}

impl TextClient {
    pub fn new(invoker: Arc<dyn ModelInvoker>, model_id: impl Into<String>) -> Self {
        Self {
            invoker,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ClaudeCompletionRequest::new(prompt);
        let request_json = serde_json::to_vec(&request)
            .map_err(|e| BedrockError::SerializationError(e.to_string()))?;

        log::info!("Invoking model: {}", self.model_id);

        let response_bytes = {
            let _timer = logger::timer("text model invocation");
            self.invoker.invoke(&self.model_id, request_json).await?
        };

        let response: ClaudeCompletionResponse = serde_json::from_slice(&response_bytes)
            .map_err(|e| BedrockError::ResponseError(e.to_string()))?;

        if let Some(reason) = &response.stop_reason {
            log::debug!("Completion stop reason: {}", reason);
        }

        response
            .completion
            .ok_or_else(|| BedrockError::ResponseError("No completion in model response".into()))
    }
}
