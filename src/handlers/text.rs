use crate::{
    bedrock::{ModelInvoker, TextClient},
    config::TextHandlerConfig,
    error::Result,
    handlers::{require_prompt, respond},
    models::{HandlerResponse, InvocationRequest, ResponseBody},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TextGenerationHandler {
    text: TextClient,
}

impl TextGenerationHandler {
    pub fn new(invoker: Arc<dyn ModelInvoker>, config: TextHandlerConfig) -> Self {
        Self {
            text: TextClient::new(invoker, config.model_id),
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let answer = self.text.generate(prompt).await?;
        log::debug!("Generated {} characters", answer.len());
        Ok(answer)
    }

    pub async fn handle(&self, request: &InvocationRequest) -> HandlerResponse {
        let result = match require_prompt(request) {
            Ok(prompt) => {
                log::debug!("Text prompt: {}", prompt);
                self.generate(prompt).await
            }
            Err(err) => Err(err),
        };

        respond(result, |answer| ResponseBody::answer(answer))
    }
}
