pub mod image;
pub mod text;

use crate::{
    error::{BedrockError, ErrorClass, Result},
    models::{HandlerResponse, InvocationRequest, ResponseBody},
};

pub use self::image::ImageGenerationHandler;
pub use self::text::TextGenerationHandler;

pub const MISSING_PROMPT: &str = "Input prompt is missing";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Extracts the prompt or fails before anything downstream is touched.
pub fn require_prompt(request: &InvocationRequest) -> Result<&str> {
    request
        .prompt()
        .ok_or_else(|| BedrockError::ValidationError(MISSING_PROMPT.into()))
}

/// Maps the outcome of one invocation onto a status and body.
pub fn respond<T>(result: Result<T>, on_success: impl FnOnce(T) -> ResponseBody) -> HandlerResponse {
    match result {
        Ok(value) => HandlerResponse::new(200, &on_success(value)),
        Err(err) => error_response(&err),
    }
}

pub fn error_response(err: &BedrockError) -> HandlerResponse {
    match err.class() {
        ErrorClass::Validation => {
            log::warn!("Rejected request: {}", err);
            HandlerResponse::new(err.status_code(), &ResponseBody::error(err.to_string(), None))
        }
        ErrorClass::Decode | ErrorClass::Downstream => {
            log::error!("Exception raised while execution: {}", err);
            HandlerResponse::new(
                err.status_code(),
                &ResponseBody::error(INTERNAL_SERVER_ERROR, Some(err.to_string())),
            )
        }
    }
}
