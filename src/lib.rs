//! Serverless AWS Bedrock handlers.
//!
//! [`ImageGenerationHandler`] turns a prompt into an image stored on S3 and
//! answers with a presigned download link. [`TextGenerationHandler`] turns a
//! prompt into a text completion returned inline. Both take their model and
//! storage clients by injection so they can run against the doubles in
//! [`mocks`].

pub mod bedrock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod mocks;
pub mod models;
pub mod storage;

pub use bedrock::{load_sdk_config, BedrockRuntime, ImageClient, ModelInvoker, TextClient};
pub use config::{AwsConfig, ImageHandlerConfig, TextHandlerConfig};
pub use error::{BedrockError, ErrorClass, Result};
pub use handlers::{ImageGenerationHandler, TextGenerationHandler};
pub use models::{HandlerResponse, InvocationRequest, ResponseBody};
pub use storage::{ContentStore, S3ContentStore};
