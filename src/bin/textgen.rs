use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use rgenai_handlers::{
    logger::{self, LoggerConfig},
    AwsConfig, BedrockRuntime, InvocationRequest, TextGenerationHandler, TextHandlerConfig,
};
use serde_json::Value;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    logger::init_with_config(LoggerConfig::for_runtime("textgen"))?;
    if !dotenv_loaded {
        log::debug!("No .env file found, using system environment variables");
    }

    let aws = AwsConfig::from_env();
    let config = TextHandlerConfig::from_env();
    logger::log_startup_info("textgen", env!("CARGO_PKG_VERSION"), &aws);
    logger::log_text_config(&config);

    let sdk_config = rgenai_handlers::load_sdk_config(&aws).await;
    let handler = Arc::new(TextGenerationHandler::new(
        Arc::new(BedrockRuntime::from_sdk_config(&sdk_config)),
        config,
    ));

    run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move {
            logger::set_request_id(Some(event.context.request_id.clone()));
            let response = handler
                .handle(&InvocationRequest::from_event(&event.payload))
                .await;
            log::info!("Responding with status {}", response.status_code);
            logger::set_request_id(None);
            Ok::<_, Error>(response)
        }
    }))
    .await
}
