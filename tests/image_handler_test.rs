//! Integration tests for ImageGenerationHandler.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageBuffer, ImageFormat, Rgb};
use rgenai_handlers::mocks::{InMemoryContentStore, MockModelInvoker};
use rgenai_handlers::models::NEGATIVE_PROMPTS;
use rgenai_handlers::{
    BedrockError, ImageGenerationHandler, ImageHandlerConfig, InvocationRequest,
};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

fn png_bytes() -> Vec<u8> {
    let img = ImageBuffer::from_fn(8, 8, |x, y| Rgb([(x * 30) as u8, (y * 30) as u8, 128u8]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn stability_response(bytes: &[u8]) -> serde_json::Value {
    json!({
        "result": "success",
        "artifacts": [
            { "seed": 5450, "base64": STANDARD.encode(bytes), "finishReason": "SUCCESS" }
        ]
    })
}

fn create_handler(
    invoker: Arc<MockModelInvoker>,
    store: Arc<InMemoryContentStore>,
) -> ImageGenerationHandler {
    ImageGenerationHandler::new(invoker, store, ImageHandlerConfig::default())
}

#[tokio::test]
async fn test_stored_object_matches_decoded_payload() {
    let bytes = png_bytes();
    let invoker = Arc::new(MockModelInvoker::returning_json(stability_response(&bytes)));
    let store = Arc::new(InMemoryContentStore::new());
    let handler = create_handler(invoker.clone(), store.clone());

    let response = handler.handle(&InvocationRequest::new("a red bicycle")).await;

    assert_eq!(response.status_code, 200);
    let body = response.body_json().unwrap();
    let url = body["download_url"].as_str().unwrap();

    let stored = store.resolve(url).expect("link should point at a stored object");
    assert_eq!(stored.bytes, bytes);
    assert_eq!(stored.content_type, "image/png");
    assert_eq!(store.len(), 1);
    assert_eq!(invoker.call_count(), 1);
}

#[tokio::test]
async fn test_link_targets_configured_bucket_with_one_hour_expiry() {
    let invoker = Arc::new(MockModelInvoker::returning_json(stability_response(&png_bytes())));
    let store = Arc::new(InMemoryContentStore::new());
    let handler = ImageGenerationHandler::new(
        invoker,
        store.clone(),
        ImageHandlerConfig::new().with_bucket("generated-art"),
    );

    let link = handler.generate("a lighthouse").await.unwrap();

    assert_eq!(link.object.bucket, "generated-art");
    assert!(link.object.key.starts_with("generatedImage_"));
    assert!(link.object.key.ends_with(".png"));
    assert_eq!(link.expires_in_secs, 3600);
    assert_eq!(store.signed_ttls(), vec![Duration::from_secs(3600)]);
    assert!(store.get("generated-art", &link.object.key).is_some());
}

#[tokio::test]
async fn test_request_combines_prompt_negatives_and_fixed_parameters() {
    let invoker = Arc::new(MockModelInvoker::returning_json(stability_response(&png_bytes())));
    let store = Arc::new(InMemoryContentStore::new());
    let handler = ImageGenerationHandler::new(
        invoker.clone(),
        store,
        ImageHandlerConfig::new().with_style_preset("cinematic"),
    );

    handler.handle(&InvocationRequest::new("a castle in fog")).await;

    let call = invoker.last_call().unwrap();
    assert_eq!(call.model_id, "stability.stable-diffusion-xl-v0");

    let prompts = call.body["text_prompts"].as_array().unwrap();
    assert_eq!(prompts[0], json!({ "text": "a castle in fog", "weight": 1.0 }));
    let negatives: Vec<&str> = prompts[1..]
        .iter()
        .map(|p| {
            assert_eq!(p["weight"], -1.0);
            p["text"].as_str().unwrap()
        })
        .collect();
    assert_eq!(negatives, NEGATIVE_PROMPTS.to_vec());

    assert_eq!(call.body["cfg_scale"], 5);
    assert_eq!(call.body["seed"], 5450);
    assert_eq!(call.body["steps"], 70);
    assert_eq!(call.body["style_preset"], "cinematic");
}

#[tokio::test]
async fn test_concurrent_invocations_use_distinct_keys() {
    let invoker = Arc::new(MockModelInvoker::returning_json(stability_response(&png_bytes())));
    let store = Arc::new(InMemoryContentStore::new());
    let handler = Arc::new(create_handler(invoker.clone(), store.clone()));

    let first = InvocationRequest::new("a red bicycle");
    let second = InvocationRequest::new("a blue bicycle");
    let (a, b) = tokio::join!(handler.handle(&first), handler.handle(&second));

    assert_eq!(a.status_code, 200);
    assert_eq!(b.status_code, 200);
    assert_ne!(a.body, b.body);
    assert_eq!(store.len(), 2);
    assert_eq!(invoker.call_count(), 2);
}

#[tokio::test]
async fn test_spawned_invocations_use_distinct_keys() {
    let invoker = Arc::new(MockModelInvoker::returning_json(stability_response(&png_bytes())));
    let store = Arc::new(InMemoryContentStore::new());
    let handler = Arc::new(create_handler(invoker, store.clone()));

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move { handler.generate(&format!("bicycle #{}", i)).await })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().is_ok());
    }
    assert_eq!(store.len(), 8);
}

#[tokio::test]
async fn test_missing_input_is_rejected_without_model_call() {
    let invoker = Arc::new(MockModelInvoker::returning_json(stability_response(&png_bytes())));
    let store = Arc::new(InMemoryContentStore::new());
    let handler = create_handler(invoker.clone(), store.clone());

    let response = handler.handle(&InvocationRequest::from_event(&json!({}))).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, r#"{"error": "Input prompt is missing"}"#);
    assert_eq!(invoker.call_count(), 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_model_fault_becomes_internal_server_error() {
    let invoker = Arc::new(MockModelInvoker::failing(BedrockError::AwsServiceError(
        "ServiceUnavailableException - Model is overloaded".into(),
    )));
    let store = Arc::new(InMemoryContentStore::new());
    let handler = create_handler(invoker, store.clone());

    let response = handler.handle(&InvocationRequest::new("a red bicycle")).await;

    assert_eq!(response.status_code, 500);
    let body = response.body_json().unwrap();
    assert_eq!(body["error"], "Internal Server Error");
    assert!(body["details"].as_str().unwrap().contains("ServiceUnavailableException"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_storage_fault_becomes_internal_server_error() {
    let invoker = Arc::new(MockModelInvoker::returning_json(stability_response(&png_bytes())));
    let store = Arc::new(InMemoryContentStore::failing_puts(BedrockError::StorageError(
        "PutObject failed: AccessDenied - Access Denied".into(),
    )));
    let handler = create_handler(invoker, store);

    let response = handler.handle(&InvocationRequest::new("a red bicycle")).await;

    assert_eq!(response.status_code, 500);
    assert!(response.body_json().unwrap()["details"]
        .as_str()
        .unwrap()
        .contains("AccessDenied"));
}

#[tokio::test]
async fn test_signing_fault_becomes_internal_server_error() {
    let invoker = Arc::new(MockModelInvoker::returning_json(stability_response(&png_bytes())));
    let store = Arc::new(InMemoryContentStore::failing_signing(BedrockError::StorageError(
        "GetObject presign failed: no credentials".into(),
    )));
    let handler = create_handler(invoker, store);

    let response = handler.handle(&InvocationRequest::new("a red bicycle")).await;

    assert_eq!(response.status_code, 500);
}

#[tokio::test]
async fn test_undecodable_payload_becomes_internal_server_error() {
    let invoker = Arc::new(MockModelInvoker::returning_json(json!({
        "artifacts": [{ "base64": STANDARD.encode(b"definitely not an image"), "finishReason": "SUCCESS" }]
    })));
    let store = Arc::new(InMemoryContentStore::new());
    let handler = create_handler(invoker, store.clone());

    let response = handler.handle(&InvocationRequest::new("a red bicycle")).await;

    assert_eq!(response.status_code, 500);
    assert!(response.body_json().unwrap()["details"]
        .as_str()
        .unwrap()
        .starts_with("Decode error"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_empty_artifacts_becomes_internal_server_error() {
    let invoker = Arc::new(MockModelInvoker::returning_json(json!({ "artifacts": [] })));
    let store = Arc::new(InMemoryContentStore::new());
    let handler = create_handler(invoker, store.clone());

    let response = handler.handle(&InvocationRequest::new("a red bicycle")).await;

    assert_eq!(response.status_code, 500);
    assert!(store.is_empty());
}
