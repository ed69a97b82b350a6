//! Test doubles for the model and storage seams.
//!
//! These let the handlers run end to end without reaching AWS.

use crate::bedrock::ModelInvoker;
use crate::error::{BedrockError, Result};
use crate::storage::ContentStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A recorded model invocation.
#[derive(Debug, Clone)]
pub struct RecordedInvocation {
    pub model_id: String,
    pub body: serde_json::Value,
}

/// Model invoker that answers every call with the same canned result.
pub struct MockModelInvoker {
    response: Result<Vec<u8>>,
    calls: Mutex<Vec<RecordedInvocation>>,
    call_count: AtomicUsize,
}

impl MockModelInvoker {
    pub fn returning(body: impl Into<Vec<u8>>) -> Self {
        Self::with_result(Ok(body.into()))
    }

    pub fn returning_json(value: serde_json::Value) -> Self {
        Self::returning(value.to_string())
    }

    pub fn failing(error: BedrockError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(response: Result<Vec<u8>>) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedInvocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last_call(&self) -> Option<RecordedInvocation> {
        self.calls().pop()
    }
}

#[async_trait]
impl ModelInvoker for MockModelInvoker {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedInvocation {
                model_id: model_id.to_string(),
                body,
            });
        }
        self.response.clone()
    }
}

/// A stored object as seen by the in-memory store.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Content store that keeps objects in memory and mints fake signed links.
#[derive(Default)]
pub struct InMemoryContentStore {
    objects: Mutex<HashMap<(String, String), MemoryObject>>,
    put_error: Option<BedrockError>,
    sign_error: Option<BedrockError>,
    signed_ttls: Mutex<Vec<Duration>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_puts(error: BedrockError) -> Self {
        Self {
            put_error: Some(error),
            ..Self::default()
        }
    }

    pub fn failing_signing(error: BedrockError) -> Self {
        Self {
            sign_error: Some(error),
            ..Self::default()
        }
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<MemoryObject> {
        self.objects
            .lock()
            .ok()?
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn keys(&self) -> Vec<(String, String)> {
        self.objects
            .lock()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn signed_ttls(&self) -> Vec<Duration> {
        self.signed_ttls.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Reverses [`ContentStore::signed_url`] for this store.
    pub fn resolve(&self, url: &str) -> Option<MemoryObject> {
        let rest = url.strip_prefix("https://")?;
        let (bucket, rest) = rest.split_once(".s3.mock/")?;
        let key = rest.split('?').next()?;
        self.get(bucket, key)
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        if let Some(err) = &self.put_error {
            return Err(err.clone());
        }
        let mut objects = self
            .objects
            .lock()
            .map_err(|e| BedrockError::StorageError(e.to_string()))?;
        objects.insert(
            (bucket.to_string(), key.to_string()),
            MemoryObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn signed_url(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String> {
        if let Some(err) = &self.sign_error {
            return Err(err.clone());
        }
        if let Ok(mut ttls) = self.signed_ttls.lock() {
            ttls.push(ttl);
        }
        Ok(format!(
            "https://{}.s3.mock/{}?X-Amz-Expires={}&X-Amz-Signature=mock",
            bucket,
            key,
            ttl.as_secs()
        ))
    }
}
