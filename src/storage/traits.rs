use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Object storage able to persist bytes and hand out time-limited read links.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    async fn signed_url(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
}

/// A time-bounded read link to one stored object.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SignedLink {
    pub object: StoredObject,
    pub url: String,
    pub expires_in_secs: u64,
}
