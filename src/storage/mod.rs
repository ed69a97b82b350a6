pub mod s3;
pub mod traits;

use uuid::Uuid;

pub use s3::S3ContentStore;
pub use traits::{ContentStore, SignedLink, StoredObject};

pub const OBJECT_NAME_PREFIX: &str = "generatedImage_";

/// Collision-resistant key for a freshly generated artifact.
pub fn object_name(extension: &str) -> String {
    format!("{}{}.{}", OBJECT_NAME_PREFIX, Uuid::new_v4().simple(), extension)
}
