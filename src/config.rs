use std::env;
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_IMAGE_MODEL_ID: &str = "stability.stable-diffusion-xl-v0";
pub const DEFAULT_TEXT_MODEL_ID: &str = "anthropic.claude-v2";
pub const DEFAULT_STYLE_PRESET: &str = "photographic";
pub const DEFAULT_BUCKET: &str = "processed-docs-bucket";

/// Lifetime of every presigned download link.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub session_token: Option<String>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        AwsConfig {
            region: None,
            access_key: None,
            secret_key: None,
            session_token: None,
        }
    }
}

impl AwsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Reads `region`, then the standard `AWS_REGION`. Static credentials are
    /// only picked up when both halves are present; `AWS_SESSION_TOKEN` rides
    /// along with them (Lambda execution roles always set it).
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let region = var("region").or_else(|| var("AWS_REGION"));
        let (access_key, secret_key, session_token) = match (
            non_empty(var("AWS_ACCESS_KEY_ID")),
            non_empty(var("AWS_SECRET_ACCESS_KEY")),
        ) {
            (Some(access), Some(secret)) => (
                Some(access),
                Some(secret),
                non_empty(var("AWS_SESSION_TOKEN")),
            ),
            _ => (None, None, None),
        };

        AwsConfig {
            region,
            access_key,
            secret_key,
            session_token,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }

    pub fn region_or_default(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }
}

#[derive(Debug, Clone)]
pub struct ImageHandlerConfig {
    pub model_id: String,
    pub style_preset: String,
    pub bucket: String,
}

impl Default for ImageHandlerConfig {
    fn default() -> Self {
        ImageHandlerConfig {
            model_id: DEFAULT_IMAGE_MODEL_ID.to_string(),
            style_preset: DEFAULT_STYLE_PRESET.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }
}

impl ImageHandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        ImageHandlerConfig {
            model_id: non_empty(var("model_id")).unwrap_or(defaults.model_id),
            style_preset: non_empty(var("style_preset")).unwrap_or(defaults.style_preset),
            bucket: non_empty(var("s3_bucket")).unwrap_or(defaults.bucket),
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_style_preset(mut self, style_preset: impl Into<String>) -> Self {
        self.style_preset = style_preset.into();
        self
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct TextHandlerConfig {
    pub model_id: String,
}

impl Default for TextHandlerConfig {
    fn default() -> Self {
        TextHandlerConfig {
            model_id: DEFAULT_TEXT_MODEL_ID.to_string(),
        }
    }
}

impl TextHandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        TextHandlerConfig {
            model_id: non_empty(var("model_id")).unwrap_or_else(|| DEFAULT_TEXT_MODEL_ID.to_string()),
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
