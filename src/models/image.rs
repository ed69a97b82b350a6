use serde::{Deserialize, Serialize};

/// Descriptors submitted with weight -1.0 to steer generation away from
/// common failure modes.
pub const NEGATIVE_PROMPTS: [&str; 4] = [
    "poorly rendered",
    "poor background details",
    "poorly drawn",
    "disfigured features",
];

pub const CFG_SCALE: u32 = 5;
pub const SEED: u64 = 5450;
pub const STEPS: u32 = 70;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrompt {
    pub text: String,
    pub weight: f32,
}

/// Body of a Stability text-to-image invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityImageRequest {
    pub text_prompts: Vec<TextPrompt>,
    pub cfg_scale: u32,
    pub seed: u64,
    pub steps: u32,
    pub style_preset: String,
}

impl StabilityImageRequest {
    pub fn new(prompt: impl Into<String>, style_preset: impl Into<String>) -> Self {
        let mut text_prompts = vec![TextPrompt {
            text: prompt.into(),
            weight: 1.0,
        }];
        text_prompts.extend(NEGATIVE_PROMPTS.iter().map(|negative| TextPrompt {
            text: negative.to_string(),
            weight: -1.0,
        }));

        Self {
            text_prompts,
            cfg_scale: CFG_SCALE,
            seed: SEED,
            steps: STEPS,
            style_preset: style_preset.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityImageResponse {
    #[serde(default)]
    pub artifacts: Vec<StabilityArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityArtifact {
    pub base64: Option<String>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
    pub seed: Option<u64>,
}

/// A decoded image, held only for the duration of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
    pub content_type: &'static str,
}
