use serde::{Deserialize, Serialize};

pub const MAX_TOKENS_TO_SAMPLE: u32 = 4096;
pub const TEMPERATURE: f32 = 0.5;
pub const TOP_K: u32 = 250;
pub const TOP_P: f32 = 1.0;
pub const STOP_SEQUENCE: &str = "\\n\\nHuman:";

/// Body of a Claude text-completion invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeCompletionRequest {
    pub prompt: String,
    pub max_tokens_to_sample: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub stop_sequences: Vec<String>,
}

impl ClaudeCompletionRequest {
    /// The prompt is sent as given. Claude v2's completion API only accepts
    /// turn-formatted prompts (`"\n\nHuman: ...\n\nAssistant:"`), so callers
    /// are expected to send them already wrapped.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens_to_sample: MAX_TOKENS_TO_SAMPLE,
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            stop_sequences: vec![STOP_SEQUENCE.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeCompletionResponse {
    pub completion: Option<String>,
    pub stop_reason: Option<String>,
}
