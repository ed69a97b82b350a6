use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload a handler is invoked with: `{ "input": "<prompt text>" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    #[serde(default)]
    pub input: Option<String>,
}

impl InvocationRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
        }
    }

    /// Builds a request from a raw event. Anything other than a string `input`
    /// is treated as absent.
    pub fn from_event(event: &Value) -> Self {
        Self {
            input: event
                .get("input")
                .and_then(Value::as_str)
                .map(String::from),
        }
    }

    /// The prompt, if one was supplied and it is not blank.
    pub fn prompt(&self) -> Option<&str> {
        self.input.as_deref().filter(|p| !p.trim().is_empty())
    }
}
