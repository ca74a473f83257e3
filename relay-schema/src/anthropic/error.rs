use serde::{Deserialize, Serialize};

/// Anthropic error envelope: `{"type": "error", "error": {"type", "message"}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicErrorBody {
    #[serde(rename = "error")]
    pub inner: AnthropicErrorObject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicErrorObject {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}
