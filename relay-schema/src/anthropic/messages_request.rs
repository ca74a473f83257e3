use serde::{Deserialize, Serialize};

/// Anthropic Messages API request body (`POST /v1/messages`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,

    /// Top-level system prompt, kept apart from the user turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl MessagesRequest {
    /// Single-turn request with one user message.
    pub fn single_turn(
        model: impl Into<String>,
        max_tokens: u32,
        system: Option<&str>,
        user_text: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            system: system
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            messages: vec![Message {
                role: "user".to_string(),
                content: user_text.into(),
            }],
        }
    }
}
