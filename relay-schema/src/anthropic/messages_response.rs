use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Anthropic Messages API response body.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessagesResponse {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub content: Vec<ContentBlock>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    /// tool_use, thinking and anything newer.
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    /// Text of the first content block, if that block is non-empty text.
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first() {
            Some(ContentBlock::Text { text }) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_text_block_is_extracted() {
        let resp: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-5-sonnet-20241022",
            "content": [{"type": "text", "text": "{\"finding\":\"none\"}"}, {"type": "text", "text": "tail"}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }))
        .unwrap();

        assert_eq!(resp.first_text(), Some("{\"finding\":\"none\"}"));
        assert_eq!(resp.extra.get("role"), Some(&json!("assistant")));
    }

    #[test]
    fn non_text_first_block_yields_none() {
        let resp: MessagesResponse = serde_json::from_value(json!({
            "content": [{"type": "tool_use", "id": "t1", "name": "x", "input": {}}]
        }))
        .unwrap();

        assert_eq!(resp.content, vec![ContentBlock::Other]);
        assert!(resp.first_text().is_none());
    }

    #[test]
    fn empty_content_yields_none() {
        let resp: MessagesResponse = serde_json::from_value(json!({"content": []})).unwrap();
        assert!(resp.first_text().is_none());
    }
}
