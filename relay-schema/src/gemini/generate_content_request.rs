//! Typed Gemini v1beta request schema for the `generateContent` endpoint.
//!
//! Only the fields the relay sends are modeled explicitly; every level keeps an
//! `extra` catch-all so callers can pass through anything else unchanged.

mod content;
mod generation;
mod safety;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub use content::{Content, Part};
pub use generation::GenerationConfig;
pub use safety::{HarmBlockThreshold, HarmCategory, SafetySetting};

/// Gemini `generateContent` request body.
///
/// Reference: <https://ai.google.dev/gemini-api/docs/text-generation>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerateContentRequest {
    /// Required conversation turns.
    pub contents: Vec<Content>,

    /// System-level instruction, a single text part with no `role`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    /// Generation parameters; only `responseMimeType` is ever set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,

    /// Per-category content filter overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<SafetySetting>>,

    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GeminiGenerateContentRequest {
    /// Single-turn request carrying `text` as the only user part.
    pub fn from_user_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(text)],
            system_instruction: None,
            generation_config: None,
            safety_settings: None,
            extra: BTreeMap::new(),
        }
    }

    /// Attach a system instruction; empty or whitespace-only text is dropped.
    #[must_use]
    pub fn with_system_instruction(mut self, text: Option<&str>) -> Self {
        self.system_instruction = text
            .filter(|t| !t.trim().is_empty())
            .map(Content::system_text);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_user_text_serializes_without_optional_fields() {
        let req = GeminiGenerateContentRequest::from_user_text("Write a haiku");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"contents": [{"role": "user", "parts": [{"text": "Write a haiku"}]}]})
        );
    }

    #[test]
    fn system_instruction_has_no_role() {
        let req = GeminiGenerateContentRequest::from_user_text("log")
            .with_system_instruction(Some("You are an auditor."));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value["systemInstruction"],
            json!({"parts": [{"text": "You are an auditor."}]})
        );
    }

    #[test]
    fn blank_system_instruction_is_dropped() {
        let req = GeminiGenerateContentRequest::from_user_text("log")
            .with_system_instruction(Some("  \n"));
        assert!(req.system_instruction.is_none());
    }
}
