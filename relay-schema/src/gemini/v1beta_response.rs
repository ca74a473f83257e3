use super::Content;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Gemini v1beta `generateContent` response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponseBody {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GeminiResponseBody {
    /// Text of the first candidate, `None` when there is nothing to return.
    pub fn text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(Content::joined_text)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    #[serde(rename = "finishReason", default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Upstream feedback about the prompt, set when the prompt itself was blocked.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason_message: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety_ratings: Vec<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PromptFeedback {
    /// True when the feedback carries anything worth reporting.
    pub fn is_informative(&self) -> bool {
        self.block_reason.is_some()
            || self.block_reason_message.is_some()
            || !self.safety_ratings.is_empty()
            || !self.extra.is_empty()
    }
}

impl fmt::Display for PromptFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.block_reason, &self.block_reason_message) {
            (Some(reason), Some(message)) => write!(f, "block_reason: {reason} ({message})"),
            (Some(reason), None) => write!(f, "block_reason: {reason}"),
            _ => match serde_json::to_string(self) {
                Ok(raw) => f.write_str(&raw),
                Err(_) => f.write_str("<unprintable prompt feedback>"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_comes_from_first_candidate() {
        let body: GeminiResponseBody = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "autumn leaves fall slow"}]}, "finishReason": "STOP"},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ],
            "modelVersion": "gemini-3-flash-preview"
        }))
        .unwrap();

        assert_eq!(body.text().as_deref(), Some("autumn leaves fall slow"));
    }

    #[test]
    fn blocked_prompt_has_no_text_and_reports_reason() {
        let body: GeminiResponseBody = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY", "safetyRatings": [{"category": "HARM_CATEGORY_HARASSMENT", "probability": "HIGH"}]}
        }))
        .unwrap();

        assert!(body.text().is_none());
        let feedback = body.prompt_feedback.unwrap();
        assert!(feedback.is_informative());
        assert_eq!(feedback.to_string(), "block_reason: SAFETY");
    }

    #[test]
    fn empty_feedback_is_not_informative() {
        let feedback: PromptFeedback = serde_json::from_value(json!({})).unwrap();
        assert!(!feedback.is_informative());
    }
}
