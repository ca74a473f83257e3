use relay_schema::ModelType;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Framing label prepended to every audit log before it reaches a provider.
///
/// Downstream prompts depend on this exact byte sequence.
pub const AUDIT_FRAME: &str = "AUDIT TARGET LOG:\n";

/// Identifier callers use to select the primary provider.
pub const PRIMARY_MODEL_TYPE: &str = "gemini";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Gemini API, the primary provider.
    Gemini,
    /// Anthropic Messages API, the secondary provider.
    Claude,
}

impl ProviderKind {
    pub const PRIMARY: ProviderKind = ProviderKind::Gemini;
    pub const SECONDARY: ProviderKind = ProviderKind::Claude;

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Claude => "claude",
        }
    }

    /// Resolve a caller-supplied `model_type`.
    ///
    /// A missing key selects the primary provider. Any present value other than
    /// the primary identifier selects the secondary one, `null` and
    /// non-string values included.
    pub fn from_model_type(model_type: &ModelType) -> Self {
        if model_type.is_missing() || model_type.as_str() == Some(PRIMARY_MODEL_TYPE) {
            return Self::PRIMARY;
        }
        if model_type.as_str() != Some(Self::SECONDARY.as_str()) {
            debug!(
                model_type = ?model_type,
                fallback = Self::SECONDARY.as_str(),
                "Unrecognized model_type routed to secondary provider"
            );
        }
        Self::SECONDARY
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Conversation log plus system instruction, structured findings expected back.
    Audit,
    /// Single free-form prompt, free text back.
    Narrative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

/// Provider-neutral description of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub provider: ProviderKind,
    pub operation: Operation,
    pub system_instruction: Option<String>,
    /// Exactly what the provider receives as user content.
    pub payload: String,
    pub response_format: ResponseFormat,
}

impl GenerationRequest {
    pub fn audit(provider: ProviderKind, system_prompt: Option<String>, chat_log: &str) -> Self {
        Self {
            provider,
            operation: Operation::Audit,
            system_instruction: system_prompt,
            payload: format!("{AUDIT_FRAME}{chat_log}"),
            response_format: ResponseFormat::Json,
        }
    }

    pub fn narrative(provider: ProviderKind, prompt: impl Into<String>) -> Self {
        Self {
            provider,
            operation: Operation::Narrative,
            system_instruction: None,
            payload: prompt.into(),
            response_format: ResponseFormat::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_type_selects_primary() {
        assert_eq!(
            ProviderKind::from_model_type(&ModelType::Missing),
            ProviderKind::Gemini
        );
    }

    #[test]
    fn anything_but_gemini_selects_secondary() {
        for model_type in ["claude", "gpt-4", "", "Gemini", "gemini "] {
            assert_eq!(
                ProviderKind::from_model_type(&ModelType::from(model_type)),
                ProviderKind::Claude,
                "model_type {model_type:?}"
            );
        }
        assert_eq!(
            ProviderKind::from_model_type(&ModelType::from("gemini")),
            ProviderKind::Gemini
        );
    }

    #[test]
    fn null_and_non_string_model_types_select_secondary() {
        let values = [
            serde_json::Value::Null,
            serde_json::json!(4),
            serde_json::json!(["gemini"]),
        ];
        for value in values {
            assert_eq!(
                ProviderKind::from_model_type(&ModelType::Given(value.clone())),
                ProviderKind::Claude,
                "model_type {value}"
            );
        }
    }

    #[test]
    fn audit_payload_is_framed_exactly_once() {
        let req = GenerationRequest::audit(
            ProviderKind::Claude,
            Some("You are an auditor.".to_string()),
            "AUDIT TARGET LOG:\nUser: hi",
        );
        assert_eq!(req.payload, "AUDIT TARGET LOG:\nAUDIT TARGET LOG:\nUser: hi");
        assert_eq!(req.response_format, ResponseFormat::Json);
        assert_eq!(req.system_instruction.as_deref(), Some("You are an auditor."));
    }

    #[test]
    fn narrative_payload_is_verbatim() {
        let prompt = "  Write a haiku\n\twith tabs  ";
        let req = GenerationRequest::narrative(ProviderKind::Gemini, prompt);
        assert_eq!(req.payload, prompt);
        assert_eq!(req.operation, Operation::Narrative);
        assert!(req.system_instruction.is_none());
        assert_eq!(req.response_format, ResponseFormat::Text);
    }
}
