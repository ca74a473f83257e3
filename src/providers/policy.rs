use relay_schema::{AnthropicErrorBody, GeminiErrorBody};
use serde::de::DeserializeOwned;

use crate::utils::logging::body_preview;

/// A provider's structured error envelope.
pub trait ErrorEnvelope: DeserializeOwned {
    fn into_message(self) -> String;
}

impl ErrorEnvelope for GeminiErrorBody {
    fn into_message(self) -> String {
        if self.inner.status.is_empty() {
            self.inner.message
        } else {
            format!("{}: {}", self.inner.status, self.inner.message)
        }
    }
}

impl ErrorEnvelope for AnthropicErrorBody {
    fn into_message(self) -> String {
        if self.inner.kind.is_empty() {
            self.inner.message
        } else {
            format!("{}: {}", self.inner.kind, self.inner.message)
        }
    }
}

/// Best message for a failed upstream body: the envelope's message, else a raw preview.
pub fn upstream_error_message<E: ErrorEnvelope>(bytes: &[u8]) -> String {
    if let Ok(envelope) = serde_json::from_slice::<E>(bytes) {
        return envelope.into_message();
    }
    body_preview(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logging::BODY_PREVIEW_CHARS;

    #[test]
    fn gemini_envelope_message_includes_status() {
        let body = br#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            upstream_error_message::<GeminiErrorBody>(body),
            "INVALID_ARGUMENT: API key not valid."
        );
    }

    #[test]
    fn anthropic_envelope_message_includes_type() {
        let body = br#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        assert_eq!(
            upstream_error_message::<AnthropicErrorBody>(body),
            "authentication_error: invalid x-api-key"
        );
    }

    #[test]
    fn unstructured_body_is_previewed() {
        let body = "x".repeat(BODY_PREVIEW_CHARS + 50);
        let message = upstream_error_message::<GeminiErrorBody>(body.as_bytes());
        assert_eq!(message.len(), BODY_PREVIEW_CHARS);
    }
}
