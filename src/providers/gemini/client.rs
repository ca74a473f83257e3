use async_trait::async_trait;
use relay_schema::gemini::{
    GeminiErrorBody, GeminiGenerateContentRequest, GeminiResponseBody, GenerationConfig,
};
use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::SAFETY_POLICY;
use crate::config::GeminiResolvedConfig;
use crate::error::{RelayError, UpstreamError};
use crate::providers::upstream::{build_client, post_json};
use crate::providers::{
    GenerationRequest, GenerationResult, Operation, ProviderKind, ResponseFormat, TextProvider,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Primary provider: Gemini `generateContent`.
pub struct GeminiProvider {
    cfg: Arc<GeminiResolvedConfig>,
}

impl GeminiProvider {
    pub fn new(cfg: Arc<GeminiResolvedConfig>) -> Self {
        Self { cfg }
    }

    /// Map a normalized request onto the Gemini wire shape.
    ///
    /// Audits carry the safety policy; a JSON response format sets `responseMimeType`.
    pub fn build_body(request: &GenerationRequest) -> GeminiGenerateContentRequest {
        let mut body = GeminiGenerateContentRequest::from_user_text(request.payload.as_str())
            .with_system_instruction(request.system_instruction.as_deref());

        if request.response_format == ResponseFormat::Json {
            body.generation_config = Some(GenerationConfig::json_output());
        }
        if request.operation == Operation::Audit {
            body.safety_settings = Some(SAFETY_POLICY.to_vec());
        }
        body
    }

    /// Text of the response, or an empty-response error carrying any block reason.
    pub fn extract_text(resp: &GeminiResponseBody) -> Result<String, RelayError> {
        if let Some(text) = resp.text() {
            return Ok(text);
        }

        let feedback = resp
            .prompt_feedback
            .as_ref()
            .filter(|feedback| feedback.is_informative())
            .map(ToString::to_string)
            .or_else(|| {
                resp.candidates
                    .first()
                    .and_then(|candidate| candidate.finish_reason.as_deref())
                    .filter(|reason| *reason != "STOP")
                    .map(|reason| format!("finish_reason: {reason}"))
            });

        Err(RelayError::EmptyResponse {
            provider: ProviderKind::Gemini,
            feedback,
        })
    }

    async fn call(
        &self,
        api_key: &str,
        body: &GeminiGenerateContentRequest,
    ) -> Result<GeminiResponseBody, UpstreamError> {
        let client = build_client(
            self.cfg.proxy.as_ref(),
            Duration::from_secs(self.cfg.connect_timeout_secs),
        )?;
        let url = self
            .cfg
            .api_url
            .join(&format!("v1beta/models/{}:generateContent", self.cfg.model))
            .map_err(|e| UpstreamError::Build(format!("invalid Gemini endpoint: {e}")))?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key).map_err(|_| {
            UpstreamError::Build("Gemini API key is not a valid header value".to_string())
        })?;
        headers.insert(API_KEY_HEADER, key);

        post_json::<_, _, GeminiErrorBody>(ProviderKind::Gemini, &client, url, headers, body).await
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, RelayError> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .ok_or(RelayError::Configuration {
                provider: ProviderKind::Gemini,
            })?;

        let body = Self::build_body(request);
        let resp = self
            .call(api_key, &body)
            .await
            .map_err(|e| RelayError::provider_call(ProviderKind::Gemini, e))?;

        info!(
            channel = "gemini",
            req.model = %self.cfg.model,
            model_version = resp.model_version.as_deref().unwrap_or("-"),
            candidates = resp.candidates.len(),
            "[Gemini] generateContent completed"
        );

        let text = Self::extract_text(&resp)?;
        Ok(GenerationResult { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn audit() -> GenerationRequest {
        GenerationRequest::audit(
            ProviderKind::Gemini,
            Some("You are an auditor.".to_string()),
            "User: hi",
        )
    }

    #[test]
    fn audit_body_carries_instruction_json_hint_and_safety() {
        let body = serde_json::to_value(GeminiProvider::build_body(&audit())).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "AUDIT TARGET LOG:\nUser: hi"}]}],
                "systemInstruction": {"parts": [{"text": "You are an auditor."}]},
                "generationConfig": {"responseMimeType": "application/json"},
                "safetySettings": [
                    {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE"},
                    {"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_NONE"},
                    {"category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_NONE"},
                    {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE"}
                ]
            })
        );
    }

    #[test]
    fn narrative_body_is_bare_prompt() {
        let req = GenerationRequest::narrative(ProviderKind::Gemini, "Write a haiku");
        let body = serde_json::to_value(GeminiProvider::build_body(&req)).unwrap();
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "Write a haiku"}]}]})
        );
    }

    #[test]
    fn block_reason_is_reported_on_empty_text() {
        let resp: GeminiResponseBody =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "PROHIBITED_CONTENT"}}))
                .unwrap();
        let err = GeminiProvider::extract_text(&resp).unwrap_err();
        assert_eq!(
            err.to_string(),
            "gemini blocked response: block_reason: PROHIBITED_CONTENT"
        );
    }

    #[test]
    fn finish_reason_is_reported_when_candidate_is_empty() {
        let resp: GeminiResponseBody = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY", "index": 0}]
        }))
        .unwrap();
        let err = GeminiProvider::extract_text(&resp).unwrap_err();
        assert_eq!(
            err.to_string(),
            "gemini blocked response: finish_reason: SAFETY"
        );
    }

    #[test]
    fn plain_empty_response_has_generic_message() {
        let resp: GeminiResponseBody = serde_json::from_value(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": ""}]}, "finishReason": "STOP"}]
        }))
        .unwrap();
        let err = GeminiProvider::extract_text(&resp).unwrap_err();
        assert_eq!(err.to_string(), "gemini returned empty response");
    }
}
