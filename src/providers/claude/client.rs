use async_trait::async_trait;
use relay_schema::anthropic::{AnthropicErrorBody, MessagesRequest, MessagesResponse};
use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::ClaudeResolvedConfig;
use crate::error::{RelayError, UpstreamError};
use crate::providers::upstream::{build_client, post_json};
use crate::providers::{GenerationRequest, GenerationResult, ProviderKind, TextProvider};

const API_KEY_HEADER: &str = "x-api-key";
const VERSION_HEADER: &str = "anthropic-version";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Secondary provider: Anthropic Messages API.
pub struct ClaudeProvider {
    cfg: Arc<ClaudeResolvedConfig>,
}

impl ClaudeProvider {
    pub fn new(cfg: Arc<ClaudeResolvedConfig>) -> Self {
        Self { cfg }
    }

    /// Single user turn; the system instruction travels in the top-level `system` field.
    pub fn build_body(&self, request: &GenerationRequest) -> MessagesRequest {
        MessagesRequest::single_turn(
            self.cfg.model.as_str(),
            self.cfg.max_tokens,
            request.system_instruction.as_deref(),
            request.payload.as_str(),
        )
    }

    async fn call(
        &self,
        api_key: &str,
        body: &MessagesRequest,
    ) -> Result<MessagesResponse, UpstreamError> {
        let client = build_client(
            self.cfg.proxy.as_ref(),
            Duration::from_secs(self.cfg.connect_timeout_secs),
        )?;
        let url = self
            .cfg
            .api_url
            .join("v1/messages")
            .map_err(|e| UpstreamError::Build(format!("invalid Anthropic endpoint: {e}")))?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key).map_err(|_| {
            UpstreamError::Build("Anthropic API key is not a valid header value".to_string())
        })?;
        headers.insert(API_KEY_HEADER, key);
        headers.insert(VERSION_HEADER, HeaderValue::from_static(ANTHROPIC_VERSION));

        post_json::<_, _, AnthropicErrorBody>(ProviderKind::Claude, &client, url, headers, body)
            .await
    }
}

#[async_trait]
impl TextProvider for ClaudeProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, RelayError> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .ok_or(RelayError::Configuration {
                provider: ProviderKind::Claude,
            })?;

        let body = self.build_body(request);
        let resp = self
            .call(api_key, &body)
            .await
            .map_err(|e| RelayError::provider_call(ProviderKind::Claude, e))?;

        info!(
            channel = "claude",
            req.model = %self.cfg.model,
            stop_reason = resp.stop_reason.as_deref().unwrap_or("-"),
            blocks = resp.content.len(),
            "[Claude] messages completed"
        );

        let text = resp
            .first_text()
            .ok_or(RelayError::EmptyResponse {
                provider: ProviderKind::Claude,
                feedback: None,
            })?
            .to_string();
        Ok(GenerationResult { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClaudeConfig;
    use serde_json::json;

    fn provider() -> ClaudeProvider {
        let cfg = ClaudeConfig::default().resolve(&Default::default());
        ClaudeProvider::new(Arc::new(cfg))
    }

    #[test]
    fn audit_keeps_instruction_out_of_user_content() {
        let req = GenerationRequest::audit(
            ProviderKind::Claude,
            Some("You are an auditor.".to_string()),
            "User: hi",
        );
        let body = serde_json::to_value(provider().build_body(&req)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "claude-3-5-sonnet-20241022",
                "max_tokens": 4096,
                "system": "You are an auditor.",
                "messages": [{"role": "user", "content": "AUDIT TARGET LOG:\nUser: hi"}]
            })
        );
    }

    #[test]
    fn narrative_has_no_system() {
        let req = GenerationRequest::narrative(ProviderKind::Claude, "Write a haiku");
        let body = provider().build_body(&req);
        assert!(body.system.is_none());
        assert_eq!(body.messages[0].content, "Write a haiku");
    }
}
