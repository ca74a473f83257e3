use relay_schema::{AuditRequest, NarrativeRequest};
use std::time::Instant;
use tracing::info;

use crate::error::RelayError;
use crate::providers::{GenerationRequest, GenerationResult, ProviderKind, Providers};

/// Routes normalized generation requests to providers and normalizes their results.
#[derive(Clone)]
pub struct Dispatcher {
    providers: Providers,
}

impl Dispatcher {
    pub fn new(providers: Providers) -> Self {
        Self { providers }
    }

    /// Audit a conversation log: framed payload, separate system instruction, JSON output.
    pub async fn audit(&self, req: AuditRequest) -> Result<GenerationResult, RelayError> {
        let chat_log = require_non_empty(req.chat_log, "chat_log")?;
        let provider = ProviderKind::from_model_type(&req.model_type);
        self.dispatch(GenerationRequest::audit(provider, req.system_prompt, &chat_log))
            .await
    }

    /// Free-form prompt sent verbatim.
    pub async fn narrative(&self, req: NarrativeRequest) -> Result<GenerationResult, RelayError> {
        let prompt = require_non_empty(req.prompt, "prompt")?;
        let provider = ProviderKind::from_model_type(&req.model_type);
        self.dispatch(GenerationRequest::narrative(provider, prompt))
            .await
    }

    pub async fn dispatch(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, RelayError> {
        let provider = self
            .providers
            .get(request.provider)
            .ok_or(RelayError::Configuration {
                provider: request.provider,
            })?;

        let start = Instant::now();
        let result = provider.generate(&request).await?;
        if result.text.is_empty() {
            return Err(RelayError::EmptyResponse {
                provider: request.provider,
                feedback: None,
            });
        }

        info!(
            provider = %request.provider,
            operation = ?request.operation,
            payload_chars = request.payload.chars().count(),
            text_chars = result.text.chars().count(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Generation dispatched"
        );
        Ok(result)
    }
}

fn require_non_empty(value: Option<String>, field: &str) -> Result<String, RelayError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RelayError::InvalidRequest(format!("{field} must be a non-empty string")))
}
