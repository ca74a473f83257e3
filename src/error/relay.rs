use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_schema::ErrorDetail;
use std::path::PathBuf;
use thiserror::Error as ThisError;

use crate::providers::ProviderKind;

/// Every failure the relay reports to a caller.
///
/// Each variant renders as exactly one `{"detail": ...}` response.
#[derive(Debug, ThisError)]
pub enum RelayError {
    /// Required credential absent; raised before any outbound call.
    #[error("missing credential for provider {provider}")]
    Configuration { provider: ProviderKind },

    /// The outbound provider call failed; `message` is the cause, verbatim.
    #[error("{message}")]
    ProviderCall {
        provider: ProviderKind,
        message: String,
    },

    /// The provider call completed but produced no usable text.
    #[error("{}", describe_empty_response(*provider, feedback.as_deref()))]
    EmptyResponse {
        provider: ProviderKind,
        feedback: Option<String>,
    },

    #[error("credentials file not found at {}", path.display())]
    CredentialFileMissing { path: PathBuf },

    #[error("{0}")]
    TokenRefresh(String),

    /// Malformed or incomplete inbound request.
    #[error("{0}")]
    InvalidRequest(String),
}

fn describe_empty_response(provider: ProviderKind, feedback: Option<&str>) -> String {
    match feedback {
        Some(feedback) => format!("{provider} blocked response: {feedback}"),
        None => format!("{provider} returned empty response"),
    }
}

impl RelayError {
    pub fn provider_call(provider: ProviderKind, cause: impl std::fmt::Display) -> Self {
        RelayError::ProviderCall {
            provider,
            message: cause.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            RelayError::InvalidRequest(message) => {
                tracing::warn!(status = %status, message = %message, "Request rejected");
            }
            RelayError::Configuration { provider } => {
                tracing::error!(status = %status, provider = %provider, "Provider credential missing");
            }
            RelayError::ProviderCall { provider, message } => {
                tracing::error!(status = %status, provider = %provider, error = %message, "Provider call failed");
            }
            RelayError::EmptyResponse { provider, feedback } => {
                tracing::warn!(
                    status = %status,
                    provider = %provider,
                    feedback = feedback.as_deref().unwrap_or("<none>"),
                    "Provider returned no text"
                );
            }
            RelayError::CredentialFileMissing { .. } | RelayError::TokenRefresh(_) => {
                tracing::error!(status = %status, error = %self, "Token brokering failed");
            }
        }

        let body = ErrorDetail {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
