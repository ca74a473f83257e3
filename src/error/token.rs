use oauth2::basic::BasicErrorResponse;
use std::path::PathBuf;
use thiserror::Error as ThisError;

use super::RelayError;

#[derive(Debug, ThisError)]
pub enum TokenError {
    #[error("credentials file not found at {}", path.display())]
    CredentialFileMissing { path: PathBuf },

    #[error("failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid service account key: {0}")]
    InvalidKey(#[from] serde_json::Error),

    #[error("failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("token endpoint request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("token endpoint rejected the assertion: {0}")]
    Rejected(BasicErrorResponse),

    #[error("token endpoint returned status {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl From<TokenError> for RelayError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::CredentialFileMissing { path } => RelayError::CredentialFileMissing { path },
            other => RelayError::TokenRefresh(other.to_string()),
        }
    }
}
