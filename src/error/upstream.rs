use reqwest::StatusCode;
use thiserror::Error as ThisError;

/// Failures of a single provider round trip, before they are tagged with a provider.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// 2xx response whose body did not match the provider schema.
    #[error("malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The outbound request could not be assembled (bad endpoint URL, bad key bytes).
    #[error("invalid outbound request: {0}")]
    Build(String),

    /// Non-2xx response; `message` comes from the provider's error envelope when it has one.
    #[error("upstream error ({status}): {message}")]
    Status { status: StatusCode, message: String },
}
