use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::RelayError;
use crate::utils::logging::with_pretty_json_debug;

/// JSON body extractor that ignores `Content-Type`.
///
/// Callers post with whatever header their fetch wrapper sets, so only the body
/// itself is validated. Any read or parse failure becomes `RelayError::InvalidRequest`.
pub struct RelayJson<T>(pub T);

impl<S, T> FromRequest<S> for RelayJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Serialize,
{
    type Rejection = RelayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_string();
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| RelayError::InvalidRequest(rejection.body_text()))?;

        let body: T = serde_json::from_slice(&bytes)
            .map_err(|e| RelayError::InvalidRequest(format!("invalid JSON body: {e}")))?;

        with_pretty_json_debug(&body, |pretty_body| {
            debug!(req.path = %path, body = %pretty_body, "Extracted request body");
        });
        Ok(RelayJson(body))
    }
}
