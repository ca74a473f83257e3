use axum::{Json, extract::State};
use relay_schema::{AuditRequest, NarrativeRequest, TextResponse};

use crate::error::RelayError;
use crate::server::extract::RelayJson;
use crate::server::router::RelayState;

/// `POST /analyze`: audit a conversation log.
pub async fn analyze_handler(
    State(state): State<RelayState>,
    RelayJson(body): RelayJson<AuditRequest>,
) -> Result<Json<TextResponse>, RelayError> {
    let result = state.dispatcher.audit(body).await?;
    Ok(Json(TextResponse { text: result.text }))
}

/// `POST /narrative`: free-form generation.
pub async fn narrative_handler(
    State(state): State<RelayState>,
    RelayJson(body): RelayJson<NarrativeRequest>,
) -> Result<Json<TextResponse>, RelayError> {
    let result = state.dispatcher.narrative(body).await?;
    Ok(Json(TextResponse { text: result.text }))
}
