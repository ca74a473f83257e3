use axum::{Json, extract::State};
use relay_schema::TokenResponse;

use crate::error::RelayError;
use crate::server::router::RelayState;

pub async fn token_handler(
    State(state): State<RelayState>,
) -> Result<Json<TokenResponse>, RelayError> {
    let access_token = state.token_broker.access_token().await?;
    Ok(Json(TokenResponse { access_token }))
}
