use axum::{Json, extract::State};
use relay_schema::ConfigResponse;

use crate::server::router::RelayState;

/// Storage coordinates for the browser client. Never fails.
pub async fn config_handler(State(state): State<RelayState>) -> Json<ConfigResponse> {
    let storage = &state.config.storage;
    Json(ConfigResponse {
        project_id: storage.project_id.clone(),
        bucket_name: storage.bucket_name.clone(),
    })
}
