use axum::{Json, extract::State};

use crate::state::AppState;

/// `GET /__debug__/settings`: the effective settings with secrets masked.
///
/// Only routed when `DEBUG=1`.
pub async fn debug_settings(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.settings.redacted())
}
