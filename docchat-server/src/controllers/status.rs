//! Service liveness and model readiness.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub models_loaded: bool,
}

/// `GET /api/status` — always "online" once the listener is up; the flag
/// reports whether the local models have finished warming up.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse { status: "online", models_loaded: state.models_ready() })
}
