//! Session history retrieval.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use docchat_session::SessionLogs;

use crate::error::{ApiError, bad_request};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(default)]
    pub client_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session: SessionLogs,
}

/// `GET /api/get_session?client_id=...` — a client's full history. A new
/// client id gets an empty session, not an error.
pub async fn get_session(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<SessionResponse>, ApiError> {
    let client_id = match query.client_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(bad_request("client_id required")),
    };

    let session = state.sessions.get_or_create(client_id).await;
    Ok(Json(SessionResponse { success: true, session }))
}
