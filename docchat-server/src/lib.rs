//! HTTP API for document question-answering and general chat.
//!
//! Five endpoints under `/api`:
//!
//! - `POST /api/upload` — accept a PDF and index it for retrieval
//! - `POST /api/chat` — answer a question against an uploaded document
//! - `POST /api/ai_chat` — answer a general question via the remote gateway
//! - `GET /api/get_session` — a client's chat history
//! - `GET /api/status` — liveness and model readiness
//!
//! Every error response is `{"success": false, "error": "..."}` with a
//! status of 400 (client mistake), 500 (local fault), or 502 (gateway
//! fault).

pub mod controllers;
pub mod error;
pub mod settings;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::controllers::{chat, session, status, upload};
pub use crate::settings::Settings;
pub use crate::state::AppState;

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/upload", post(upload::upload))
        .route("/api/chat", post(chat::chat))
        .route("/api/ai_chat", post(chat::ai_chat))
        .route("/api/get_session", get(session::get_session))
        .route("/api/status", get(status::status))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
