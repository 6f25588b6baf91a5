//! JSON error responses.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Body of every error response: `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody { success: false, error: message.into() }))
}

/// A client mistake: missing input, wrong file type, unknown document.
pub fn bad_request(message: impl Into<String>) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, message)
}

/// A fault in this service or its local models.
pub fn internal_error(message: impl Into<String>) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// A failure in the remote chat gateway.
pub fn bad_gateway(message: impl Into<String>) -> ApiError {
    api_error(StatusCode::BAD_GATEWAY, message)
}
