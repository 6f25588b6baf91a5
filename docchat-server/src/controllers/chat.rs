//! Question answering: against an uploaded document, or via the remote
//! gateway for general knowledge.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use docchat_rag::RagError;
use docchat_session::{LogKind, Message};

use crate::error::{ApiError, bad_gateway, bad_request, internal_error};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub answer: String,
    pub relevant_chunks: Vec<String>,
}

/// `POST /api/chat` — answer a question against an uploaded document.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let question = request.message.trim();
    if question.is_empty() {
        return Err(bad_request("No question provided"));
    }
    let doc_id = match request.doc_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(bad_request("Please upload a PDF document first")),
    };

    let result = state.pipeline.answer(doc_id, question).await.map_err(|e| match e {
        RagError::UnknownDocument(_) => bad_request("Please upload a PDF document first"),
        other => {
            error!(document.id = %doc_id, error = %other, "answering failed");
            internal_error(other.to_string())
        }
    })?;

    if let Some(client_id) = request.client_id.as_deref().filter(|id| !id.is_empty()) {
        state
            .sessions
            .append_exchange(
                client_id,
                LogKind::Pdf,
                Message::user(question).with_doc_id(doc_id),
                Message::assistant(result.answer.clone()),
            )
            .await;
    }

    info!(document.id = %doc_id, retrieved = result.relevant_chunks.len(), "question answered");
    Ok(Json(ChatResponse {
        success: true,
        answer: result.answer,
        relevant_chunks: result.relevant_chunks,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AiChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub client_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AiChatResponse {
    pub success: bool,
    pub answer: String,
}

/// `POST /api/ai_chat` — answer a general-knowledge question through the
/// remote gateway. Gateway failures surface as 502, never as this
/// service's own errors.
pub async fn ai_chat(
    State(state): State<AppState>,
    Json(request): Json<AiChatRequest>,
) -> Result<Json<AiChatResponse>, ApiError> {
    let question = request.message.trim();
    if question.is_empty() {
        return Err(bad_request("No message provided"));
    }

    let Some(gateway) = state.gateway.as_ref() else {
        return Err(bad_gateway(docchat_gemini::Error::MissingApiKey.to_string()));
    };

    let answer = gateway.generate(question).await.map_err(|e| {
        error!(error = %e, "gateway request failed");
        bad_gateway(e.to_string())
    })?;

    if let Some(client_id) = request.client_id.as_deref().filter(|id| !id.is_empty()) {
        state
            .sessions
            .append_exchange(
                client_id,
                LogKind::Ai,
                Message::user(question),
                Message::assistant(answer.clone()),
            )
            .await;
    }

    Ok(Json(AiChatResponse { success: true, answer }))
}
