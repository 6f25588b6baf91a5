//! PDF upload and ingestion.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use docchat_rag::{RagError, extract_pdf_text};

use crate::error::{ApiError, bad_request, internal_error};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub doc_id: String,
    pub filename: String,
    pub chunks_count: usize,
    pub message: String,
}

/// Strip path components and shell-hostile characters from a client-supplied
/// filename. The result is only ever used as a suffix after the generated
/// document id.
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' }
        })
        .collect()
}

/// `POST /api/upload` — accept a PDF, extract its text, and index it.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(bad_request("No file selected"));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("failed to read upload: {e}")))?;
        file = Some((filename, bytes.to_vec()));
        break;
    }

    let Some((filename, bytes)) = file else {
        return Err(bad_request("No file provided"));
    };
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(bad_request("Only PDF files are allowed"));
    }

    let doc_id = Uuid::new_v4().to_string();
    let safe_name = sanitize_filename(&filename);
    let path = state.upload_dir.join(format!("{doc_id}_{safe_name}"));

    tokio::fs::write(&path, &bytes).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to save upload");
        internal_error("Failed to save uploaded file")
    })?;
    info!(document.id = %doc_id, filename = %safe_name, size = bytes.len(), "upload saved");

    let text = match extract_pdf_text(&path).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(_) => {
            // A PDF the extractor cannot read is useless on disk too.
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "failed to remove unreadable upload");
            }
            return Err(bad_request("Could not extract text from PDF"));
        }
    };

    let entry = state
        .pipeline
        .ingest(&doc_id, &filename, &text, path.clone())
        .await
        .map_err(|e| match e {
            RagError::EmptyDocument => bad_request("Could not extract text from PDF"),
            other => {
                error!(document.id = %doc_id, error = %other, "ingestion failed");
                internal_error(other.to_string())
            }
        })?;

    let chunks_count = entry.chunk_count();
    Ok(Json(UploadResponse {
        success: true,
        doc_id,
        filename,
        chunks_count,
        message: format!("PDF processed successfully! Created {chunks_count} chunks."),
    }))
}
