//! Plain-text extraction from uploaded PDF files.
//!
//! Thin wrapper over the `pdftotext` binary (poppler-utils). The binary is
//! invoked per file; no text post-processing happens here.

use std::path::Path;

use tracing::debug;

use crate::error::{RagError, Result};

/// Extract all text content from a PDF file on disk.
///
/// # Errors
///
/// Returns [`RagError::Extraction`] when the `pdftotext` binary cannot be
/// run or exits with a failure status. An empty result is returned as-is;
/// callers that require content treat it as an empty-document error.
pub async fn extract_pdf_text(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "extracting text with pdftotext");

    let output = tokio::process::Command::new("pdftotext")
        .arg("-enc")
        .arg("UTF-8")
        .arg(path)
        .arg("-")
        .output()
        .await
        .map_err(|e| {
            RagError::Extraction(format!("failed to run pdftotext: {e} (is poppler installed?)"))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RagError::Extraction(format!("pdftotext failed: {}", stderr.trim())));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
