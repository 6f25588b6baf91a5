//! Data types for indexed documents and retrieval results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A fully processed document held by the [`DocumentIndex`](crate::index::DocumentIndex).
///
/// Entries are constructed once at upload time and never mutated afterwards.
/// `chunks` and `embeddings` are index-aligned: `embeddings[i]` is the vector
/// for `chunks[i]`, and all vectors share one dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentEntry {
    /// Opaque unique identifier assigned at upload time.
    pub document_id: String,
    /// The original (sanitized) filename, for display.
    pub display_name: String,
    /// Ordered chunk texts.
    pub chunks: Vec<String>,
    /// Embedding vectors, one per chunk, index-aligned with `chunks`.
    pub embeddings: Vec<Vec<f32>>,
    /// Where the uploaded file was stored on disk.
    pub file_path: PathBuf,
}

impl DocumentEntry {
    /// Number of chunks in this entry.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

/// The result of answering a question against an indexed document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagAnswer {
    /// The synthesized answer text.
    pub answer: String,
    /// The literal retrieved chunk texts, most relevant first.
    pub relevant_chunks: Vec<String>,
}
