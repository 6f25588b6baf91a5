//! Error types for the `docchat-rag` crate.

use thiserror::Error;

/// Errors that can occur in the RAG pipeline.
///
/// Failures of the remote chat gateway are deliberately not represented
/// here; that subsystem carries its own error type and the two never mix.
#[derive(Debug, Error)]
pub enum RagError {
    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text extraction from an uploaded file failed or produced nothing.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during answer generation.
    #[error("Generation error ({provider}): {message}")]
    Generation {
        /// The generation backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The requested document id has never been ingested.
    #[error("unknown document id '{0}'")]
    UnknownDocument(String),

    /// The document yielded no chunks (no extractable text).
    #[error("document contains no extractable text")]
    EmptyDocument,

    /// An error in the pipeline orchestration.
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
