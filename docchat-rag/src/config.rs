//! Configuration for the RAG pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};
use crate::synthesis::AnswerLength;

/// Configuration parameters for the RAG pipeline.
///
/// Loaded once at startup and treated as read-only for the process
/// lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Window size for chunking, in words.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks, in words.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question.
    pub top_k_chunks: usize,
    /// Target answer length class.
    pub answer_length: AnswerLength,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 200,
            chunk_overlap: 20,
            top_k_chunks: 3,
            answer_length: AnswerLength::Medium,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the chunk window size in words.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in words.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the retrieval fan-out.
    pub fn top_k_chunks(mut self, k: usize) -> Self {
        self.config.top_k_chunks = k;
        self
    }

    /// Set the answer length class.
    pub fn answer_length(mut self, length: AnswerLength) -> Self {
        self.config.answer_length = length;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `chunk_overlap >= chunk_size` or
    /// `top_k_chunks == 0`.
    pub fn build(self) -> Result<RagConfig> {
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k_chunks == 0 {
            return Err(RagError::Config("top_k_chunks must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_inconsistent_chunking() {
        let err = RagConfig::builder().chunk_size(10).chunk_overlap(10).build();
        assert!(matches!(err, Err(RagError::Config(_))));
    }

    #[test]
    fn builder_rejects_zero_fan_out() {
        let err = RagConfig::builder().top_k_chunks(0).build();
        assert!(matches!(err, Err(RagError::Config(_))));
    }

    #[test]
    fn builder_accepts_defaults() {
        let config = RagConfig::builder().build().unwrap();
        assert_eq!(config, RagConfig::default());
    }
}
