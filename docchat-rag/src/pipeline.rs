//! The RAG pipeline: ingest documents, answer questions against them.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::chunking::WordChunker;
use crate::config::RagConfig;
use crate::document::{DocumentEntry, RagAnswer};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::DocumentIndex;
use crate::retriever::top_k_indices;
use crate::synthesis::AnswerSynthesizer;

/// The document question-answering pipeline.
///
/// Owns the chunker, the embedding and generation backends, and the
/// in-memory document index. One pipeline instance is shared across all
/// requests for the process lifetime.
///
/// # Example
///
/// ```rust,ignore
/// use docchat_rag::{RagPipeline, RagConfig, OllamaEmbeddingProvider, OllamaSynthesizer};
/// use std::sync::Arc;
///
/// let pipeline = RagPipeline::builder()
///     .config(RagConfig::default())
///     .embedding_provider(Arc::new(embedder))
///     .synthesizer(Arc::new(generator))
///     .build()?;
///
/// let entry = pipeline.ingest("doc-1", "paper.pdf", &text, path).await?;
/// let answer = pipeline.answer("doc-1", "What is the main finding?").await?;
/// ```
pub struct RagPipeline {
    config: RagConfig,
    chunker: WordChunker,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    synthesizer: Arc<dyn AnswerSynthesizer>,
    index: DocumentIndex,
}

impl RagPipeline {
    /// Create a new builder for constructing a [`RagPipeline`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// The document index.
    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }

    /// Whether both model backends are loaded and able to serve requests.
    pub async fn is_ready(&self) -> bool {
        self.embedding_provider.is_ready().await && self.synthesizer.is_ready().await
    }

    /// Process a document's extracted text and add it to the index.
    ///
    /// Splits the text into overlapping word windows, embeds every chunk,
    /// and stores the result under `document_id`. Returns the stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyDocument`] if the text contains no words,
    /// and [`RagError::Pipeline`] if the embedding backend fails or returns
    /// a mismatched number of vectors.
    pub async fn ingest(
        &self,
        document_id: impl Into<String>,
        display_name: impl Into<String>,
        text: &str,
        file_path: PathBuf,
    ) -> Result<Arc<DocumentEntry>> {
        let document_id = document_id.into();
        let display_name = display_name.into();

        let chunks = self.chunker.split(text);
        if chunks.is_empty() {
            return Err(RagError::EmptyDocument);
        }
        debug!(document.id = %document_id, chunk_count = chunks.len(), "chunked document");

        let chunk_refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let embeddings = self
            .embedding_provider
            .embed_batch(&chunk_refs)
            .await
            .map_err(|e| {
                RagError::Pipeline(format!("failed to embed document '{document_id}': {e}"))
            })?;

        if embeddings.len() != chunks.len() {
            return Err(RagError::Pipeline(format!(
                "embedding count mismatch for document '{}': {} chunks, {} vectors",
                document_id,
                chunks.len(),
                embeddings.len()
            )));
        }

        let entry = self
            .index
            .put(DocumentEntry { document_id, display_name, chunks, embeddings, file_path })
            .await;

        info!(
            document.id = %entry.document_id,
            chunk_count = entry.chunk_count(),
            "document ingested"
        );
        Ok(entry)
    }

    /// Answer a question against a previously ingested document.
    ///
    /// Embeds the question, retrieves the most similar chunks, and asks the
    /// synthesizer for an answer grounded in their concatenation. The
    /// retrieved chunk texts are returned alongside the answer, in rank
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::UnknownDocument`] if `document_id` was never
    /// ingested; embedding and generation failures propagate as
    /// [`RagError::Embedding`] and [`RagError::Generation`].
    pub async fn answer(&self, document_id: &str, question: &str) -> Result<RagAnswer> {
        let entry = self
            .index
            .get(document_id)
            .await
            .ok_or_else(|| RagError::UnknownDocument(document_id.to_string()))?;

        let query_embedding = self.embedding_provider.embed(question).await?;
        let ranked = top_k_indices(&query_embedding, &entry.embeddings, self.config.top_k_chunks);
        let relevant_chunks: Vec<String> =
            ranked.iter().map(|&i| entry.chunks[i].clone()).collect();

        debug!(
            document.id = %document_id,
            retrieved = relevant_chunks.len(),
            "retrieved context for question"
        );

        let context = relevant_chunks.join(" ");
        let answer = self
            .synthesizer
            .generate(question, &context, self.config.answer_length)
            .await?;

        Ok(RagAnswer { answer, relevant_chunks })
    }
}

/// Builder for constructing a [`RagPipeline`].
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    synthesizer: Option<Arc<dyn AnswerSynthesizer>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration. Defaults to [`RagConfig::default`].
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding backend. Required.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the generation backend. Required.
    pub fn synthesizer(mut self, synthesizer: Arc<dyn AnswerSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Build the [`RagPipeline`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if a required backend is missing or the
    /// chunking parameters are inconsistent.
    pub fn build(self) -> Result<RagPipeline> {
        let config = self.config.unwrap_or_default();
        let chunker = WordChunker::new(config.chunk_size, config.chunk_overlap)?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::Config("embedding provider is required".to_string()))?;
        let synthesizer = self
            .synthesizer
            .ok_or_else(|| RagError::Config("answer synthesizer is required".to_string()))?;

        Ok(RagPipeline {
            config,
            chunker,
            embedding_provider,
            synthesizer,
            index: DocumentIndex::new(),
        })
    }
}
