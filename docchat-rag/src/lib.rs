//! Retrieval-augmented generation core for answering questions about
//! uploaded documents.
//!
//! The crate is organised around a small set of composable parts:
//!
//! - [`chunking::WordChunker`] — deterministic sliding-window splitting of
//!   extracted text into overlapping word chunks
//! - [`embedding::EmbeddingProvider`] — trait for turning text into
//!   fixed-dimension vectors
//! - [`retriever`] — cosine-similarity ranking of chunk vectors against a
//!   query vector
//! - [`synthesis::AnswerSynthesizer`] — trait for producing a bounded-length
//!   answer from a question and retrieved context
//! - [`index::DocumentIndex`] — in-memory store of processed documents
//! - [`pipeline::RagPipeline`] — the orchestrator tying the above together
//!
//! Concrete model backends live in [`ollama`]; they talk to a local
//! inference server over HTTP so the same provider instance embeds both
//! chunks and queries, keeping the vector spaces comparable.

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod index;
pub mod ollama;
pub mod pipeline;
pub mod retriever;
pub mod synthesis;

pub use chunking::WordChunker;
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{DocumentEntry, RagAnswer};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use extract::extract_pdf_text;
pub use index::DocumentIndex;
pub use ollama::{OllamaEmbeddingProvider, OllamaSynthesizer};
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use synthesis::{AnswerLength, AnswerSynthesizer, GenerationOptions};
