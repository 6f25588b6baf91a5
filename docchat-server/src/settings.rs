//! Service settings loaded from a YAML file at startup.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Deserializer};

use docchat_rag::{AnswerLength, RagConfig};

/// Unrecognized answer-length strings fall back to the default class
/// instead of failing the whole config load.
fn lenient_answer_length<'de, D>(deserializer: D) -> Result<AnswerLength, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(AnswerLength::parse(&raw))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_chunk_size() -> usize {
    200
}

fn default_chunk_overlap() -> usize {
    20
}

fn default_top_k_chunks() -> usize {
    3
}

fn default_embedding_model() -> String {
    "all-minilm".to_string()
}

fn default_generation_model() -> String {
    "qwen2.5:0.5b".to_string()
}

fn default_inference_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_dimensions() -> usize {
    384
}

/// Service configuration, read once at startup and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory where uploaded PDFs are saved.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    #[serde(default = "default_top_k_chunks")]
    pub top_k_chunks: usize,
    #[serde(default, deserialize_with = "lenient_answer_length")]
    pub answer_length: AnswerLength,

    /// Embedding model name on the local inference server.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    /// Generation model name on the local inference server.
    #[serde(default = "default_generation_model")]
    pub generation_model: String,
    /// Base URL of the local inference server.
    #[serde(default = "default_inference_url")]
    pub inference_url: String,
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        serde_yaml::from_str("{}").expect("unreachable error: defaults must deserialize")
    }
}

impl Settings {
    /// Load settings from a YAML file. A missing file is an error; use
    /// [`Settings::default`] when running without one.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let settings: Settings = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        Ok(settings)
    }

    /// The retrieval pipeline configuration derived from these settings.
    pub fn rag_config(&self) -> docchat_rag::Result<RagConfig> {
        RagConfig::builder()
            .chunk_size(self.chunk_size)
            .chunk_overlap(self.chunk_overlap)
            .top_k_chunks(self.top_k_chunks)
            .answer_length(self.answer_length)
            .build()
    }
}
