//! Model backends served by a local Ollama-compatible inference server.
//!
//! Both providers talk to the same server; the embedding and generation
//! models are loaded there once and shared by all requests, so neither
//! provider holds model state of its own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::synthesis::{AnswerLength, AnswerSynthesizer, GenerationOptions, build_prompt,
                       truncate_tokens};

/// Default dimensionality for sentence-transformer style embedding models.
const DEFAULT_DIMENSIONS: usize = 384;

fn api_url(base: &str, path: &str) -> String {
    format!("{}/api{}", base.trim_end_matches('/'), path)
}

/// Probe the inference server's model listing endpoint.
async fn server_reachable(client: &reqwest::Client, base: &str) -> bool {
    match client.get(api_url(base, "/tags")).send().await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

// ── Embedding provider ─────────────────────────────────────────────

/// An [`EmbeddingProvider`] backed by a local inference server's
/// embeddings endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use docchat_rag::OllamaEmbeddingProvider;
///
/// let provider = OllamaEmbeddingProvider::new(
///     "http://localhost:11434",
///     "all-minilm",
///     384,
/// )?;
/// let embedding = provider.embed("hello world").await?;
/// ```
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbeddingProvider {
    /// Create a new provider for the given server and model.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Result<Self> {
        let model = model.into();
        if model.is_empty() {
            return Err(RagError::Embedding {
                provider: "Ollama".into(),
                message: "embedding model name must not be empty".into(),
            });
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model,
            dimensions: if dimensions == 0 { DEFAULT_DIMENSIONS } else { dimensions },
        })
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Ollama", text_len = text.len(), "embedding text");

        let request = EmbeddingRequest { model: &self.model, prompt: text };
        let response = self
            .client
            .post(api_url(&self.base_url, "/embeddings"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "embedding request failed");
                RagError::Embedding {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(provider = "Ollama", %status, "embedding API error");
            return Err(RagError::Embedding {
                provider: "Ollama".into(),
                message: format!("API returned {status}: {body}"),
            });
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            RagError::Embedding {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(parsed.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn is_ready(&self) -> bool {
        server_reachable(&self.client, &self.base_url).await
    }
}

// ── Answer synthesizer ─────────────────────────────────────────────

/// An [`AnswerSynthesizer`] backed by a local inference server's
/// generation endpoint.
///
/// The prompt is truncated to the model's input window before sending.
/// Decoding constraints that the server does not understand (beam width,
/// no-repeat n-gram size) are applied by backends that support them; the
/// output token budget is always forwarded. No retries: a failed call is
/// the caller's error.
pub struct OllamaSynthesizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaSynthesizer {
    /// Create a new synthesizer for the given server and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        if model.is_empty() {
            return Err(RagError::Generation {
                provider: "Ollama".into(),
                message: "generation model name must not be empty".into(),
            });
        }
        Ok(Self { client: reqwest::Client::new(), base_url: base_url.into(), model })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: i32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl AnswerSynthesizer for OllamaSynthesizer {
    async fn generate(
        &self,
        question: &str,
        context: &str,
        length: AnswerLength,
    ) -> Result<String> {
        let options = GenerationOptions::for_length(length);
        let prompt = truncate_tokens(&build_prompt(question, context), options.max_input_tokens);

        debug!(
            provider = "Ollama",
            prompt_len = prompt.len(),
            max_new_tokens = options.max_new_tokens,
            "generating answer"
        );

        let request = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
            options: GenerateOptions { num_predict: options.max_new_tokens as i32 },
        };

        let response = self
            .client
            .post(api_url(&self.base_url, "/generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "generation request failed");
                RagError::Generation {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(provider = "Ollama", %status, "generation API error");
            return Err(RagError::Generation {
                provider: "Ollama".into(),
                message: format!("API returned {status}: {body}"),
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            RagError::Generation {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(parsed.response.trim().to_string())
    }

    async fn is_ready(&self) -> bool {
        server_reachable(&self.client, &self.base_url).await
    }
}
