//! Answer synthesis: length classes, decoding constraints, and the
//! generation trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Minimum answer length in tokens, regardless of the length class.
pub const MIN_NEW_TOKENS: usize = 30;

/// Maximum prompt length in words accepted by the generation model;
/// longer context is truncated from the end rather than rejected.
pub const MAX_INPUT_TOKENS: usize = 512;

/// Target answer length class, mapping to a maximum output budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl AnswerLength {
    /// Parse a settings string; unrecognized values default to `Medium`.
    pub fn parse(s: &str) -> Self {
        match s {
            "short" => Self::Short,
            "long" => Self::Long,
            _ => Self::Medium,
        }
    }

    /// Maximum number of output tokens for this length class.
    pub fn max_new_tokens(self) -> usize {
        match self {
            Self::Short => 50,
            Self::Medium => 150,
            Self::Long => 250,
        }
    }
}

/// Constrained-decoding parameters for answer generation.
///
/// This struct is the full decoding contract; a backend forwards the
/// subset its API can express. HTTP inference servers typically honor
/// only `max_new_tokens` and `max_input_tokens` — the beam-search fields
/// (`min_new_tokens`, `num_beams`, `early_stopping`,
/// `no_repeat_ngram_size`) take effect on backends with direct control
/// over the decoding loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Maximum number of tokens to generate. Honored by every backend.
    pub max_new_tokens: usize,
    /// Minimum number of tokens to generate.
    pub min_new_tokens: usize,
    /// Beam width for beam search.
    pub num_beams: usize,
    /// Stop once all beams agree on termination.
    pub early_stopping: bool,
    /// Suppress repetition of any n-gram of this size.
    pub no_repeat_ngram_size: usize,
    /// Maximum prompt length; the caller truncates before sending, so this
    /// is honored regardless of backend.
    pub max_input_tokens: usize,
}

impl GenerationOptions {
    /// The decoding configuration for a given answer length class.
    pub fn for_length(length: AnswerLength) -> Self {
        Self {
            max_new_tokens: length.max_new_tokens(),
            min_new_tokens: MIN_NEW_TOKENS,
            num_beams: 4,
            early_stopping: true,
            no_repeat_ngram_size: 2,
            max_input_tokens: MAX_INPUT_TOKENS,
        }
    }
}

/// Build the fixed question-answering prompt from retrieved context.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "Answer the following question based on the context provided.\n\n\
         Context: {context}\n\nQuestion: {question}\n\nAnswer:"
    )
}

/// Truncate `text` to at most `max_tokens` whitespace-delimited words,
/// dropping the excess from the end.
pub fn truncate_tokens(text: &str, max_tokens: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_tokens {
        return text.to_string();
    }
    words[..max_tokens].join(" ")
}

/// A backend that produces a natural-language answer from a question and
/// retrieved context, bounded by an [`AnswerLength`] class.
///
/// This is the single most latency-sensitive operation in the system;
/// implementations must not retry on failure — a failed generation call
/// surfaces as an error to the caller.
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync {
    /// Generate an answer to `question` grounded in `context`.
    async fn generate(
        &self,
        question: &str,
        context: &str,
        length: AnswerLength,
    ) -> Result<String>;

    /// Whether the backing model has finished loading and can serve
    /// requests. Used by the startup warmup probe.
    async fn is_ready(&self) -> bool {
        true
    }
}
