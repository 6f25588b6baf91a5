//! HTTP client for the Gemini `generateContent` endpoint.

use std::fmt::{self, Formatter};
use std::sync::LazyLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use tracing::debug;
use url::Url;

static DEFAULT_BASE_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://generativelanguage.googleapis.com/v1beta/")
        .expect("unreachable error: failed to parse default base URL")
});

/// Per-request timeout. Generation calls that exceed this are failed, not
/// retried.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Gemini model selection.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Model {
    #[default]
    #[serde(rename = "models/gemini-2.5-pro")]
    Gemini25Pro,
    #[serde(rename = "models/gemini-2.5-flash")]
    Gemini25Flash,
    #[serde(untagged)]
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Pro => "models/gemini-2.5-pro",
            Model::Gemini25Flash => "models/gemini-2.5-flash",
            Model::Custom(model) => model,
        }
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        match model.as_str() {
            "gemini-2.5-pro" | "models/gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" | "models/gemini-2.5-flash" => Model::Gemini25Flash,
            _ if model.starts_with("models/") => Model::Custom(model),
            _ => Model::Custom(format!("models/{model}")),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("GEMINI_API_KEY not set in environment"))]
    MissingApiKey,

    #[snafu(display("failed to parse API key"))]
    InvalidApiKey { source: InvalidHeaderValue },

    #[snafu(display("failed to build HTTP client"))]
    BuildClient { source: reqwest::Error },

    #[snafu(display("failed to construct URL (probably incorrect model name): {suffix}"))]
    ConstructUrl { source: url::ParseError, suffix: String },

    #[snafu(display("failed to perform request to '{url}'"))]
    PerformRequest { source: reqwest::Error, url: Url },

    #[snafu(display("Gemini API returned {code}: {}", body.as_deref().unwrap_or("none")))]
    BadResponse {
        /// HTTP status code
        code: u16,
        /// HTTP error body
        body: Option<String>,
    },

    #[snafu(display("failed to deserialize JSON response"))]
    Deserialize { source: reqwest::Error },

    #[snafu(display("response hit the output token limit before producing any text"))]
    TokenLimit,

    #[snafu(display("no text found in response: {payload}"))]
    MissingText { payload: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// A `generateContent` response, reduced to the fields this client reads.
#[derive(Debug, Default, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

/// Pull the answer text out of a parsed response.
///
/// The first candidate's first text part is the answer. A candidate that
/// stopped on `MAX_TOKENS` still yields its partial text; only when the
/// limit left no text at all does this fail with [`Error::TokenLimit`].
/// `raw_payload` is carried into [`Error::MissingText`] so malformed
/// responses can be diagnosed from logs.
pub fn extract_text(response: &GenerationResponse, raw_payload: &str) -> Result<String, Error> {
    let candidate = response.candidates.first().ok_or_else(|| Error::MissingText {
        payload: raw_payload.to_string(),
    })?;

    let text = candidate
        .content
        .as_ref()
        .and_then(|content| content.parts.iter().find_map(|p| p.text.clone()));

    match text {
        Some(text) => Ok(text),
        None if candidate.finish_reason.as_deref() == Some("MAX_TOKENS") => Err(Error::TokenLimit),
        None => Err(Error::MissingText { payload: raw_payload.to_string() }),
    }
}

/// Client for the Gemini API, used for questions that need general
/// knowledge rather than an uploaded document.
///
/// # Example
///
/// ```rust,ignore
/// use docchat_gemini::GeminiClient;
///
/// let client = GeminiClient::from_env()?;
/// let answer = client.generate("What is the capital of France?").await?;
/// ```
pub struct GeminiClient {
    http_client: Client,
    model: Model,
    base_url: Url,
}

impl GeminiClient {
    /// Create a client for `model` authenticating with `api_key`.
    pub fn new<K: AsRef<str>, M: Into<Model>>(api_key: K, model: M) -> Result<Self, Error> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.clone())
    }

    /// Create a client against a custom base URL. Used by tests to point at
    /// a local stub server.
    pub fn with_base_url<K: AsRef<str>, M: Into<Model>>(
        api_key: K,
        model: M,
        base_url: Url,
    ) -> Result<Self, Error> {
        let api_key = api_key.as_ref();
        if api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }

        let headers = HeaderMap::from_iter([(
            HeaderName::from_static("x-goog-api-key"),
            HeaderValue::from_str(api_key).context(InvalidApiKeySnafu)?,
        )]);
        let http_client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context(BuildClientSnafu)?;

        Ok(Self { http_client, model: model.into(), base_url })
    }

    /// Create a client from `GEMINI_API_KEY` and `GEMINI_MODEL`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] if the key variable is unset or
    /// empty. An unset model variable falls back to the default model.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| Error::MissingApiKey)?;
        let model = std::env::var("GEMINI_MODEL")
            .map(Model::from)
            .unwrap_or_default();
        Self::new(api_key, model)
    }

    /// The model this client sends requests to.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Generate a response to `prompt` with the default generation
    /// parameters.
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.generate_with(prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_OUTPUT_TOKENS).await
    }

    /// Generate a response with explicit temperature and output budget.
    ///
    /// One request, one answer: there is no retry on failure, and a timeout
    /// surfaces as [`Error::PerformRequest`].
    pub async fn generate_with(
        &self,
        prompt: &str,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<String, Error> {
        let suffix = format!("{}:generateContent", self.model.as_str());
        let url = self
            .base_url
            .join(&suffix)
            .context(ConstructUrlSnafu { suffix: suffix.clone() })?;

        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![RequestPart { text: prompt }] }],
            generation_config: GenerationConfig { temperature, max_output_tokens },
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending generation request");
        let response = self
            .http_client
            .post(url.clone())
            .json(&request)
            .send()
            .await
            .context(PerformRequestSnafu { url: url.clone() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            return BadResponseSnafu { code: status.as_u16(), body }.fail();
        }

        let payload = response.text().await.context(DeserializeSnafu)?;
        let parsed: GenerationResponse = serde_json::from_str(&payload)
            .map_err(|_| Error::MissingText { payload: payload.clone() })?;
        extract_text(&parsed, &payload)
    }
}
