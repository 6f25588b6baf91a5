//! Minimal Gemini API client.
//!
//! Covers exactly one call shape: text prompt in, text answer out, via the
//! `generateContent` endpoint. The API key travels in the `x-goog-api-key`
//! header and is never logged. Errors stay within this crate's [`Error`]
//! type; callers that also run a local retrieval pipeline keep the two
//! failure domains separate.

pub mod client;

pub use client::{Error, GeminiClient, GenerationResponse, Model, extract_text};

#[cfg(test)]
mod response_parsing_tests;
