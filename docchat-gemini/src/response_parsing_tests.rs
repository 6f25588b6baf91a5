//! Response parsing tests against real-world `generateContent` payloads,
//! covering truncated answers, empty candidate lists, and non-text parts.

use serde_json::json;

use crate::client::{Error, GenerationResponse, Model, extract_text};

fn parse(value: serde_json::Value) -> (GenerationResponse, String) {
    let payload = value.to_string();
    let response = serde_json::from_str(&payload).unwrap();
    (response, payload)
}

// ── Basic text response ─────────────────────────────────────────────

#[test]
fn parse_simple_text_response() {
    let (resp, payload) = parse(json!({
        "candidates": [{
            "content": {
                "parts": [{"text": "Paris is the capital of France."}],
                "role": "model"
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 8,
            "candidatesTokenCount": 7,
            "totalTokenCount": 15
        },
        "modelVersion": "gemini-2.5-pro"
    }));

    assert_eq!(resp.candidates.len(), 1);
    assert_eq!(extract_text(&resp, &payload).unwrap(), "Paris is the capital of France.");
}

#[test]
fn first_candidate_wins() {
    let (resp, payload) = parse(json!({
        "candidates": [
            {"content": {"parts": [{"text": "Answer A"}], "role": "model"}, "finishReason": "STOP"},
            {"content": {"parts": [{"text": "Answer B"}], "role": "model"}, "finishReason": "STOP"}
        ]
    }));

    assert_eq!(extract_text(&resp, &payload).unwrap(), "Answer A");
}

#[test]
fn skips_non_text_leading_parts() {
    let (resp, payload) = parse(json!({
        "candidates": [{
            "content": {
                "parts": [
                    {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                    {"text": "the actual answer"}
                ],
                "role": "model"
            },
            "finishReason": "STOP"
        }]
    }));

    assert_eq!(extract_text(&resp, &payload).unwrap(), "the actual answer");
}

// ── Token-limit handling ────────────────────────────────────────────

#[test]
fn max_tokens_with_partial_text_returns_partial() {
    let (resp, payload) = parse(json!({
        "candidates": [{
            "content": {"parts": [{"text": "The answer begins but"}], "role": "model"},
            "finishReason": "MAX_TOKENS"
        }]
    }));

    assert_eq!(extract_text(&resp, &payload).unwrap(), "The answer begins but");
}

#[test]
fn max_tokens_without_text_is_token_limit_error() {
    let (resp, payload) = parse(json!({
        "candidates": [{
            "content": {"parts": [], "role": "model"},
            "finishReason": "MAX_TOKENS"
        }]
    }));

    assert!(matches!(extract_text(&resp, &payload), Err(Error::TokenLimit)));
}

#[test]
fn max_tokens_without_content_is_token_limit_error() {
    let (resp, payload) = parse(json!({
        "candidates": [{"finishReason": "MAX_TOKENS"}]
    }));

    assert!(matches!(extract_text(&resp, &payload), Err(Error::TokenLimit)));
}

// ── Malformed responses ─────────────────────────────────────────────

#[test]
fn empty_candidate_list_carries_payload() {
    let (resp, payload) = parse(json!({"candidates": []}));

    match extract_text(&resp, &payload) {
        Err(Error::MissingText { payload: p }) => assert_eq!(p, payload),
        other => panic!("expected MissingText, got {other:?}"),
    }
}

#[test]
fn missing_candidates_field_is_missing_text() {
    let (resp, payload) = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));

    assert!(matches!(extract_text(&resp, &payload), Err(Error::MissingText { .. })));
}

#[test]
fn stopped_candidate_without_text_is_missing_text() {
    let (resp, payload) = parse(json!({
        "candidates": [{
            "content": {"parts": [{"functionCall": {"name": "noop"}}], "role": "model"},
            "finishReason": "STOP"
        }]
    }));

    assert!(matches!(extract_text(&resp, &payload), Err(Error::MissingText { .. })));
}

// ── Model names ─────────────────────────────────────────────────────

#[test]
fn model_names_normalize_to_resource_paths() {
    assert_eq!(Model::from("gemini-2.5-pro".to_string()), Model::Gemini25Pro);
    assert_eq!(Model::from("models/gemini-2.5-flash".to_string()), Model::Gemini25Flash);
    assert_eq!(
        Model::from("gemini-1.5-flash-8b".to_string()).as_str(),
        "models/gemini-1.5-flash-8b"
    );
    assert_eq!(Model::default().as_str(), "models/gemini-2.5-pro");
}
