//! Gemini client — the single point of entry for all AI calls in atsready.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! Both the extraction and illustration flows MUST go through this module.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";

/// Model used for schema-constrained resume extraction.
/// Intentionally hardcoded to prevent accidental drift.
pub const TEXT_MODEL: &str = "gemini-3-flash-preview";
/// Model used for the decorative before/after illustrations.
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned empty content")]
    EmptyContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub parts: Vec<Part>,
}

/// One content part. Exactly one of `text` / `inline_data` is set in
/// practice; the wire format models them as optional siblings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part {
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Default::default()
        }
    }
}

/// Inline binary payload, base64-encoded, tagged with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first text part of the first candidate, if any.
    pub fn text(&self) -> Option<&str> {
        self.parts()?.iter().find_map(|p| p.text.as_deref())
    }

    /// First inline binary part of the first candidate, if any.
    pub fn inline_data(&self) -> Option<&InlineData> {
        self.parts()?.iter().find_map(|p| p.inline_data.as_ref())
    }

    fn parts(&self) -> Option<&[Part]> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single Gemini client shared by the extraction and illustration
/// flows. Wraps the `generateContent` REST endpoint. Makes exactly one
/// attempt per call — the contract defines no retry or backoff.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Makes a single `generateContent` call against the given model and
    /// returns the full response object.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!(
            "{}/{API_VERSION}/models/{model}:generateContent",
            self.base_url
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        debug!(model, candidates = parsed.candidates.len(), "Gemini call succeeded");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_client(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test-key".to_string(), server.base_url())
    }

    fn text_request(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
            }],
            generation_config: None,
        }
    }

    #[test]
    fn test_request_serializes_camel_case_inline_data() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline_data("application/pdf", "QkFTRTY0"),
                    Part::text("prompt"),
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                ..Default::default()
            }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "application/pdf"
        );
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        // Unset optionals stay off the wire entirely.
        assert!(json["contents"][0]["parts"][1].get("inlineData").is_none());
    }

    #[test]
    fn test_response_text_finds_first_text_part() {
        let json = r#"{
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "UE5H"}},
                {"text": "hello"}
            ]}}]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("hello"));
        assert_eq!(response.inline_data().unwrap().data, "UE5H");
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);
        assert!(response.inline_data().is_none());
    }

    #[tokio::test]
    async fn test_generate_posts_to_model_endpoint_with_key_header() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(format!("/v1beta/models/{TEXT_MODEL}:generateContent"))
                .header("x-goog-api-key", "test-key");
            then.status(200).json_body(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
            }));
        });

        let client = test_client(&server);
        let response = client.generate(TEXT_MODEL, &text_request("hi")).await.unwrap();

        mock.assert();
        assert_eq!(response.text(), Some("ok"));
    }

    #[tokio::test]
    async fn test_generate_maps_error_envelope_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(400)
                .json_body(serde_json::json!({"error": {"message": "API key not valid"}}));
        });

        let client = test_client(&server);
        let err = client
            .generate(TEXT_MODEL, &text_request("hi"))
            .await
            .unwrap_err();

        match err {
            GeminiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_makes_exactly_one_attempt() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(500).body("boom");
        });

        let client = test_client(&server);
        let result = client.generate(TEXT_MODEL, &text_request("hi")).await;

        assert!(result.is_err());
        mock.assert_hits(1);
    }
}
