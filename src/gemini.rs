//! Gemini generateContent client.
//!
//! A single non-streaming request per summarisation: no retries, no
//! client-side timeout beyond what reqwest applies by default.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// The credential travels in a dedicated header, never in the URL or body
const API_KEY_HEADER: &str = "x-goog-api-key";

const USER_AGENT: &str = concat!("pagebrief/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("response did not contain generated text")]
    MissingText,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// The generated text at candidates[0].content.parts[0].text, if present
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Client for the Gemini generative-language endpoint.
pub struct GeminiClient {
    http: Client,
    base_url: String,
}

impl GeminiClient {
    /// Client against the production endpoint
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(GEMINI_API_BASE)
    }

    /// Client against an alternative endpoint, used by the test suite
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Generate text for a prompt.
    ///
    /// A non-success status yields [`ApiError::Api`] with the message from
    /// the response body when it carries one; a success body without the
    /// generated-text field yields [`ApiError::MissingText`].
    pub async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, ApiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, GEMINI_MODEL
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig::default(),
        };

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "API request failed".to_string());
            return Err(ApiError::Api(message));
        }

        let data: GenerateResponse = response.json().await?;
        data.into_text().ok_or(ApiError::MissingText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_wire_format() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: GenerationConfig::default(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "hello"}]}],
                "generationConfig": {
                    "temperature": 0.2,
                    "topK": 40,
                    "topP": 0.95,
                    "maxOutputTokens": 1024
                }
            })
        );
    }

    #[test]
    fn parses_generated_text() {
        let body = json!({
            "candidates": [
                {"content": {"parts": [{"text": "A summary."}]}}
            ]
        });
        let response: GenerateResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.into_text().unwrap(), "A summary.");
    }

    #[test]
    fn missing_candidates_yields_no_text() {
        let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_text().is_none());
    }

    #[test]
    fn missing_parts_yields_no_text() {
        let body = json!({"candidates": [{"content": {"parts": []}}]});
        let response: GenerateResponse = serde_json::from_value(body).unwrap();
        assert!(response.into_text().is_none());
    }

    #[test]
    fn parses_error_message() {
        let body = json!({"error": {"message": "bad key", "code": 403}});
        let response: ErrorResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.error.unwrap().message.unwrap(), "bad key");
    }

    #[test]
    fn error_body_without_message() {
        let response: ErrorResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.error.is_none());
    }
}
