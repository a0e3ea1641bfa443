//! Google Gemini (Generative Language API) provider.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NarrativeError;

use super::provider::{LlmConfig, NarrativeGenerator};

/// Generative Language API base URL.
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable overriding the model.
pub const MODEL_VAR: &str = "GEMINI_MODEL";

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
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
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
    #[serde(default)]
    text: String,
}

/// Gemini provider using the blocking HTTP client.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, NarrativeError> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a new Gemini provider with custom configuration.
    pub fn with_config(
        api_key: impl Into<String>,
        config: LlmConfig,
    ) -> Result<Self, NarrativeError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(NarrativeError::Config("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NarrativeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Create from `GEMINI_API_KEY`, honoring `GEMINI_MODEL` when set.
    pub fn from_env() -> Result<Self, NarrativeError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                NarrativeError::Config(format!("{} environment variable not set", API_KEY_VAR))
            })?;

        let mut config = LlmConfig::default();
        if let Ok(model) = std::env::var(MODEL_VAR) {
            if !model.trim().is_empty() {
                config.model = model.trim().to_string();
            }
        }

        Self::with_config(api_key, config)
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.config.model)
    }

    fn build_headers(&self) -> Result<HeaderMap, NarrativeError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| NarrativeError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        }
    }
}

impl NarrativeGenerator for GeminiProvider {
    fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        debug!(model = %self.config.model, "requesting narrative");

        let response = self
            .client
            .post(self.endpoint())
            .headers(self.build_headers()?)
            .json(&self.request_body(prompt))
            .send()
            .map_err(|e| NarrativeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(status_error(status, body));
        }

        let body = response
            .text()
            .map_err(|e| NarrativeError::Network(e.to_string()))?;
        extract_text(&body)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Classify a non-success response.
fn status_error(status: StatusCode, body: String) -> NarrativeError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => NarrativeError::Auth(body),
        StatusCode::TOO_MANY_REQUESTS => NarrativeError::Quota(body),
        _ => NarrativeError::Api {
            status: status.as_u16(),
            message: body,
        },
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(body: &str) -> Result<String, NarrativeError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| NarrativeError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(NarrativeError::MalformedResponse(
            "response contained no text".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Trend: "},{"text":"up."}],"role":"model"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Trend: up.");
    }

    #[test]
    fn test_extract_text_rejects_empty() {
        assert!(matches!(
            extract_text(r#"{"candidates":[]}"#),
            Err(NarrativeError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#),
            Err(NarrativeError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_text("<html>"),
            Err(NarrativeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, String::new()),
            NarrativeError::Auth(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, String::new()),
            NarrativeError::Auth(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            NarrativeError::Quota(_)
        ));
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY, "down".into()),
            NarrativeError::Api {
                status: 502,
                message: "down".into()
            }
        );
    }

    #[test]
    fn test_request_body_shape() {
        let provider = GeminiProvider::new("test-key").unwrap();
        let json = serde_json::to_value(provider.request_body("hello")).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
        assert!(provider.endpoint().ends_with("/gemini-1.5-flash:generateContent"));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            GeminiProvider::new("  "),
            Err(NarrativeError::Config(_))
        ));
    }
}
