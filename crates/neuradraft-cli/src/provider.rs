//! Gemini model provider
//!
//! Talks to the `generateContent` REST endpoint with a blocking client.

use std::time::Duration;

use neuradraft_core::{ModelProvider, ProviderError};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::ProviderSettings;

/// Client for the Gemini generative language API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    client: Client,
}

impl GeminiClient {
    /// Create a client, reading the API key from the configured variable
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::NotConfigured(format!(
                    "set {} to your API key",
                    settings.api_key_env
                ))
            })?;
        Self::with_api_key(settings, api_key)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(
        settings: &ProviderSettings,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        Ok(Self {
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: api_key.into(),
            temperature: settings.temperature,
            client,
        })
    }

    /// Full URL of the generateContent call
    pub fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// JSON body for one request
    pub fn request_body(&self, system_prompt: &str, user_prompt: &str) -> Value {
        json!({
            "system_instruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "role": "user", "parts": [{ "text": user_prompt }] }],
            "generationConfig": { "temperature": self.temperature }
        })
    }
}

impl ModelProvider for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(system_prompt, user_prompt))
            .send()
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        extract_text(&body)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Text of the first candidate, all parts concatenated
fn extract_text(body: &str) -> Result<String, ProviderError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::Empty);
    }
    Ok(text)
}

/// `error.message` from an API error body, or the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::with_api_key(&ProviderSettings::default(), "test-key").unwrap()
    }

    #[test]
    fn test_request_url() {
        let mut settings = ProviderSettings::default();
        settings.endpoint = "http://localhost:8080/v1/".to_string();
        settings.model = "gemini-pro".to_string();
        let client = GeminiClient::with_api_key(&settings, "k").unwrap();
        assert_eq!(
            client.request_url(),
            "http://localhost:8080/v1/models/gemini-pro:generateContent"
        );
        assert_eq!(client.name(), "gemini-pro");
    }

    #[test]
    fn test_request_body() {
        let body = client().request_body("sys", "user");
        assert_eq!(body["system_instruction"]["parts"][0]["text"], "sys");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "user");
        assert_eq!(body["contents"][0]["role"], "user");
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_missing_api_key() {
        let mut settings = ProviderSettings::default();
        settings.api_key_env = "NEURADRAFT_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        let err = GeminiClient::from_settings(&settings).unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert!(err.to_string().contains("NEURADRAFT_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_extract_text() {
        let body = r###"{"candidates":[{"content":{"parts":[{"text":"## A\n"},{"text":"body"}],"role":"model"}}]}"###;
        assert_eq!(extract_text(body).unwrap(), "## A\nbody");
    }

    #[test]
    fn test_extract_text_empty() {
        assert!(matches!(extract_text(r#"{"candidates":[]}"#), Err(ProviderError::Empty)));
        assert!(matches!(extract_text("{}"), Err(ProviderError::Empty)));
        assert!(matches!(
            extract_text(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#),
            Err(ProviderError::Empty)
        ));
    }

    #[test]
    fn test_extract_text_invalid() {
        assert!(matches!(extract_text("not json"), Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid");
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
