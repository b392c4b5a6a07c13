//! Text-generation client used by the contract assistant.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use thiserror::Error;

use crate::models::config::LlmConfig;

/// Why a generation call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// 401/403, bad API key or permissions.
    Auth,
    /// 429, quota or rate limit reached.
    RateLimit,
    /// 408 or the client-side timeout elapsed.
    Timeout,
    /// Connection refused, DNS failure, reset.
    Network,
    /// 5xx from the provider.
    ServerError,
    /// The response could not be read as generated text.
    Malformed,
    Unknown,
}

#[derive(Debug, Error)]
#[error("text generation failed ({kind:?}): {message}")]
pub struct GenerationError {
    pub kind: GenerationErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl GenerationError {
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => GenerationErrorKind::Auth,
            408 => GenerationErrorKind::Timeout,
            429 => GenerationErrorKind::RateLimit,
            500..=599 => GenerationErrorKind::ServerError,
            _ => GenerationErrorKind::Unknown,
        };
        Self {
            kind,
            status: Some(status),
            message: truncate_body(body),
        }
    }

    pub fn network(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            GenerationErrorKind::Timeout
        } else {
            GenerationErrorKind::Network
        };
        Self {
            kind,
            status: None,
            message: err.to_string(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: GenerationErrorKind::Malformed,
            status: None,
            message: message.into(),
        }
    }

    /// Summary safe to show to the person chatting with the assistant.
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            GenerationErrorKind::Auth => "The assistant is not configured correctly.",
            GenerationErrorKind::RateLimit => {
                "The assistant is busy right now. Please try again in a minute."
            }
            GenerationErrorKind::Timeout => "The assistant took too long to answer.",
            GenerationErrorKind::Network | GenerationErrorKind::ServerError => {
                "The assistant is temporarily unavailable."
            }
            GenerationErrorKind::Malformed | GenerationErrorKind::Unknown => {
                "The assistant could not produce an answer."
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(300) {
        Some((index, _)) => format!("{}...", &body[..index]),
        None => body.to_string(),
    }
}

/// Produces a completion for a single fully assembled prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Gemini `generateContent` REST client.
pub struct GeminiGenerator {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(config: &LlmConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::network(&e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        })
    }

    /// Joins the text parts of the first candidate.
    fn parse_response(data: &Value) -> Result<String, GenerationError> {
        let parts = data["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| GenerationError::malformed("no candidates returned"))?;

        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        if text.trim().is_empty() {
            return Err(GenerationError::malformed("empty completion"));
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        log::info!("Calling text generation model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                log::error!("Text generation request failed: {e}");
                GenerationError::network(&e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            log::error!("Failed to read text generation response: {e}");
            GenerationError::network(&e)
        })?;

        if !status.is_success() {
            log::error!("Text generation API error {status}: {text}");
            return Err(GenerationError::from_status(status.as_u16(), &text));
        }

        let data: Value = serde_json::from_str(&text)
            .map_err(|e| GenerationError::malformed(format!("invalid JSON: {e}")))?;
        Self::parse_response(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_codes() {
        assert_eq!(
            GenerationError::from_status(401, "").kind,
            GenerationErrorKind::Auth
        );
        assert_eq!(
            GenerationError::from_status(429, "").kind,
            GenerationErrorKind::RateLimit
        );
        assert_eq!(
            GenerationError::from_status(503, "").kind,
            GenerationErrorKind::ServerError
        );
        assert_eq!(
            GenerationError::from_status(418, "").kind,
            GenerationErrorKind::Unknown
        );
    }

    #[test]
    fn joins_candidate_parts() {
        let data = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "SERVICE " }, { "text": "AGREEMENT" }]
                }
            }]
        });

        assert_eq!(
            GeminiGenerator::parse_response(&data).unwrap(),
            "SERVICE AGREEMENT"
        );
    }

    #[test]
    fn rejects_missing_candidates() {
        let err = GeminiGenerator::parse_response(&json!({ "candidates": [] })).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::Malformed);
    }

    #[test]
    fn request_wraps_prompt_as_user_content() {
        let body = GeminiGenerator::request_body("hello");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "x".repeat(400);
        assert_eq!(GenerationError::from_status(500, &body).message.len(), 303);
    }
}
