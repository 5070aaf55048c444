//! Gemini extraction provider using Google's generateContent API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::provider::{AiProvider, SYSTEM_PREAMBLE};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-1.5-flash-latest";

pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider").finish()
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for Gemini")?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: API_BASE.to_string(),
            http_client,
        })
    }

    /// Override the API base URL (tests only).
    #[doc(hidden)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn attempt(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{}\n\n{}", SYSTEM_PREAMBLE, prompt),
                }],
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/models/{}:generateContent?key={}",
                self.base_url, MODEL, self.api_key
            ))
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Gemini API request failed: {} - {}", status, error_text);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .context("Gemini response contained no candidates")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_attempt_returns_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                mockito::Matcher::Regex(r"/models/.+:generateContent.*".to_string()),
            )
            .with_status(200)
            .with_body(
                json!({
                    "candidates": [
                        {"content": {"parts": [{"text": "{\"name\": \"John\"}"}]}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = GeminiProvider::new("test-key", Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.url());
        let text = provider.attempt("extract").await.unwrap();
        assert_eq!(text, "{\"name\": \"John\"}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_attempt_fails_on_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                mockito::Matcher::Regex(r"/models/.+:generateContent.*".to_string()),
            )
            .with_status(429)
            .with_body("quota exceeded")
            .create_async()
            .await;

        let provider = GeminiProvider::new("test-key", Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.url());
        let err = provider.attempt("extract").await.unwrap_err();
        assert!(err.to_string().contains("Gemini API request failed"));
    }

    #[tokio::test]
    async fn test_attempt_fails_on_empty_candidates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                mockito::Matcher::Regex(r"/models/.+:generateContent.*".to_string()),
            )
            .with_status(200)
            .with_body(json!({"candidates": []}).to_string())
            .create_async()
            .await;

        let provider = GeminiProvider::new("test-key", Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.url());
        assert!(provider.attempt("extract").await.is_err());
    }
}
