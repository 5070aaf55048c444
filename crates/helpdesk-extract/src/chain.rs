//! Ordered extraction strategy chain.
//!
//! Providers are invoked in priority order with the first parseable result
//! winning; the terminal step is the regex fallback, which cannot fail.
//! Extraction failures are never surfaced to the caller.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use helpdesk_core::{Config, TicketFields};

use crate::candidate::{finalize_candidate, RawCandidate};
use crate::fallback::fallback_extraction;
use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;
use crate::prompt::build_prompt;
use crate::provider::AiProvider;

#[derive(Clone)]
pub struct ExtractorChain {
    providers: Vec<Arc<dyn AiProvider>>,
}

impl ExtractorChain {
    pub fn new(providers: Vec<Arc<dyn AiProvider>>) -> Self {
        Self { providers }
    }

    /// Build the provider chain from configuration: Gemini first, then
    /// OpenAI, each only when its API key is set. An empty chain still
    /// extracts via the regex fallback.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.extraction_timeout_seconds);
        let mut providers: Vec<Arc<dyn AiProvider>> = Vec::new();
        if let Some(key) = &config.gemini_api_key {
            providers.push(Arc::new(GeminiProvider::new(key.clone(), timeout)?));
        }
        if let Some(key) = &config.openai_api_key {
            providers.push(Arc::new(OpenAiProvider::new(key.clone(), timeout)?));
        }
        tracing::info!(providers = providers.len(), "Extraction chain configured");
        Ok(Self::new(providers))
    }

    /// Extract a complete field set from raw email content. Never fails:
    /// every provider failure degrades to the next strategy and the regex
    /// fallback always produces a candidate.
    pub async fn extract(&self, email_content: &str, sender_email: &str) -> TicketFields {
        let prompt = build_prompt(email_content);

        for provider in &self.providers {
            match provider.attempt(&prompt).await {
                Ok(raw_text) => match parse_json_response(&raw_text) {
                    Ok(candidate) => {
                        tracing::info!(provider = provider.name(), "AI extraction succeeded");
                        return finalize_candidate(candidate, sender_email);
                    }
                    Err(e) => {
                        tracing::warn!(
                            provider = provider.name(),
                            error = %e,
                            "Extraction response was not valid JSON"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "Extraction failed");
                }
            }
        }

        tracing::info!("Using fallback regex extraction (no AI available)");
        finalize_candidate(
            fallback_extraction(email_content, sender_email),
            sender_email,
        )
    }
}

/// Concatenate webhook parts into the content layout the fallback scanner
/// expects (`Subject:` line first, then the sender, then the body).
pub fn assemble_email_content(subject: &str, sender_email: &str, body: &str) -> String {
    format!("Subject: {}\nFrom: {}\n\n{}", subject, sender_email, body)
}

/// Parse a provider's raw output as JSON, stripping markdown code fences
/// (``` or ```json) when present.
fn parse_json_response(text: &str) -> Result<RawCandidate> {
    let json_text = if text.contains("```json") {
        text.split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(text)
            .trim()
    } else if text.contains("```") {
        text.split("```")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(text)
            .trim()
    } else {
        text.trim()
    };

    serde_json::from_str(json_text).context("Failed to parse extraction result as JSON")
}
