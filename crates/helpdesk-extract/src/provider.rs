use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// An external AI extraction capability.
///
/// A provider gets one attempt per email with no retry; it returns the raw
/// model output text and the chain owns JSON parsing and fence stripping.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug {
    /// Provider identifier for logging
    fn name(&self) -> &str;

    /// Single extraction attempt; any error means fall through to the next
    /// strategy.
    async fn attempt(&self, prompt: &str) -> Result<String>;
}

pub(crate) const SYSTEM_PREAMBLE: &str = "You are a helpful assistant that extracts structured \
     data from emails. Always return valid JSON only.";
