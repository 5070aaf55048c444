//! Email field extraction.
//!
//! Turns free-text email content into a [`helpdesk_core::TicketFields`]
//! candidate. AI providers are tried in priority order with a single bounded
//! attempt each; any failure falls through silently until the deterministic
//! regex fallback, which always succeeds. The post-processing pass in
//! [`candidate`] is applied to every result regardless of which branch
//! produced it, and is idempotent.

mod candidate;
mod chain;
mod fallback;
mod gemini;
mod openai;
mod prompt;
mod provider;

pub use candidate::{finalize_candidate, RawCandidate};
pub use chain::{assemble_email_content, ExtractorChain};
pub use fallback::fallback_extraction;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use prompt::build_prompt;
pub use provider::AiProvider;
