//! CompletionProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core so the session and the
//! one-shot commands never depend on a specific LLM library.

pub mod rig;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the completion provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// A text-in, text-out completion service.
///
/// One call per user action. Implementations must not retry on their own:
/// failures surface to the session, which decides what the user sees.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a single prompt and return the raw response text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Classifies a provider error into a short, user-friendly message.
///
/// Unknown API failures fall back to a generic message; configuration
/// problems keep their full text because they tell the user what to set.
pub fn classify_error(err: &ProviderError) -> String {
    match err {
        ProviderError::ApiError(msg) => {
            let msg_lower = msg.to_lowercase();
            let reason = if msg_lower.contains("429")
                || msg_lower.contains("rate limit")
                || msg_lower.contains("too many requests")
            {
                "Rate limited by API"
            } else if msg_lower.contains("401")
                || msg_lower.contains("403")
                || msg_lower.contains("unauthorized")
                || msg_lower.contains("api key")
            {
                "Authentication failed; check your API key"
            } else if msg_lower.contains("503")
                || msg_lower.contains("service unavailable")
                || msg_lower.contains("high demand")
            {
                "High model load"
            } else if msg_lower.contains("529") || msg_lower.contains("overloaded") {
                "API overloaded"
            } else if msg_lower.contains("502") {
                "API gateway error"
            } else if msg_lower.contains("timeout") || msg_lower.contains("timed out") {
                "Request timed out"
            } else if msg_lower.contains("connection") || msg_lower.contains("dns") {
                "Connection error"
            } else if msg_lower.contains("safety") || msg_lower.contains("blocked") {
                "Response blocked by the provider"
            } else {
                "The review service returned an error"
            };
            reason.to_string()
        }
        ProviderError::NotConfigured(msg) => msg.clone(),
    }
}
