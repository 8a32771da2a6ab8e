//! Shared types used across all modules.
//!
//! Requests, score reports, and review results live here so the prompt
//! builder, the extractor, and the session never reach into each other.

pub mod language;
pub mod request;
pub mod result;
pub mod score;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

pub use language::Language;
pub use request::{ReviewMode, ReviewRequest, ValidationError};
pub use result::{AbsentReason, ReviewResult, ScoreExtraction};
pub use score::{Metric, QualityTier, ScoreReport};

/// Supported LLM provider backends.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderName {
    Anthropic,
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAI,
    Cohere,
    #[default]
    Gemini,
    Perplexity,
    #[serde(rename = "deepseek")]
    #[strum(serialize = "deepseek")]
    DeepSeek,
    #[serde(rename = "xai")]
    #[strum(serialize = "xai")]
    XAI,
    Groq,
    /// Any OpenAI-compatible API (e.g. Ollama, Together, local servers).
    #[serde(rename = "openai-compatible")]
    #[strum(serialize = "openai-compatible")]
    OpenAICompatible,
}

impl ProviderName {
    /// Provider-specific environment variable holding the API key.
    ///
    /// These match the names rig-core's `from_env()` constructors read.
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            ProviderName::Anthropic => "ANTHROPIC_API_KEY",
            ProviderName::OpenAI | ProviderName::OpenAICompatible => "OPENAI_API_KEY",
            ProviderName::Cohere => "COHERE_API_KEY",
            ProviderName::Gemini => "GEMINI_API_KEY",
            ProviderName::Perplexity => "PERPLEXITY_API_KEY",
            ProviderName::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderName::XAI => "XAI_API_KEY",
            ProviderName::Groq => "GROQ_API_KEY",
        }
    }

    /// Comma-separated list of accepted names, for error messages.
    pub fn supported() -> String {
        Self::VARIANTS.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_default_is_gemini() {
        assert_eq!(ProviderName::default(), ProviderName::Gemini);
    }

    #[test]
    fn provider_display_matches_config_spelling() {
        assert_eq!(ProviderName::OpenAI.to_string(), "openai");
        assert_eq!(ProviderName::XAI.to_string(), "xai");
        assert_eq!(ProviderName::OpenAICompatible.to_string(), "openai-compatible");
        assert_eq!(ProviderName::Gemini.to_string(), "gemini");
    }

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("GEMINI".parse::<ProviderName>().unwrap(), ProviderName::Gemini);
        assert_eq!("OpenAI".parse::<ProviderName>().unwrap(), ProviderName::OpenAI);
        assert!("mistral".parse::<ProviderName>().is_err());
    }

    #[test]
    fn provider_serde_uses_same_spelling_as_display() {
        for name in [
            ProviderName::Anthropic,
            ProviderName::DeepSeek,
            ProviderName::OpenAICompatible,
        ] {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{name}\""));
        }
    }

    #[test]
    fn supported_lists_every_provider() {
        let list = ProviderName::supported();
        assert!(list.contains("anthropic"));
        assert!(list.contains("openai-compatible"));
        assert_eq!(list.split(", ").count(), 9);
    }

    #[test]
    fn gemini_key_env_var() {
        assert_eq!(ProviderName::Gemini.api_key_env_var(), "GEMINI_API_KEY");
        assert_eq!(ProviderName::OpenAICompatible.api_key_env_var(), "OPENAI_API_KEY");
    }
}
