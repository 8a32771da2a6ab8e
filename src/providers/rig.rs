//! rig-core integration for completion calls.
//!
//! Uses rig-core's provider clients and Agent abstraction for multi-provider
//! support. Currently supports: Anthropic, OpenAI, Cohere, Gemini, Perplexity,
//! DeepSeek, xAI, Groq, and any OpenAI-compatible API.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers;

use crate::config::ProviderConfig;
use crate::models::ProviderName;

use super::{CompletionProvider, ProviderError};

/// Build a plain agent from a rig-core client and send one prompt.
///
/// Always sets `max_tokens`: without it some providers (e.g. Gemini)
/// default to a low limit that truncates long reviews.
macro_rules! prompt_once {
    ($client:expr, $config:expr, $prompt:expr, $label:expr) => {{
        let agent = $client
            .agent($config.model.as_str())
            .temperature($config.temperature)
            .max_tokens($config.max_tokens)
            .build();
        agent
            .prompt($prompt)
            .await
            .map_err(|e| ProviderError::ApiError(format!("{} API error: {e}", $label)))
    }};
}

/// Create a rig-core client using the `Client::new(api_key)` convention.
macro_rules! new_client {
    ($provider_mod:path, $api_key:expr, $label:expr) => {{
        <$provider_mod>::new($api_key).map_err(|e| {
            ProviderError::ApiError(format!("failed to create {} client: {e}", $label))
        })
    }};
}

/// rig-core based completion provider.
///
/// The provider name in config selects which rig-core client is built for
/// each call.
pub struct RigProvider {
    config: ProviderConfig,
}

impl RigProvider {
    /// Create a provider; fails early when no API key is configured.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_none() {
            return Err(ProviderError::NotConfigured(format!(
                "no API key found for provider '{}'. Set {} or {}.",
                config.name,
                crate::constants::ENV_API_KEY,
                config.name.api_key_env_var(),
            )));
        }
        if config.name == ProviderName::OpenAICompatible && config.base_url.is_none() {
            return Err(ProviderError::NotConfigured(
                "openai-compatible provider requires base_url to be set".to_string(),
            ));
        }
        Ok(Self { config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("missing API key".to_string()))
    }

    /// Build an OpenAI-style client, optionally with a custom base URL.
    fn build_openai_client(
        &self,
        api_key: &str,
    ) -> Result<providers::openai::CompletionsClient, ProviderError> {
        let mut builder = providers::openai::CompletionsClient::builder().api_key(api_key);
        if let Some(ref base_url) = self.config.base_url {
            builder = builder.base_url(base_url);
        }
        builder
            .build()
            .map_err(|e| ProviderError::ApiError(format!("failed to create OpenAI client: {e}")))
    }
}

#[async_trait]
impl CompletionProvider for RigProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key()?;
        let config = &self.config;

        tracing::debug!(
            provider = %config.name,
            model = %config.model,
            prompt_chars = prompt.len(),
            "sending completion request"
        );

        let response = match config.name {
            ProviderName::Anthropic => {
                let client: providers::anthropic::Client = providers::anthropic::Client::builder()
                    .api_key(api_key)
                    .build()
                    .map_err(|e| {
                        ProviderError::ApiError(format!("failed to create Anthropic client: {e}"))
                    })?;
                prompt_once!(client, config, prompt, "Anthropic")
            }
            ProviderName::OpenAI => {
                let client = self.build_openai_client(api_key)?;
                prompt_once!(client, config, prompt, "OpenAI")
            }
            ProviderName::OpenAICompatible => {
                let client = self.build_openai_client(api_key)?;
                prompt_once!(client, config, prompt, "OpenAI-compatible")
            }
            ProviderName::Cohere => {
                let client = new_client!(providers::cohere::Client, api_key, "Cohere")?;
                prompt_once!(client, config, prompt, "Cohere")
            }
            ProviderName::Gemini => {
                let client = new_client!(providers::gemini::Client, api_key, "Gemini")?;
                prompt_once!(client, config, prompt, "Gemini")
            }
            ProviderName::Perplexity => {
                let client = new_client!(providers::perplexity::Client, api_key, "Perplexity")?;
                prompt_once!(client, config, prompt, "Perplexity")
            }
            ProviderName::DeepSeek => {
                let client = new_client!(providers::deepseek::Client, api_key, "DeepSeek")?;
                prompt_once!(client, config, prompt, "DeepSeek")
            }
            ProviderName::XAI => {
                let client = new_client!(providers::xai::Client, api_key, "xAI")?;
                prompt_once!(client, config, prompt, "xAI")
            }
            ProviderName::Groq => {
                let client = new_client!(providers::groq::Client, api_key, "Groq")?;
                prompt_once!(client, config, prompt, "Groq")
            }
        };

        match &response {
            Ok(text) => tracing::debug!(response_chars = text.len(), "completion received"),
            Err(e) => tracing::warn!(error = %e, "completion failed"),
        }
        response
    }
}
