//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.codecritic.toml` in the working directory
//! 4. `~/.config/codecritic/config.toml` (global defaults; the directory
//!    can be moved with `CODECRITIC_CONFIG_DIR`)
//! 5. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;
use crate::env::Env;
use crate::models::{Language, ProviderName};

/// Maximum tokens per completion response.
///
/// High enough for thinking models that spend part of the budget on
/// internal reasoning before writing the review.
pub const DEFAULT_MAX_TOKENS: u64 = 65536;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub session: SessionConfig,
    pub output: OutputConfig,
}

/// LLM provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderName,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub temperature: f64,
    pub max_tokens: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderName::Gemini,
            model: constants::DEFAULT_MODEL.to_string(),
            base_url: None,
            api_key: None,
            temperature: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Interactive session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Language selected when a session starts.
    pub default_language: Language,
    /// Delay before a completed result is revealed.
    pub reveal_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_language: Language::default(),
            reveal_delay_ms: constants::DEFAULT_REVEAL_DELAY.as_millis() as u64,
        }
    }
}

impl SessionConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

/// Output styling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Force colors on or off; unset means "when stdout is a terminal".
    pub color: Option<bool>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then the one in `work_dir`, then applies
    /// environment variable overrides. CLI flags are applied by the caller.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path(env) {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        if let Some(dir) = work_dir {
            let local_path = dir.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        config.apply_env_vars(env);
        tracing::debug!(?config, "configuration loaded");

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path(env: &Env) -> Option<PathBuf> {
        env.config_dir().map(|d| d.join("config.toml"))
    }

    /// Merge another config into this one; only values that differ from
    /// the defaults override.
    fn merge(&mut self, other: Config) {
        let default_provider = ProviderConfig::default();
        if other.provider.name != default_provider.name {
            self.provider.name = other.provider.name;
        }
        if other.provider.model != default_provider.model {
            self.provider.model = other.provider.model;
        }
        if other.provider.base_url.is_some() {
            self.provider.base_url = other.provider.base_url;
        }
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }
        if other.provider.temperature != default_provider.temperature {
            self.provider.temperature = other.provider.temperature;
        }
        if other.provider.max_tokens != default_provider.max_tokens {
            self.provider.max_tokens = other.provider.max_tokens;
        }

        let default_session = SessionConfig::default();
        if other.session.default_language != default_session.default_language {
            self.session.default_language = other.session.default_language;
        }
        if other.session.reveal_delay_ms != default_session.reveal_delay_ms {
            self.session.reveal_delay_ms = other.session.reveal_delay_ms;
        }

        if other.output.color.is_some() {
            self.output.color = other.output.color;
        }
    }

    /// Apply `--provider` and `--model` from the command line.
    ///
    /// Switching provider re-resolves the API key from the environment,
    /// since a key configured for another provider will not work.
    pub fn apply_cli_overrides(
        &mut self,
        provider: Option<ProviderName>,
        model: Option<&str>,
        env: &Env,
    ) {
        if let Some(name) = provider {
            if name != self.provider.name {
                self.provider.name = name;
                self.provider.api_key = env
                    .var(constants::ENV_API_KEY)
                    .or_else(|| env.var(name.api_key_env_var()));
            }
        }
        if let Some(model) = model {
            self.provider.model = model.to_string();
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.var(constants::ENV_PROVIDER) {
            match val.parse::<ProviderName>() {
                Ok(name) => self.provider.name = name,
                Err(_) => tracing::warn!(
                    "ignoring invalid {} value '{val}' (supported: {})",
                    constants::ENV_PROVIDER,
                    ProviderName::supported()
                ),
            }
        }
        if let Some(val) = env.var(constants::ENV_MODEL) {
            self.provider.model = val;
        }
        if let Some(val) = env.var(constants::ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }

        // Generic key first, then the provider's own variable.
        let api_key = env
            .var(constants::ENV_API_KEY)
            .or_else(|| env.var(self.provider.name.api_key_env_var()));
        if api_key.is_some() {
            self.provider.api_key = api_key;
        }

        if let Some(val) = env.var(constants::ENV_LANGUAGE) {
            match val.parse::<Language>() {
                Ok(lang) => self.session.default_language = lang,
                Err(e) => tracing::warn!("ignoring {}: {e}", constants::ENV_LANGUAGE),
            }
        }

        if let Some(color) = env.flag(constants::ENV_COLOR) {
            self.output.color = Some(color);
        }
    }
}
