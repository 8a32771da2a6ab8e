//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and model defaults so a rename only requires changing this file.

use std::time::Duration;

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "codecritic";

/// Crate version, as reported by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.codecritic.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".codecritic.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "codecritic";

/// Model used when neither config nor environment names one.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Delay between a response landing and the result being revealed.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(50);

/// Shown when an action is attempted with an empty code buffer.
pub const EMPTY_CODE_MESSAGE: &str = "Please enter code first";

/// Shown when the score panel is toggled before any review has completed.
pub const REVIEW_FIRST_MESSAGE: &str = "Run a Review first to generate quality metrics";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_PROVIDER: &str = "CODECRITIC_PROVIDER";
pub const ENV_MODEL: &str = "CODECRITIC_MODEL";
pub const ENV_API_KEY: &str = "CODECRITIC_API_KEY";
pub const ENV_BASE_URL: &str = "CODECRITIC_BASE_URL";
pub const ENV_LANGUAGE: &str = "CODECRITIC_LANGUAGE";
pub const ENV_LOG: &str = "CODECRITIC_LOG";
pub const ENV_COLOR: &str = "CODECRITIC_COLOR";
pub const ENV_CONFIG_DIR: &str = "CODECRITIC_CONFIG_DIR";
