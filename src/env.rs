//! Environment variable abstraction.
//!
//! Config resolution reads through [`Env`] so tests can hand in a fixed
//! set of variables instead of mutating the real process environment.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::constants;

/// Environment variable reader.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// An environment made only of the given pairs.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up a variable. Empty values are treated as unset.
    pub fn var(&self, name: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Interpret a variable as a boolean switch.
    ///
    /// Returns `None` when the variable is unset or holds something that is
    /// not a recognised on/off word.
    pub fn flag(&self, name: &str) -> Option<bool> {
        let raw = self.var(name)?;
        match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    /// Directory holding the global `config.toml`.
    ///
    /// `CODECRITIC_CONFIG_DIR` wins. Otherwise the platform config directory
    /// is used for the real environment, and a mock one has none.
    pub fn config_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = self.var(constants::ENV_CONFIG_DIR) {
            return Some(PathBuf::from(dir));
        }
        match self.overrides {
            Some(_) => None,
            None => dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR)),
        }
    }
}
