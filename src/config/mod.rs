//! Configuration loading and layering.
//!
//! Handles `.codecritic.toml` loading, environment variable resolution,
//! and the defaults CLI flags are merged over.

pub mod loader;

pub use loader::{Config, ConfigError, OutputConfig, ProviderConfig, SessionConfig};
