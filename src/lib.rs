//! codecritic: AI-assisted code review and quality scoring (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod env;
pub mod extract;
pub mod models;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod providers;
pub mod session;
