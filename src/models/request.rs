//! Review requests and their input validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Language;

/// Input rejected before any call to the completion service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", crate::constants::EMPTY_CODE_MESSAGE)]
    EmptyCode,
}

/// What the user asked the service to do with their code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    /// Score plus prose critique.
    Review,
    /// Corrected code with a brief explanation, no score.
    Fix,
}

impl ReviewMode {
    /// Whether responses for this mode carry a structured score block.
    pub fn expects_score(self) -> bool {
        matches!(self, ReviewMode::Review)
    }
}

impl std::fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewMode::Review => write!(f, "review"),
            ReviewMode::Fix => write!(f, "fix"),
        }
    }
}

/// One action's worth of input. Built fresh per action and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    source_code: String,
    language: Language,
    mode: ReviewMode,
}

impl ReviewRequest {
    /// Validate and build a request.
    ///
    /// Code consisting only of whitespace is rejected like empty code.
    pub fn new(
        source_code: impl Into<String>,
        language: Language,
        mode: ReviewMode,
    ) -> Result<Self, ValidationError> {
        let source_code = source_code.into();
        if source_code.trim().is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        Ok(Self {
            source_code,
            language,
            mode,
        })
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn mode(&self) -> ReviewMode {
        self.mode
    }
}
