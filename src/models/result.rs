//! The outcome of one completed action.

use serde::Serialize;

use super::{ReviewMode, ScoreReport};

/// Why no score report is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AbsentReason {
    /// The response held no recognisable structured block.
    NoBlock,
    /// A block was found but did not decode as a full score report.
    Malformed(String),
}

/// Result of looking for a score in a response.
///
/// Degradation is explicit: callers match on `Absent` instead of relying on
/// a swallowed decode error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreExtraction {
    Decoded(ScoreReport),
    Absent(AbsentReason),
}

impl ScoreExtraction {
    pub fn report(&self) -> Option<&ScoreReport> {
        match self {
            ScoreExtraction::Decoded(report) => Some(report),
            ScoreExtraction::Absent(_) => None,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, ScoreExtraction::Decoded(_))
    }
}

/// Score (if any) paired with the prose left after removing the score block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewResult {
    pub mode: ReviewMode,
    pub score: ScoreExtraction,
    /// Rendered as-is, even when empty.
    pub prose: String,
}

impl ReviewResult {
    pub fn score_report(&self) -> Option<&ScoreReport> {
        self.score.report()
    }
}
