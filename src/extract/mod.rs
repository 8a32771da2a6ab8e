//! Response extraction: score block decoding and prose cleanup.
//!
//! The service is asked to open its answer with a ```` ```json ```` block
//! holding the five score fields. Models do not always comply, so decoding
//! falls back to a bare `{ ... "overall" ... }` object, and anything that
//! still fails to decode degrades to [`ScoreExtraction::Absent`].

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{AbsentReason, ReviewMode, ReviewResult, ScoreExtraction, ScoreReport};

/// First ```` ```json ```` fenced block; the interior is captured lazily so
/// the block ends at the first closing fence.
static FENCED_SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)```").expect("valid regex"));

/// Unfenced fallback: shortest `{ ... "overall" ... }` starting at the
/// leftmost `{` that can produce a match.
static BARE_SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)\{.*?"overall".*?\}"#).expect("valid regex"));

/// Extract a review-mode response.
pub fn extract(response_text: &str) -> ReviewResult {
    extract_for(ReviewMode::Review, response_text)
}

/// Extract a response for the given mode.
///
/// Fix responses never carry a score, so only the prose is derived.
pub fn extract_for(mode: ReviewMode, response_text: &str) -> ReviewResult {
    if !mode.expects_score() {
        return ReviewResult {
            mode,
            score: ScoreExtraction::Absent(AbsentReason::NoBlock),
            prose: response_text.trim().to_string(),
        };
    }

    let (score, prose) = match FENCED_SCORE_RE.captures(response_text) {
        Some(caps) => {
            let interior = caps.get(1).map_or("", |m| m.as_str());
            let prose = FENCED_SCORE_RE.replace(response_text, "").trim().to_string();
            (decode(interior), prose)
        }
        None => {
            // The fallback match is left in the prose.
            let score = match BARE_SCORE_RE.find(response_text) {
                Some(m) => decode(m.as_str()),
                None => ScoreExtraction::Absent(AbsentReason::NoBlock),
            };
            (score, response_text.trim().to_string())
        }
    };

    match &score {
        ScoreExtraction::Decoded(report) => {
            tracing::debug!(overall = %report.overall, "decoded score block")
        }
        ScoreExtraction::Absent(reason) => tracing::debug!(?reason, "no score available"),
    }

    ReviewResult { mode, score, prose }
}

fn decode(candidate: &str) -> ScoreExtraction {
    match serde_json::from_str::<ScoreReport>(candidate.trim()) {
        Ok(report) => ScoreExtraction::Decoded(report),
        Err(e) => ScoreExtraction::Absent(AbsentReason::Malformed(e.to_string())),
    }
}
