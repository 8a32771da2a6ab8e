//! JSON output renderer.
//!
//! A completed action renders as
//! `{"status": "complete", "mode": ..., "score": {...} | null, "prose": ...}`.
//! The score is included whatever the panel state; a malformed score block
//! adds `"score_error"`.

use serde_json::json;

use crate::models::{AbsentReason, ScoreExtraction};
use crate::output::OutputRenderer;
use crate::session::SessionView;

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render(&self, view: &SessionView<'_>) -> String {
        let output = match view {
            SessionView::Idle => json!({ "status": "idle" }),
            SessionView::Loading { mode } => json!({ "status": "pending", "mode": mode }),
            SessionView::Failed { mode, reason } => json!({
                "status": "failed",
                "mode": mode,
                "error": reason,
            }),
            SessionView::Result { result, .. } => {
                let mut output = json!({
                    "status": "complete",
                    "mode": result.mode,
                    "score": result.score_report(),
                    "prose": result.prose,
                });
                if let ScoreExtraction::Absent(reason @ AbsentReason::Malformed(_)) = &result.score
                {
                    output["score_error"] = json!(reason);
                }
                output
            }
        };

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract, extract_for};
    use crate::models::ReviewMode;
    use crate::session::PanelView;

    fn render_result(text: &str, mode: ReviewMode) -> serde_json::Value {
        let result = extract_for(mode, text);
        let output = JsonRenderer.render(&SessionView::Result {
            result: &result,
            panel: PanelView::Hidden,
        });
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn render_scored_review() {
        let parsed = render_result(
            "```json\n{\"overall\":72,\"readability\":80,\"performance\":65,\"security\":70,\"bestPractices\":75}\n```\nThe code is clean.",
            ReviewMode::Review,
        );
        assert_eq!(parsed["status"], "complete");
        assert_eq!(parsed["mode"], "review");
        assert_eq!(parsed["score"]["overall"], 72);
        assert_eq!(parsed["score"]["bestPractices"], 75);
        assert_eq!(parsed["prose"], "The code is clean.");
        assert!(parsed.get("score_error").is_none());
    }

    #[test]
    fn render_unscored_review_as_null() {
        let parsed = render_result("Looks fine, minor issues.", ReviewMode::Review);
        assert!(parsed["score"].is_null());
        assert_eq!(parsed["prose"], "Looks fine, minor issues.");
        assert!(parsed.get("score_error").is_none());
    }

    #[test]
    fn render_malformed_score_error() {
        let parsed = render_result("```json\n{overall: 72}\n```\nText", ReviewMode::Review);
        assert!(parsed["score"].is_null());
        assert_eq!(parsed["score_error"]["kind"], "malformed");
        assert!(parsed["score_error"]["detail"].is_string());
        assert_eq!(parsed["prose"], "Text");
    }

    #[test]
    fn render_fix() {
        let parsed = render_result("Here is the corrected code.", ReviewMode::Fix);
        assert_eq!(parsed["mode"], "fix");
        assert!(parsed["score"].is_null());
    }

    #[test]
    fn render_failed_and_idle() {
        let failed = JsonRenderer.render(&SessionView::Failed {
            mode: ReviewMode::Review,
            reason: "Connection error",
        });
        let parsed: serde_json::Value = serde_json::from_str(&failed).unwrap();
        assert_eq!(parsed["status"], "failed");
        assert_eq!(parsed["error"], "Connection error");

        let idle: serde_json::Value =
            serde_json::from_str(&JsonRenderer.render(&SessionView::Idle)).unwrap();
        assert_eq!(idle["status"], "idle");
    }

    #[test]
    fn scored_view_ignores_panel_visibility() {
        let result = extract(
            "```json\n{\"overall\":1,\"readability\":2,\"performance\":3,\"security\":4,\"bestPractices\":5}\n```",
        );
        let output = JsonRenderer.render(&SessionView::Result {
            result: &result,
            panel: PanelView::Hidden,
        });
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["score"]["security"], 4);
        assert_eq!(parsed["prose"], "");
    }
}
