//! Integration tests using a mock completion provider.
//!
//! Drives sessions end-to-end (prompt, completion, extraction, state,
//! rendering) without making real API calls.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use codecritic::constants::{EMPTY_CODE_MESSAGE, REVIEW_FIRST_MESSAGE};
use codecritic::models::{AbsentReason, Language, ReviewMode, ScoreExtraction, ScoreReport};
use codecritic::output::OutputRenderer;
use codecritic::output::json::JsonRenderer;
use codecritic::output::terminal::TerminalRenderer;
use codecritic::providers::{CompletionProvider, ProviderError};
use codecritic::session::driver::{retry_action, run_action};
use codecritic::session::{PanelView, Phase, Session, SessionError, SessionView};

const EXAMPLE_SCORED: &str = "```json\n{\"overall\":72,\"readability\":80,\"performance\":65,\"security\":70,\"bestPractices\":75}\n```\nThe code is clean.";

/// A mock provider that returns a canned response and records prompts.
struct MockProvider {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }
}

/// A provider that fails a set number of times, then answers.
struct FlakyProvider {
    failures_left: Mutex<usize>,
    error: String,
    response: String,
}

#[async_trait]
impl CompletionProvider for FlakyProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        let mut left = self.failures_left.lock().unwrap();
        if *left > 0 {
            *left -= 1;
            return Err(ProviderError::ApiError(self.error.clone()));
        }
        Ok(self.response.clone())
    }
}

fn session_with(code: &str, language: Language) -> Session {
    let mut session = Session::new(language, Duration::ZERO);
    session.set_code(code);
    session
}

#[tokio::test]
async fn example_1_scored_review() {
    let provider = MockProvider::new(EXAMPLE_SCORED);
    let mut session = session_with("function add(a, b) { return a + b; }", Language::JavaScript);

    run_action(&provider, &mut session, ReviewMode::Review)
        .await
        .unwrap();

    assert_eq!(session.phase(), &Phase::Complete);
    let result = session.state().last_result.as_ref().unwrap();
    assert_eq!(result.score_report(), Some(&ScoreReport::new(72, 80, 65, 70, 75)));
    assert_eq!(result.prose, "The code is clean.");
    assert!(!session.state().score_panel_visible);
}

#[tokio::test]
async fn example_2_unscored_review() {
    let provider = MockProvider::new("Looks fine, minor issues.");
    let mut session = session_with("x = 1", Language::Python);

    run_action(&provider, &mut session, ReviewMode::Review)
        .await
        .unwrap();

    let result = session.state().last_result.as_ref().unwrap();
    assert_eq!(result.score, ScoreExtraction::Absent(AbsentReason::NoBlock));
    assert_eq!(result.prose, "Looks fine, minor issues.");

    session.toggle_score_panel().unwrap();
    assert!(matches!(
        session.view(),
        SessionView::Result {
            panel: PanelView::Unavailable,
            ..
        }
    ));
}

#[tokio::test]
async fn example_3_empty_code_never_reaches_provider() {
    let provider = MockProvider::new(EXAMPLE_SCORED);
    let mut session = session_with("", Language::Go);

    let err = run_action(&provider, &mut session, ReviewMode::Review)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), EMPTY_CODE_MESSAGE);
    assert_eq!(session.phase(), &Phase::Idle);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn example_3_empty_code_keeps_previous_phase() {
    let provider = MockProvider::new(EXAMPLE_SCORED);
    let mut session = session_with("fn main() {}", Language::Rust);
    run_action(&provider, &mut session, ReviewMode::Review)
        .await
        .unwrap();

    session.set_code("   \n");
    assert!(
        run_action(&provider, &mut session, ReviewMode::Fix)
            .await
            .is_err()
    );
    assert_eq!(session.phase(), &Phase::Complete);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn example_4_fix_only_session_rejects_score_toggle() {
    let provider = MockProvider::new(EXAMPLE_SCORED);
    let mut session = session_with("def f(): pass", Language::Python);

    run_action(&provider, &mut session, ReviewMode::Fix)
        .await
        .unwrap();

    assert_eq!(session.phase(), &Phase::Complete);
    assert!(
        session
            .state()
            .last_result
            .as_ref()
            .unwrap()
            .score_report()
            .is_none()
    );

    let err = session.toggle_score_panel().unwrap_err();
    assert_eq!(err, SessionError::ReviewRequired);
    assert_eq!(err.to_string(), REVIEW_FIRST_MESSAGE);
    assert!(!session.state().score_panel_visible);
}

#[tokio::test]
async fn fix_prose_keeps_full_response() {
    let provider = MockProvider::new(EXAMPLE_SCORED);
    let mut session = session_with("def f(): pass", Language::Python);

    run_action(&provider, &mut session, ReviewMode::Fix)
        .await
        .unwrap();

    assert_eq!(
        session.state().last_result.as_ref().unwrap().prose,
        EXAMPLE_SCORED.trim()
    );
}

#[tokio::test]
async fn prompt_carries_language_and_code() {
    let provider = MockProvider::new("ok");
    let mut session = session_with("SELECT 1;", Language::Haskell);

    run_action(&provider, &mut session, ReviewMode::Review)
        .await
        .unwrap();
    let review_prompt = provider.last_prompt();
    assert!(review_prompt.contains("haskell"));
    assert!(review_prompt.contains("SELECT 1;"));
    assert!(review_prompt.contains("bestPractices"));

    run_action(&provider, &mut session, ReviewMode::Fix)
        .await
        .unwrap();
    let fix_prompt = provider.last_prompt();
    assert!(fix_prompt.contains("SELECT 1;"));
    assert!(!fix_prompt.contains("bestPractices"));
}

#[tokio::test]
async fn malformed_block_degrades_without_panic() {
    let provider = MockProvider::new("```json\n{\"overall\": 72, \"readability\": }\n```\nSee notes.");
    let mut session = session_with("x", Language::Bash);

    run_action(&provider, &mut session, ReviewMode::Review)
        .await
        .unwrap();

    let result = session.state().last_result.as_ref().unwrap();
    assert!(matches!(
        result.score,
        ScoreExtraction::Absent(AbsentReason::Malformed(_))
    ));
    assert_eq!(result.prose, "See notes.");
}

#[tokio::test]
async fn failure_then_retry_recovers() {
    let provider = FlakyProvider {
        failures_left: Mutex::new(1),
        error: "Gemini API error: 503 Service Unavailable".into(),
        response: EXAMPLE_SCORED.into(),
    };
    let mut session = session_with("let x = 1;", Language::TypeScript);

    run_action(&provider, &mut session, ReviewMode::Review)
        .await
        .unwrap();
    assert_eq!(
        session.phase(),
        &Phase::Failed {
            mode: ReviewMode::Review,
            reason: "High model load".into()
        }
    );
    assert_eq!(session.toggle_score_panel(), Err(SessionError::ReviewRequired));

    retry_action(&provider, &mut session).await.unwrap();
    assert_eq!(session.phase(), &Phase::Complete);
    assert_eq!(session.toggle_score_panel(), Ok(true));
}

#[tokio::test]
async fn review_then_fix_then_toggle_shows_unavailable() {
    let provider = MockProvider::new(EXAMPLE_SCORED);
    let mut session = session_with("puts 1", Language::Ruby);

    run_action(&provider, &mut session, ReviewMode::Review)
        .await
        .unwrap();
    session.toggle_score_panel().unwrap();
    run_action(&provider, &mut session, ReviewMode::Fix)
        .await
        .unwrap();

    assert!(!session.state().score_panel_visible);
    assert_eq!(session.toggle_score_panel(), Ok(true));
    assert!(matches!(
        session.view(),
        SessionView::Result {
            panel: PanelView::Unavailable,
            ..
        }
    ));
}

#[tokio::test]
async fn rendered_output_for_completed_review() {
    colored::control::set_override(false);
    let provider = MockProvider::new(EXAMPLE_SCORED);
    let mut session = session_with("int main() {}", Language::Cpp);

    run_action(&provider, &mut session, ReviewMode::Review)
        .await
        .unwrap();
    session.toggle_score_panel().unwrap();

    let terminal = TerminalRenderer.render(&session.view());
    assert!(terminal.contains("The code is clean."));
    assert!(terminal.contains("72/100"));
    assert!(terminal.contains("Security"));

    let json: serde_json::Value =
        serde_json::from_str(&JsonRenderer.render(&session.view())).unwrap();
    assert_eq!(json["score"]["readability"], 80);
    assert_eq!(json["prose"], "The code is clean.");
}
