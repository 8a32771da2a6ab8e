//! Runs one action end to end: prompt, completion, extraction.

use crate::extract::extract_for;
use crate::models::{ReviewMode, ReviewRequest, ReviewResult};
use crate::prompt::build_prompt;
use crate::providers::{CompletionProvider, ProviderError, classify_error};

use super::{Session, SessionError, Ticket};

/// Send a prepared request and turn the raw response into a result.
///
/// Provider failures are returned untouched; callers classify them.
pub async fn fetch_result(
    provider: &dyn CompletionProvider,
    request: &ReviewRequest,
) -> Result<ReviewResult, ProviderError> {
    let prompt = build_prompt(request);
    let text = provider.complete(&prompt).await?;
    Ok(extract_for(request.mode(), &text))
}

/// Apply a finished service call to the session.
///
/// Returns `false` when the ticket was superseded in the meantime.
pub fn settle(
    session: &mut Session,
    ticket: Ticket,
    outcome: Result<ReviewResult, ProviderError>,
) -> bool {
    match outcome {
        Ok(result) => session.on_service_response(ticket, result),
        Err(e) => session.on_service_failure(ticket, classify_error(&e)),
    }
}

/// Start `mode` on the session's buffer and wait for it to settle.
///
/// Validation failures are returned as errors and leave the session
/// untouched; service failures land the session in `Failed`.
pub async fn run_action(
    provider: &dyn CompletionProvider,
    session: &mut Session,
    mode: ReviewMode,
) -> Result<Ticket, SessionError> {
    let (ticket, request) = session.start(mode)?;
    let outcome = fetch_result(provider, &request).await;
    settle(session, ticket, outcome);
    Ok(ticket)
}

/// Re-run the failed action and wait for it to settle.
pub async fn retry_action(
    provider: &dyn CompletionProvider,
    session: &mut Session,
) -> Result<Ticket, SessionError> {
    let (ticket, request) = session.retry()?;
    let outcome = fetch_result(provider, &request).await;
    settle(session, ticket, outcome);
    Ok(ticket)
}
