//! Presentation state for one review session.
//!
//! A session owns the code buffer, the selected language, and the
//! lifecycle of the most recent action:
//!
//! ```text
//!   Idle ──start──▶ Pending ──response──▶ Complete
//!                     │  ▲                   │
//!                  failure└──start (supersede)│
//!                     ▼                      │
//!                   Failed ──retry──▶ Pending│
//!                     └──reset──▶ Idle ◀──reset
//! ```
//!
//! The session never parses text: it receives an already extracted
//! [`ReviewResult`]. Starting a new action while one is pending supersedes
//! it; the stale response is recognised by its [`Ticket`] and dropped.

pub mod command;
pub mod driver;
pub mod repl;

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::models::{
    AbsentReason, Language, ReviewMode, ReviewRequest, ReviewResult, ScoreExtraction, ScoreReport,
    ValidationError,
};

/// Identifies one started action. Responses carrying an older ticket are
/// ignored.
pub type Ticket = u64;

/// Rejected session actions. None of these change state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", crate::constants::REVIEW_FIRST_MESSAGE)]
    ReviewRequired,

    #[error("nothing to show until the current action completes")]
    NotComplete,

    #[error("there is no failed action to retry")]
    NothingToRetry,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending { mode: ReviewMode, ticket: Ticket },
    Complete,
    Failed { mode: ReviewMode, reason: String },
}

/// Everything the renderers may read.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: Phase,
    /// Set only when entering `Complete`; cleared when an action starts.
    pub last_result: Option<ReviewResult>,
    /// Reset to `false` whenever an action starts.
    pub score_panel_visible: bool,
    /// Whether a review (not a fix) has completed in this session.
    pub has_reviewed: bool,
    pub completed_at: Option<Instant>,
    pub language: Language,
    pub code: String,
}

/// What the score panel area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelView<'a> {
    Hidden,
    Score(&'a ScoreReport),
    /// Panel opened but the last response carried no usable score.
    Unavailable,
}

/// A render-ready snapshot of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionView<'a> {
    Idle,
    Loading { mode: ReviewMode },
    Failed { mode: ReviewMode, reason: &'a str },
    Result { result: &'a ReviewResult, panel: PanelView<'a> },
}

/// One interactive session: the single owner of [`SessionState`].
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    next_ticket: Ticket,
    reveal_delay: Duration,
}

impl Session {
    pub fn new(language: Language, reveal_delay: Duration) -> Self {
        Self {
            state: SessionState {
                phase: Phase::Idle,
                last_result: None,
                score_panel_visible: false,
                has_reviewed: false,
                completed_at: None,
                language,
                code: String::new(),
            },
            next_ticket: 0,
            reveal_delay,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> &Phase {
        &self.state.phase
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    /// Change the declared language. Takes effect on the next action.
    pub fn set_language(&mut self, language: Language) {
        self.state.language = language;
    }

    pub fn code(&self) -> &str {
        &self.state.code
    }

    /// Replace the code buffer.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.state.code = code.into();
    }

    /// Start an action on the current buffer.
    ///
    /// Empty code is rejected without touching state. On success the
    /// previous result is cleared, the score panel hidden, and any pending
    /// action superseded.
    pub fn start(&mut self, mode: ReviewMode) -> Result<(Ticket, ReviewRequest), SessionError> {
        let request = ReviewRequest::new(self.state.code.clone(), self.state.language, mode)?;

        if let Phase::Pending { ticket, .. } = self.state.phase {
            tracing::debug!(superseded = ticket, "new action supersedes pending request");
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.state.last_result = None;
        self.state.score_panel_visible = false;
        self.state.completed_at = None;
        self.state.phase = Phase::Pending { mode, ticket };
        tracing::debug!(%mode, ticket, language = %self.state.language, "action started");

        Ok((ticket, request))
    }

    pub fn start_review(&mut self) -> Result<(Ticket, ReviewRequest), SessionError> {
        self.start(ReviewMode::Review)
    }

    pub fn start_fix(&mut self) -> Result<(Ticket, ReviewRequest), SessionError> {
        self.start(ReviewMode::Fix)
    }

    /// Record a service response for `ticket`.
    ///
    /// Returns `false` (and changes nothing) unless `ticket` is the pending
    /// action. Fix completions never keep a score.
    pub fn on_service_response(&mut self, ticket: Ticket, mut result: ReviewResult) -> bool {
        let Some(mode) = self.pending_mode(ticket) else {
            tracing::debug!(ticket, "ignoring response for stale or unknown request");
            return false;
        };

        result.mode = mode;
        if mode == ReviewMode::Fix {
            result.score = ScoreExtraction::Absent(AbsentReason::NoBlock);
        } else {
            self.state.has_reviewed = true;
        }

        tracing::debug!(
            %mode,
            ticket,
            score = result.score.is_decoded(),
            prose_chars = result.prose.len(),
            "action complete"
        );
        self.state.last_result = Some(result);
        self.state.phase = Phase::Complete;
        self.state.completed_at = Some(Instant::now());
        true
    }

    /// Record a failed service call for `ticket`.
    pub fn on_service_failure(&mut self, ticket: Ticket, reason: impl Into<String>) -> bool {
        let Some(mode) = self.pending_mode(ticket) else {
            tracing::debug!(ticket, "ignoring failure for stale or unknown request");
            return false;
        };
        let reason = reason.into();
        tracing::debug!(%mode, ticket, %reason, "action failed");
        self.state.phase = Phase::Failed { mode, reason };
        true
    }

    /// Re-run the action that failed, on the current buffer.
    pub fn retry(&mut self) -> Result<(Ticket, ReviewRequest), SessionError> {
        match self.state.phase {
            Phase::Failed { mode, .. } => self.start(mode),
            _ => Err(SessionError::NothingToRetry),
        }
    }

    /// Return to `Idle`, dropping any result or failure.
    ///
    /// A pending action is left alone.
    pub fn reset(&mut self) {
        if matches!(self.state.phase, Phase::Pending { .. }) {
            return;
        }
        self.state.phase = Phase::Idle;
        self.state.last_result = None;
        self.state.score_panel_visible = false;
        self.state.completed_at = None;
    }

    /// Flip the score panel. Returns the new visibility.
    ///
    /// Requires a review to have completed at some point in the session
    /// and the session to currently be `Complete`.
    pub fn toggle_score_panel(&mut self) -> Result<bool, SessionError> {
        if !self.state.has_reviewed {
            return Err(SessionError::ReviewRequired);
        }
        if self.state.phase != Phase::Complete {
            return Err(SessionError::NotComplete);
        }
        self.state.score_panel_visible = !self.state.score_panel_visible;
        Ok(self.state.score_panel_visible)
    }

    /// Whether the completed result may be revealed at `now`.
    pub fn reveal_armed(&self, now: Instant) -> bool {
        self.reveal_remaining(now) == Some(Duration::ZERO)
    }

    /// Time left before the reveal, or `None` when nothing has completed.
    pub fn reveal_remaining(&self, now: Instant) -> Option<Duration> {
        if self.state.phase != Phase::Complete {
            return None;
        }
        let completed_at = self.state.completed_at?;
        Some((completed_at + self.reveal_delay).saturating_duration_since(now))
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> SessionView<'_> {
        match &self.state.phase {
            Phase::Idle => SessionView::Idle,
            Phase::Pending { mode, .. } => SessionView::Loading { mode: *mode },
            Phase::Failed { mode, reason } => SessionView::Failed {
                mode: *mode,
                reason,
            },
            Phase::Complete => match &self.state.last_result {
                Some(result) => {
                    let panel = match (self.state.score_panel_visible, result.score_report()) {
                        (false, _) => PanelView::Hidden,
                        (true, Some(report)) => PanelView::Score(report),
                        (true, None) => PanelView::Unavailable,
                    };
                    SessionView::Result { result, panel }
                }
                None => SessionView::Idle,
            },
        }
    }

    fn pending_mode(&self, ticket: Ticket) -> Option<ReviewMode> {
        match self.state.phase {
            Phase::Pending {
                mode,
                ticket: pending,
            } if pending == ticket => Some(mode),
            _ => None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Language::default(), crate::constants::DEFAULT_REVEAL_DELAY)
    }
}
