//! Activity indicator for terminal output.
//!
//! Shows a single status line on stderr while a request is pending and
//! clears it once the action settles. Silenced with `--quiet` or when
//! stderr is not a terminal.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use colored::Colorize;

use crate::models::{Language, ReviewMode};

/// What the indicator is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityStatus {
    Idle,
    Pending { mode: ReviewMode, language: Language },
}

/// Renders the pending-request status line.
///
/// Thread-safe so it can be shared with the task awaiting the provider.
pub struct ActivityIndicator {
    inner: Mutex<IndicatorState>,
    /// If false, all output is suppressed.
    enabled: bool,
}

struct IndicatorState {
    status: ActivityStatus,
    /// Number of lines we last printed (for clearing).
    rendered_lines: usize,
}

impl ActivityIndicator {
    pub fn new(enabled: bool) -> Self {
        Self {
            inner: Mutex::new(IndicatorState {
                status: ActivityStatus::Idle,
                rendered_lines: 0,
            }),
            enabled,
        }
    }

    /// Show the pending line for an action, replacing any previous one.
    pub fn begin(&self, mode: ReviewMode, language: Language) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.status = ActivityStatus::Pending { mode, language };
        if self.enabled {
            Self::render(&mut state);
        }
    }

    /// Clear the status line.
    pub fn finish(&self) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.status = ActivityStatus::Idle;
        if self.enabled {
            Self::clear_lines(state.rendered_lines);
        }
        state.rendered_lines = 0;
    }

    #[cfg(test)]
    fn status(&self) -> ActivityStatus {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .status
            .clone()
    }

    fn render(state: &mut IndicatorState) {
        Self::clear_lines(state.rendered_lines);
        state.rendered_lines = 0;

        let ActivityStatus::Pending { mode, language } = &state.status else {
            return;
        };
        let verb = match mode {
            ReviewMode::Review => "Reviewing",
            ReviewMode::Fix => "Fixing",
        };

        let stderr = io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(
            handle,
            "  {} {verb} {} code…",
            "◌".cyan().bold(),
            language.label().dimmed(),
        );
        let _ = handle.flush();
        state.rendered_lines = 1;
    }

    /// Move cursor up and clear `n` lines.
    fn clear_lines(n: usize) {
        if n == 0 {
            return;
        }
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        for _ in 0..n {
            let _ = write!(handle, "\x1b[1A\x1b[2K");
        }
        let _ = handle.flush();
    }
}
