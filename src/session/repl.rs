//! Line-driven interactive session.
//!
//! Reads commands while at most one provider call is in flight. Starting a
//! new action drops the in-flight future, so superseded requests are
//! cancelled rather than left to race. All output goes to the writer the
//! caller hands in.

use std::future::Future;
use std::io::Write;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::models::{Language, ReviewMode, ReviewRequest, ReviewResult};
use crate::output::OutputRenderer;
use crate::output::terminal::{TerminalRenderer, render_info, render_languages, render_warning};
use crate::providers::{CompletionProvider, ProviderError};

use super::command::{HELP, SessionCommand};
use super::driver::{fetch_result, settle};
use super::{Session, SessionError, Ticket};

type ResultFuture = Pin<Box<dyn Future<Output = Result<ReviewResult, ProviderError>> + Send>>;

struct InFlight {
    ticket: Ticket,
    future: ResultFuture,
}

enum Input {
    Command,
    Paste(String),
}

/// What the caller should do after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the session and everything needed to drive it from input lines.
pub struct Repl<W> {
    provider: Arc<dyn CompletionProvider>,
    session: Session,
    in_flight: Option<InFlight>,
    input: Input,
    out: W,
    quiet: bool,
    prompt: bool,
}

impl<W: Write> Repl<W> {
    pub fn new(provider: Arc<dyn CompletionProvider>, session: Session, out: W) -> Self {
        Self {
            provider,
            session,
            in_flight: None,
            input: Input::Command,
            out,
            quiet: false,
            prompt: false,
        }
    }

    /// Suppress informational lines. Results and warnings still print.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Print a prompt marker before each line is read.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Ticket of the provider call currently in flight.
    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight.as_ref().map(|call| call.ticket)
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `quit`, or until input ends and no call is in flight.
    pub async fn run<R>(&mut self, reader: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut input_open = true;

        self.show_prompt();
        while input_open || self.in_flight.is_some() {
            tokio::select! {
                (ticket, outcome) = wait_for(&mut self.in_flight), if self.in_flight.is_some() => {
                    self.in_flight = None;
                    if settle(&mut self.session, ticket, outcome) {
                        self.reveal().await;
                    }
                    self.show_prompt();
                }
                line = lines.next_line(), if input_open => {
                    match line? {
                        Some(line) => {
                            if self.handle_line(&line).await == Flow::Quit {
                                break;
                            }
                            self.show_prompt();
                        }
                        None => input_open = false,
                    }
                }
            }
        }
        Ok(())
    }

    /// Wait for the in-flight call, apply its outcome and print the result.
    ///
    /// Returns false when nothing was in flight.
    pub async fn settle_in_flight(&mut self) -> bool {
        if self.in_flight.is_none() {
            return false;
        }
        let (ticket, outcome) = wait_for(&mut self.in_flight).await;
        self.in_flight = None;
        if settle(&mut self.session, ticket, outcome) {
            self.reveal().await;
        }
        true
    }

    pub async fn handle_line(&mut self, line: &str) -> Flow {
        if let Input::Paste(buffer) = &mut self.input {
            if line.trim_end() == "." {
                let code = std::mem::take(buffer);
                self.input = Input::Command;
                let count = code.lines().count();
                self.session.set_code(code);
                self.info(&format!("Loaded {count} line(s) into the buffer."));
            } else {
                buffer.push_str(line);
                buffer.push('\n');
            }
            return Flow::Continue;
        }

        let command = match SessionCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(e) => {
                self.warn(&e.to_string());
                return Flow::Continue;
            }
        };
        tracing::trace!(?command, "session command");

        match command {
            SessionCommand::Review => self.begin(ReviewMode::Review),
            SessionCommand::Fix => self.begin(ReviewMode::Fix),
            SessionCommand::Retry => {
                let started = self.session.retry();
                self.launch(started);
            }
            SessionCommand::Score => match self.session.toggle_score_panel() {
                Ok(_) => self.print_view(),
                Err(e) => self.warn(&e.to_string()),
            },
            SessionCommand::Reset => {
                if self.in_flight.is_some() {
                    self.warn("An action is still running; wait for it to finish.");
                } else {
                    self.session.reset();
                    self.info("Result cleared.");
                }
            }
            SessionCommand::Lang(None) => {
                let lang = self.session.language();
                let _ = writeln!(self.out, "  {} ({})", lang.label().bold(), lang.tag());
            }
            SessionCommand::Lang(Some(lang)) => {
                self.session.set_language(lang);
                self.info(&format!("Language set to {}.", lang.label()));
            }
            SessionCommand::Load(path) => self.load(&path).await,
            SessionCommand::Paste => {
                self.input = Input::Paste(String::new());
                self.info("Paste code, then end with a line containing only '.'");
            }
            SessionCommand::Show => self.show_buffer(),
            SessionCommand::Languages => {
                let _ = write!(self.out, "{}", render_languages());
            }
            SessionCommand::Help => {
                let _ = writeln!(self.out, "{HELP}");
            }
            SessionCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn begin(&mut self, mode: ReviewMode) {
        let started = self.session.start(mode);
        self.launch(started);
    }

    /// Queue the provider call for a freshly started action. A previous
    /// in-flight call is dropped.
    fn launch(&mut self, started: Result<(Ticket, ReviewRequest), SessionError>) {
        let (ticket, request) = match started {
            Ok(started) => started,
            Err(e) => {
                self.warn(&e.to_string());
                return;
            }
        };

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(
                cancelled = previous.ticket,
                ticket,
                "dropping superseded request"
            );
        }

        // A plain line; the prompt and typed input follow it, so it is never
        // rewritten in place.
        if !self.quiet {
            self.print_view();
        }

        let provider = Arc::clone(&self.provider);
        self.in_flight = Some(InFlight {
            ticket,
            future: Box::pin(async move { fetch_result(provider.as_ref(), &request).await }),
        });
    }

    async fn load(&mut self, path: &Path) {
        match tokio::fs::read_to_string(path).await {
            Ok(code) => {
                let count = code.lines().count();
                self.session.set_code(code);
                let mut message = format!("Loaded {count} line(s) from {}.", path.display());
                if let Some(lang) = Language::from_path(path) {
                    self.session.set_language(lang);
                    message.push_str(&format!(" Language set to {}.", lang.label()));
                }
                self.info(&message);
            }
            Err(e) => self.warn(&format!("failed to read {}: {e}", path.display())),
        }
    }

    fn show_buffer(&mut self) {
        if self.session.code().trim().is_empty() {
            self.info("The buffer is empty.");
            return;
        }
        for (i, line) in self.session.code().lines().enumerate() {
            let _ = writeln!(self.out, "{} {line}", format!("{:>4} │", i + 1).dimmed());
        }
    }

    /// Wait out the reveal delay, then print the settled view.
    async fn reveal(&mut self) {
        let now = Instant::now();
        if !self.session.reveal_armed(now) {
            if let Some(remaining) = self.session.reveal_remaining(now) {
                tokio::time::sleep(remaining).await;
            }
        }
        self.print_view();
    }

    fn print_view(&mut self) {
        let _ = write!(self.out, "{}", TerminalRenderer.render(&self.session.view()));
        let _ = self.out.flush();
    }

    fn info(&mut self, message: &str) {
        if !self.quiet {
            let _ = write!(self.out, "{}", render_info(message));
        }
    }

    fn warn(&mut self, message: &str) {
        let _ = write!(self.out, "{}", render_warning(message));
    }

    fn show_prompt(&mut self) {
        if !self.prompt {
            return;
        }
        let marker = match self.input {
            Input::Command if self.in_flight.is_some() => "codecritic (busy)>",
            Input::Command => "codecritic>",
            Input::Paste(_) => "...",
        };
        let _ = write!(self.out, "{} ", marker.bold());
        let _ = self.out.flush();
    }
}

/// Resolve the in-flight call. Only polled while one exists.
async fn wait_for(in_flight: &mut Option<InFlight>) -> (Ticket, Result<ReviewResult, ProviderError>) {
    match in_flight {
        Some(call) => (call.ticket, call.future.as_mut().await),
        None => std::future::pending().await,
    }
}
