//! Terminal renderer: styled prose plus the quality score panel.

use colored::{ColoredString, Colorize};

use crate::models::{Language, Metric, QualityTier, ReviewMode, ScoreReport};
use crate::output::OutputRenderer;
use crate::output::markdown::render_markdown;
use crate::session::{PanelView, SessionView};

const GAUGE_WIDTH: usize = 30;
const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 15;

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render(&self, view: &SessionView<'_>) -> String {
        match view {
            SessionView::Idle => format!(
                "{}\n",
                "  No result yet. Load some code, then run review or fix.".dimmed()
            ),
            SessionView::Loading { mode } => {
                format!("{} {}\n", "◌".cyan(), activity(*mode).dimmed())
            }
            SessionView::Failed { mode, reason } => format!(
                " {} {} failed: {}\n   {} type {} to try again\n",
                "✖".red().bold(),
                mode,
                reason.red(),
                "→".cyan(),
                "retry".bold()
            ),
            SessionView::Result { result, panel } => {
                let mut output = String::new();
                output.push_str(&format!("{}\n", heading(result.mode)));
                let prose = render_markdown(&result.prose);
                if !prose.is_empty() {
                    output.push('\n');
                    output.push_str(&prose);
                    output.push('\n');
                }
                match panel {
                    PanelView::Hidden => {}
                    PanelView::Score(report) => {
                        output.push('\n');
                        output.push_str(&render_score(report));
                    }
                    PanelView::Unavailable => {
                        output.push('\n');
                        output.push_str(&format!(
                            " {} {}\n",
                            "ℹ".yellow().bold(),
                            "Quality metrics unavailable for this response.".yellow()
                        ));
                    }
                }
                output
            }
        }
    }
}

fn activity(mode: ReviewMode) -> &'static str {
    match mode {
        ReviewMode::Review => "Reviewing code…",
        ReviewMode::Fix => "Generating fix…",
    }
}

fn heading(mode: ReviewMode) -> ColoredString {
    let title = match mode {
        ReviewMode::Review => "── Code Review ──────────────────────",
        ReviewMode::Fix => "── Suggested Fix ────────────────────",
    };
    title.bold()
}

/// The score panel: overall gauge, then one bar per sub-metric.
pub fn render_score(report: &ScoreReport) -> String {
    let mut output = String::new();
    let tier = report.overall.tier();

    output.push_str(&format!(
        " {}  {}/100  {}\n",
        "Code Quality".bold(),
        report.overall.to_string().bold(),
        tint(&tier.to_string(), tier).bold()
    ));
    output.push_str(&format!(" {}\n", bar(&report.overall, GAUGE_WIDTH)));
    output.push('\n');

    for (label, metric) in report.breakdown() {
        output.push_str(&format!(
            " {label:<LABEL_WIDTH$} {} {:>3}\n",
            bar(metric, BAR_WIDTH),
            metric.to_string()
        ));
    }
    output.push_str(&format!("{}\n", "───────────────────────────────────".dimmed()));
    output
}

/// A dimmed informational line.
pub fn render_info(message: &str) -> String {
    format!("  {} {}\n", "ℹ".dimmed(), message.dimmed())
}

/// A yellow warning line.
pub fn render_warning(message: &str) -> String {
    format!("  {} {}\n", "⚠".yellow().bold(), message.yellow())
}

/// One line per supported language: tag, then label.
pub fn render_languages() -> String {
    Language::all()
        .map(|lang| {
            format!(
                "  {} {}\n",
                format!("{:<12}", lang.tag()).bold(),
                lang.label().dimmed()
            )
        })
        .collect()
}

/// Fill proportional to the clamped value.
fn bar(metric: &Metric, width: usize) -> String {
    let value = usize::from(metric.clamped());
    let filled = (value * width + 50) / 100;
    let fill = "█".repeat(filled);
    let rest = "░".repeat(width - filled);
    format!("{}{}", tint(&fill, metric.tier()), rest.dimmed())
}

fn tint(text: &str, tier: QualityTier) -> ColoredString {
    match tier {
        QualityTier::Excellent => text.green(),
        QualityTier::Good => text.blue(),
        QualityTier::Fair => text.yellow(),
        QualityTier::Poor => text.red(),
    }
}
