//! Clap argument types and input resolution.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use codecritic::models::{Language, ProviderName};
use codecritic::session::SessionView;

/// AI-assisted code review and quality scoring.
#[derive(Parser, Debug)]
#[command(
    name = "codecritic",
    version = codecritic::constants::VERSION,
    about = super::ABOUT_STYLED,
)]
pub struct Cli {
    /// Suppress all non-essential output (banner, progress, informational messages).
    #[arg(long, short = 'q', global = true, default_value_t = false)]
    pub quiet: bool,

    /// LLM provider to use (overrides config and environment).
    #[arg(long, global = true)]
    pub provider: Option<ProviderName>,

    /// Model name to use (overrides config and environment).
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Review code: quality score plus written feedback.
    Review(ReviewArgs),

    /// Ask for a corrected version of the code.
    Fix(FixArgs),

    /// Start an interactive session.
    Session(SessionArgs),

    /// List supported languages.
    Languages,
}

/// Where the code comes from and how results are printed.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Source file to read. Use `-` or omit to read stdin.
    pub file: Option<PathBuf>,

    /// Language of the code (default: from the file extension, then config).
    #[arg(long, short = 'l')]
    pub language: Option<Language>,

    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,
}

/// Arguments for the `review` subcommand.
#[derive(clap::Args, Debug)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Open the quality score panel under the review.
    #[arg(long, default_value_t = false)]
    pub score: bool,
}

/// Arguments for the `fix` subcommand.
#[derive(clap::Args, Debug)]
pub struct FixArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the `session` subcommand.
#[derive(clap::Args, Debug)]
pub struct SessionArgs {
    /// Language to start with (default: from the file extension, then config).
    #[arg(long, short = 'l')]
    pub language: Option<Language>,

    /// File to load into the buffer at startup.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    /// Render a session view using the renderer for this format.
    pub fn render(&self, view: &SessionView<'_>) -> String {
        use codecritic::output::OutputRenderer;
        match self {
            OutputFormat::Terminal => codecritic::output::terminal::TerminalRenderer.render(view),
            OutputFormat::Json => codecritic::output::json::JsonRenderer.render(view),
        }
    }
}

impl InputArgs {
    /// The file to read, or `None` for stdin.
    pub fn source_path(&self) -> Option<&Path> {
        match self.file.as_deref() {
            Some(path) if path == Path::new("-") => None,
            other => other,
        }
    }

    /// Explicit `--language`, else the one implied by the file extension.
    pub fn resolve_language(&self) -> Option<Language> {
        self.language
            .or_else(|| self.source_path().and_then(Language::from_path))
    }
}

impl SessionArgs {
    pub fn resolve_language(&self) -> Option<Language> {
        self.language
            .or_else(|| self.file.as_deref().and_then(Language::from_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codecritic::models::{AbsentReason, ReviewMode, ReviewResult, ScoreExtraction};
    use codecritic::session::PanelView;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn review_defaults() {
        let cli = parse(&["codecritic", "review"]);
        assert!(!cli.quiet);
        match cli.command {
            Command::Review(args) => {
                assert!(args.input.file.is_none());
                assert!(args.input.language.is_none());
                assert_eq!(args.input.format, OutputFormat::Terminal);
                assert!(!args.score);
            }
            _ => panic!("expected Review command"),
        }
    }

    #[test]
    fn review_with_file_language_and_score() {
        let cli = parse(&[
            "codecritic",
            "review",
            "src/app.py",
            "--language",
            "python",
            "--format",
            "json",
            "--score",
        ]);
        match cli.command {
            Command::Review(args) => {
                assert_eq!(args.input.file, Some(PathBuf::from("src/app.py")));
                assert_eq!(args.input.language, Some(Language::Python));
                assert_eq!(args.input.format, OutputFormat::Json);
                assert!(args.score);
            }
            _ => panic!("expected Review command"),
        }
    }

    #[test]
    fn unknown_language_is_rejected() {
        let result = Cli::try_parse_from(["codecritic", "fix", "--language", "cobol"]);
        assert!(result.is_err());
    }

    #[test]
    fn fix_has_no_score_flag() {
        let result = Cli::try_parse_from(["codecritic", "fix", "--score"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&[
            "codecritic",
            "fix",
            "-q",
            "--provider",
            "anthropic",
            "--model",
            "claude-sonnet-4-5",
        ]);
        assert!(cli.quiet);
        assert_eq!(cli.provider, Some(ProviderName::Anthropic));
        assert_eq!(cli.model.as_deref(), Some("claude-sonnet-4-5"));
        assert!(matches!(cli.command, Command::Fix(_)));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let result = Cli::try_parse_from(["codecritic", "--provider", "nope", "languages"]);
        assert!(result.is_err());
    }

    #[test]
    fn session_args() {
        let cli = parse(&["codecritic", "session", "-l", "rust", "--file", "main.rs"]);
        match cli.command {
            Command::Session(args) => {
                assert_eq!(args.language, Some(Language::Rust));
                assert_eq!(args.file, Some(PathBuf::from("main.rs")));
            }
            _ => panic!("expected Session command"),
        }
    }

    #[test]
    fn dash_means_stdin() {
        let cli = parse(&["codecritic", "review", "-"]);
        match cli.command {
            Command::Review(args) => assert!(args.input.source_path().is_none()),
            _ => panic!("expected Review command"),
        }
    }

    #[test]
    fn language_falls_back_to_extension() {
        let cli = parse(&["codecritic", "review", "lib/thing.rb"]);
        match cli.command {
            Command::Review(args) => {
                assert_eq!(args.input.resolve_language(), Some(Language::Ruby))
            }
            _ => panic!("expected Review command"),
        }

        let cli = parse(&["codecritic", "review", "lib/thing.rb", "-l", "perl"]);
        match cli.command {
            Command::Review(args) => {
                assert_eq!(args.input.resolve_language(), Some(Language::Perl))
            }
            _ => panic!("expected Review command"),
        }
    }

    #[test]
    fn output_format_render_terminal_and_json() {
        let result = ReviewResult {
            mode: ReviewMode::Fix,
            score: ScoreExtraction::Absent(AbsentReason::NoBlock),
            prose: "Use a constant.".into(),
        };
        let view = SessionView::Result {
            result: &result,
            panel: PanelView::Hidden,
        };

        let terminal = OutputFormat::Terminal.render(&view);
        assert!(terminal.contains("Use a constant."));

        let json: serde_json::Value =
            serde_json::from_str(&OutputFormat::Json.render(&view)).unwrap();
        assert_eq!(json["mode"], "fix");
    }
}
