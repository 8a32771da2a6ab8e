//! codecritic: AI-assisted code review CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use codecritic::config;
use codecritic::constants;
use codecritic::env;
use codecritic::models;
use codecritic::progress;
use codecritic::providers;
use codecritic::session;

use std::io::{IsTerminal, Read};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::args::{Cli, Command, FixArgs, InputArgs, OutputFormat, ReviewArgs, SessionArgs};
use config::Config;
use env::Env;
use models::{Language, ReviewMode};
use progress::ActivityIndicator;
use providers::CompletionProvider;
use providers::rig::RigProvider;
use session::repl::Repl;
use session::{Phase, Session};

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

/// Route `tracing` output to stderr, filtered by `CODECRITIC_LOG`.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Env::real();

    match cli.command {
        Command::Languages => {
            cli::print_languages();
            Ok(())
        }
        Command::Review(ref args) => run_review(&cli, args, &env).await,
        Command::Fix(ref args) => run_fix(&cli, args, &env).await,
        Command::Session(ref args) => run_interactive(&cli, args, &env).await,
    }
}

/// Load layered config and apply the global CLI overrides.
fn load_config(cli: &Cli, env: &Env) -> Result<Config> {
    let work_dir = std::env::current_dir().context("could not determine working directory")?;
    let mut config =
        Config::load(Some(&work_dir), env).context("failed to load configuration")?;

    config.apply_cli_overrides(cli.provider, cli.model.as_deref(), env);
    if let Some(color) = config.output.color {
        colored::control::set_override(color);
    }

    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

fn build_provider(config: &Config) -> Result<Arc<dyn CompletionProvider>> {
    let provider = RigProvider::new(config.provider.clone())
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(Arc::new(provider))
}

/// Read the code for a one-shot command from a file or stdin.
async fn read_source(input: &InputArgs) -> Result<String> {
    match input.source_path() {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            if std::io::stdin().is_terminal() {
                eprintln!("Reading code from stdin (end with Ctrl-D)…");
            }
            tokio::task::spawn_blocking(|| {
                let mut code = String::new();
                std::io::stdin().read_to_string(&mut code).map(|_| code)
            })
            .await
            .context("stdin reader panicked")?
            .context("failed to read stdin")
        }
    }
}

async fn run_review(cli: &Cli, args: &ReviewArgs, env: &Env) -> Result<()> {
    run_one_shot(cli, &args.input, ReviewMode::Review, args.score, env).await
}

async fn run_fix(cli: &Cli, args: &FixArgs, env: &Env) -> Result<()> {
    run_one_shot(cli, &args.input, ReviewMode::Fix, false, env).await
}

/// Drive one action through a fresh session and print the result.
async fn run_one_shot(
    cli: &Cli,
    input: &InputArgs,
    mode: ReviewMode,
    open_score: bool,
    env: &Env,
) -> Result<()> {
    let config = load_config(cli, env)?;
    let language = input
        .resolve_language()
        .unwrap_or(config.session.default_language);

    let code = read_source(input).await?;
    let mut session = Session::new(language, config.session.reveal_delay());
    session.set_code(code);

    // Validate before touching the provider so empty input never needs a key.
    if let Err(e) = models::ReviewRequest::new(session.code(), language, mode) {
        bail!("{e}");
    }

    let provider = build_provider(&config)?;
    let show_progress = !cli.quiet
        && input.format == OutputFormat::Terminal
        && std::io::stderr().is_terminal();
    let indicator = ActivityIndicator::new(show_progress);

    indicator.begin(mode, language);
    let outcome = session::driver::run_action(provider.as_ref(), &mut session, mode).await;
    indicator.finish();
    outcome?;

    if let Phase::Failed { reason, .. } = session.phase() {
        if input.format == OutputFormat::Json {
            print!("{}", input.format.render(&session.view()));
        }
        bail!("{mode} failed: {reason}");
    }

    if open_score && session.toggle_score_panel().is_err() {
        tracing::debug!("score panel could not be opened");
    }
    print!("{}", input.format.render(&session.view()));
    Ok(())
}

async fn run_interactive(cli: &Cli, args: &SessionArgs, env: &Env) -> Result<()> {
    let config = load_config(cli, env)?;
    let language: Language = args
        .resolve_language()
        .unwrap_or(config.session.default_language);

    let mut session = Session::new(language, config.session.reveal_delay());
    if let Some(ref path) = args.file {
        let code = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        session.set_code(code);
    }

    let provider = build_provider(&config)?;
    if !cli.quiet {
        cli::print_banner(
            &config.provider.name.to_string(),
            &config.provider.model,
            language,
        );
    }

    let mut repl = Repl::new(provider, session, std::io::stdout())
        .quiet(cli.quiet)
        .with_prompt(std::io::stdin().is_terminal());
    repl.run(tokio::io::BufReader::new(tokio::io::stdin()))
        .await
        .context("failed to read from stdin")
}
