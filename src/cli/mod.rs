//! CLI command definitions, argument parsing, and console helpers.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use colored::Colorize;
use std::io::Write;

use codecritic::constants::APP_NAME;
use codecritic::models::Language;
use codecritic::output::terminal::render_languages;

/// About text with ANSI styling for clap help output.
pub const ABOUT_STYLED: &str =
    "\x1b[1mcodecritic\x1b[0m \x1b[2m· AI-assisted code review and quality scoring\x1b[0m";

/// Print the session banner to stderr.
pub fn print_banner(provider: &str, model: &str, language: Language) {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle);
    let _ = writeln!(
        handle,
        "  {} {}",
        APP_NAME.bold(),
        format!("· {provider}/{model} · {}", language.label()).dimmed(),
    );
    let _ = writeln!(
        handle,
        "  {}",
        "Type 'help' for commands, 'paste' to enter code.".dimmed()
    );
    let _ = writeln!(handle);
    let _ = handle.flush();
}

/// Print the supported languages to stdout.
pub fn print_languages() {
    print!("{}", render_languages());
}
