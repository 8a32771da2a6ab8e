//! The fixed set of languages a review can be declared in.
//!
//! The language only changes the wording of the prompt; it never affects
//! validation.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

/// Returned when a language tag is not one of the supported twenty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported language: '{tag}'. Supported: {supported}")]
pub struct UnknownLanguage {
    pub tag: String,
    pub supported: String,
}

/// A declared source language.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    JavaScript,
    Python,
    Java,
    CSharp,
    Cpp,
    Php,
    Ruby,
    Go,
    Swift,
    Kotlin,
    TypeScript,
    Rust,
    Dart,
    Scala,
    Perl,
    Haskell,
    Elixir,
    R,
    Matlab,
    Bash,
}

impl Language {
    /// Lowercase tag used on the command line and inside prompts.
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// Human-facing name.
    pub fn label(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Cpp => "C++",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Go => "Go",
            Language::Swift => "Swift",
            Language::Kotlin => "Kotlin",
            Language::TypeScript => "TypeScript",
            Language::Rust => "Rust",
            Language::Dart => "Dart",
            Language::Scala => "Scala",
            Language::Perl => "Perl",
            Language::Haskell => "Haskell",
            Language::Elixir => "Elixir",
            Language::R => "R",
            Language::Matlab => "MATLAB",
            Language::Bash => "Bash",
        }
    }

    /// All supported languages in menu order.
    pub fn all() -> impl Iterator<Item = Language> {
        Language::iter()
    }

    /// Comma-separated tag list, for error messages and help text.
    pub fn supported_tags() -> String {
        Language::all().map(Language::tag).collect::<Vec<_>>().join(", ")
    }

    /// Guess the language from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Language> {
        let lang = match ext.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "py" | "pyi" => Language::Python,
            "java" => Language::Java,
            "cs" => Language::CSharp,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "php" => Language::Php,
            "rb" => Language::Ruby,
            "go" => Language::Go,
            "swift" => Language::Swift,
            "kt" | "kts" => Language::Kotlin,
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "rs" => Language::Rust,
            "dart" => Language::Dart,
            "scala" | "sc" => Language::Scala,
            "pl" | "pm" => Language::Perl,
            "hs" | "lhs" => Language::Haskell,
            "ex" | "exs" => Language::Elixir,
            "r" => Language::R,
            "m" => Language::Matlab,
            "sh" | "bash" => Language::Bash,
            _ => return None,
        };
        Some(lang)
    }

    /// Guess the language from a path's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Language> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Language::from_extension)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::all()
            .find(|lang| lang.tag() == wanted)
            .ok_or_else(|| UnknownLanguage {
                tag: s.to_string(),
                supported: Language::supported_tags(),
            })
    }
}
