//! Commands accepted by the interactive session prompt.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Language;
use crate::models::language::UnknownLanguage;

/// Help text listing every interactive command.
pub const HELP: &str = "\
Commands:
  review            review the buffer and score it
  fix               ask for a corrected version of the buffer
  score             show or hide the quality score panel
  retry             re-run the action that failed
  reset             clear the last result
  lang [TAG]        show or change the language
  load PATH         replace the buffer with a file's contents
  paste             type or paste code; end with a line containing only '.'
  show              print the current buffer
  languages         list supported languages
  help              show this help
  quit              leave the session";

/// One parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Review,
    Fix,
    Score,
    Retry,
    Reset,
    /// `None` prints the current language.
    Lang(Option<Language>),
    Load(PathBuf),
    Paste,
    Show,
    Languages,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Language(#[from] UnknownLanguage),
}

impl SessionCommand {
    /// Parse a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "review" | "r" => Self::Review,
            "fix" | "f" => Self::Fix,
            "score" | "s" => Self::Score,
            "retry" => Self::Retry,
            "reset" | "clear" => Self::Reset,
            "lang" | "language" => {
                if rest.is_empty() {
                    Self::Lang(None)
                } else {
                    Self::Lang(Some(rest.parse()?))
                }
            }
            "load" | "open" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("load"));
                }
                Self::Load(PathBuf::from(rest))
            }
            "paste" => Self::Paste,
            "show" => Self::Show,
            "languages" => Self::Languages,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_no_command() {
        assert_eq!(SessionCommand::parse("   "), Ok(None));
    }

    #[test]
    fn parses_actions_and_aliases() {
        assert_eq!(SessionCommand::parse("review"), Ok(Some(SessionCommand::Review)));
        assert_eq!(SessionCommand::parse(" FIX "), Ok(Some(SessionCommand::Fix)));
        assert_eq!(SessionCommand::parse("s"), Ok(Some(SessionCommand::Score)));
        assert_eq!(SessionCommand::parse("exit"), Ok(Some(SessionCommand::Quit)));
        assert_eq!(SessionCommand::parse("clear"), Ok(Some(SessionCommand::Reset)));
    }

    #[test]
    fn lang_with_and_without_tag() {
        assert_eq!(SessionCommand::parse("lang"), Ok(Some(SessionCommand::Lang(None))));
        assert_eq!(
            SessionCommand::parse("lang Python"),
            Ok(Some(SessionCommand::Lang(Some(Language::Python))))
        );
        assert!(matches!(
            SessionCommand::parse("lang cobol"),
            Err(CommandError::Language(_))
        ));
    }

    #[test]
    fn load_keeps_path_with_spaces() {
        assert_eq!(
            SessionCommand::parse("load my dir/main.rs"),
            Ok(Some(SessionCommand::Load(PathBuf::from("my dir/main.rs"))))
        );
        assert_eq!(
            SessionCommand::parse("load"),
            Err(CommandError::MissingArgument("load"))
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = SessionCommand::parse("deploy now").unwrap_err();
        assert_eq!(err, CommandError::Unknown("deploy".into()));
        assert!(err.to_string().contains("help"));
    }
}
