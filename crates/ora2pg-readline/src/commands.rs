//! Slash-command parsing for the interactive session.

use std::path::PathBuf;
use std::str::FromStr;

use ora2pg_core::MigrationKind;
use thiserror::Error;

/// Command names offered for completion and hints.
pub const COMMAND_NAMES: &[&str] = &[
    "/convert", "/explain", "/kind", "/kinds", "/paste", "/load", "/clear", "/source", "/target",
    "/copy", "/dismiss", "/history", "/status", "/verbose", "/help",
];

/// Line that ends multi-line source entry.
pub const PASTE_END: &str = "/end";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Convert,
    /// Refresh the migration insights
    Explain,
    /// Show the selected kind, or select one
    Kind(Option<MigrationKind>),
    Kinds,
    Paste,
    Load(PathBuf),
    Clear,
    Source,
    Target,
    Copy,
    Dismiss,
    History,
    Status,
    Verbose,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Commands start with '/'. Use /paste to enter Oracle code.")]
    NotACommand,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("Unknown migration kind '{0}'. See /kinds.")]
    InvalidKind(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return Ok(Command::Quit);
        }
        if !line.starts_with('/') {
            return Err(CommandError::NotACommand);
        }

        let (name, argument) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim()).filter(|rest| !rest.is_empty())),
            None => (line, None),
        };

        let command = match name {
            "/convert" => Command::Convert,
            "/explain" => Command::Explain,
            "/kind" => Command::Kind(argument.map(parse_kind).transpose()?),
            "/kinds" => Command::Kinds,
            "/paste" => Command::Paste,
            "/load" => Command::Load(PathBuf::from(
                argument.ok_or(CommandError::MissingArgument("/load"))?,
            )),
            "/clear" => Command::Clear,
            "/source" => Command::Source,
            "/target" => Command::Target,
            "/copy" => Command::Copy,
            "/dismiss" => Command::Dismiss,
            "/history" => Command::History,
            "/status" => Command::Status,
            "/verbose" => Command::Verbose,
            "/help" => Command::Help,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Accepts the identifier (`FULL_PACKAGE`, any case) or the 1-based position
/// shown by `/kinds`.
fn parse_kind(argument: &str) -> Result<MigrationKind, CommandError> {
    if let Ok(index) = argument.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| MigrationKind::all().get(i).copied())
            .ok_or_else(|| CommandError::InvalidKind(argument.to_string()));
    }
    MigrationKind::from_str(argument).map_err(|_| CommandError::InvalidKind(argument.to_string()))
}
