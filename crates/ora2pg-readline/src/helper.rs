//! rustyline helper: slash-command completion, hints and highlighting.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use ora2pg_core::MigrationKind;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::COMMAND_NAMES;

#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
    kinds: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMAND_NAMES.iter().map(|name| name.to_string()).collect(),
            kinds: MigrationKind::all()
                .iter()
                .map(|kind| kind.identifier().to_string())
                .collect(),
        }
    }

    /// Candidates for the word under the cursor: command names, or kind
    /// identifiers after `/kind `.
    fn candidates(&self, line: &str) -> (usize, Vec<&String>) {
        if let Some(argument) = line.strip_prefix("/kind ") {
            let prefix = argument.trim_start().to_ascii_uppercase();
            let start = line.len() - argument.trim_start().len();
            let matches = self
                .kinds
                .iter()
                .filter(|kind| kind.starts_with(&prefix))
                .collect();
            return (start, matches);
        }

        if line.starts_with('/') && !line.contains(' ') {
            let matches = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .collect();
            return (0, matches);
        }

        (0, vec![])
    }
}

impl Default for CliHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (start, matches) = self.candidates(line);
        let typed = &line[start..];
        matches
            .into_iter()
            .find(|candidate| candidate.len() > typed.len())
            .map(|candidate| candidate[typed.len()..].to_string())
    }
}

impl Validator for CliHelper {}
