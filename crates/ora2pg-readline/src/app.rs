//! Interactive session: owns the state and reacts to commands and job outcomes.

use std::path::Path;

use colored::Colorize;
use ora2pg_core::{HistoryItem, JobOutcome, SessionState, TranslationJob};
use ora2pg_execution::JobExecutor;

use crate::clipboard::copy_to_clipboard;
use crate::commands::{Command, PASTE_END};
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct ReplApp {
    state: SessionState,
    executor: JobExecutor,
    history: Vec<HistoryItem>,
    /// Translation in flight, kept for its history entry
    pending: Option<TranslationJob>,
    /// Lines collected by `/paste`
    paste: Option<Vec<String>>,
    verbose: bool,
}

impl ReplApp {
    pub fn new(executor: JobExecutor) -> Self {
        Self {
            state: SessionState::new(),
            executor,
            history: Vec::new(),
            pending: None,
            paste: None,
            verbose: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn prompt(&self) -> String {
        if self.paste.is_some() {
            "... ".to_string()
        } else if self.state.is_translating {
            "ora2pg (converting)> ".to_string()
        } else {
            format!("ora2pg [{}]> ", self.state.migration_kind.identifier())
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        if let Some(lines) = self.paste.as_mut() {
            if line.trim() == PASTE_END {
                let source = lines.join("\n");
                self.paste = None;
                self.state.set_source(source);
                println!("{}", render::source_panel(&self.state));
            } else {
                lines.push(line.to_string());
            }
            return Flow::Continue;
        }

        if line.trim().is_empty() {
            return Flow::Continue;
        }

        match line.parse::<Command>() {
            Ok(command) => self.run(command),
            Err(err) => {
                println!("{}", err.to_string().yellow());
                Flow::Continue
            }
        }
    }

    fn run(&mut self, command: Command) -> Flow {
        match command {
            Command::Convert => self.convert(),
            Command::Explain => self.explain(),
            Command::Kind(None) => println!(
                "{} ({})",
                self.state.migration_kind.label(),
                self.state.migration_kind.identifier()
            ),
            Command::Kind(Some(kind)) => {
                self.state.select_kind(kind);
                println!("{}", format!("Migration kind: {}", kind.label()).green());
            }
            Command::Kinds => print!("{}", render::kinds(self.state.migration_kind)),
            Command::Paste => {
                self.paste = Some(Vec::new());
                println!(
                    "{}",
                    format!("Paste Oracle code, then type {PASTE_END} on its own line.").bright_black()
                );
            }
            Command::Load(path) => self.load(&path),
            Command::Clear => {
                self.state.clear_source();
                println!("{}", "Source cleared.".bright_black());
            }
            Command::Source => println!("{}", render::source_panel(&self.state)),
            Command::Target => println!("{}", render::target_panel(&self.state)),
            Command::Copy => self.copy(),
            Command::Dismiss => {
                if self.state.error_message.is_some() {
                    self.state.dismiss_error();
                    println!("{}", "Error dismissed.".bright_black());
                } else {
                    println!("{}", "No error to dismiss.".bright_black());
                }
            }
            Command::History => print!("{}", render::history(self.history())),
            Command::Status => {
                println!("{}", render::status(&self.state, self.verbose));
                if let Some(message) = &self.state.error_message {
                    println!("{}", render::error_overlay(message));
                }
            }
            Command::Verbose => {
                self.verbose = !self.verbose;
                let mode = if self.verbose { "on" } else { "off" };
                println!("{}", format!("Verbose activity {mode}.").bright_black());
            }
            Command::Help => print!("{}", render::help()),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn convert(&mut self) {
        if self.state.is_translating {
            println!("{}", "Converting...".yellow());
            return;
        }
        let Some(job) = self.state.begin_translation() else {
            println!("{}", "Nothing to convert: the source is empty.".bright_black());
            return;
        };

        tracing::info!("[Repl] Converting as {}", job.kind());
        println!("{}", "Converting...".yellow());
        self.executor.spawn_translation(job.clone());
        self.pending = Some(job);
    }

    fn explain(&mut self) {
        let reason = if self.state.is_explaining {
            Some(render::INSIGHTS_LOADING)
        } else if self.state.is_translating {
            Some("Wait for the conversion to finish.")
        } else if self.state.error_message.is_some() {
            Some("Dismiss the translation error first (/dismiss).")
        } else if self.state.target_text.is_empty() {
            Some("Convert the source first (/convert).")
        } else {
            None
        };
        if let Some(reason) = reason {
            println!("{}", reason.bright_black());
            return;
        }

        if let Some(job) = self.state.begin_explanation() {
            self.executor.spawn_explanation(job);
            println!("{}", render::insights(&self.state));
        }
    }

    fn load(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(source) => {
                self.state.set_source(source);
                println!("{}", render::source_panel(&self.state));
            }
            Err(err) => println!(
                "{}",
                format!("Failed to read {}: {err}", path.display()).red()
            ),
        }
    }

    fn copy(&self) {
        if self.state.target_text.is_empty() {
            println!("{}", "Nothing to copy yet.".bright_black());
            return;
        }
        match copy_to_clipboard(&self.state.target_text) {
            Ok(()) => println!("{}", "Copied PostgreSQL code to clipboard.".green()),
            Err(err) => println!("{}", err.to_string().red()),
        }
    }

    /// Applies a finished job and prints the affected region.
    pub fn apply(&mut self, outcome: JobOutcome) {
        let translated = matches!(outcome, JobOutcome::Translation(Ok(_)));
        let is_translation = matches!(outcome, JobOutcome::Translation(_));
        self.state.apply(outcome);

        if is_translation {
            if let Some(job) = self.pending.take() {
                if translated {
                    self.history.push(HistoryItem::new(job.kind(), job.source()));
                }
            }
            match &self.state.error_message {
                Some(message) => println!("{}", render::error_overlay(message)),
                None => println!("{}", render::target_panel(&self.state)),
            }
        } else {
            println!("{}", render::insights(&self.state));
        }
    }
}
