//! Text rendering of the session panels.
//!
//! Every function returns a `String` so the main loop decides where it goes.

use chrono::{Local, TimeZone};
use colored::Colorize;
use ora2pg_core::{HistoryItem, MigrationKind, SessionState, UiPhase};
use ora2pg_execution::ActivityEvent;

pub const TARGET_PLACEHOLDER: &str = "Translation will appear here...";
pub const INSIGHTS_PROMPT: &str =
    "Click \"Refresh Analysis\" (/explain) to compare the Oracle and PostgreSQL code.";
pub const INSIGHTS_LOADING: &str = "Analyzing schema differences...";

fn header(title: &str, detail: &str) -> String {
    if detail.is_empty() {
        format!("{}\n", format!("── {title} ──").bright_magenta().bold())
    } else {
        format!(
            "{} {}\n",
            format!("── {title} ──").bright_magenta().bold(),
            detail.bright_black()
        )
    }
}

fn line_count(text: &str) -> String {
    match text.lines().count() {
        1 => "1 line".to_string(),
        n => format!("{n} lines"),
    }
}

pub fn source_panel(state: &SessionState) -> String {
    let mut output = header(
        "Source (Oracle)",
        &format!(
            "{} · {}",
            state.migration_kind.label(),
            line_count(&state.source_text)
        ),
    );
    if state.source_text.is_empty() {
        output.push_str(&"(empty: use /paste or /load)".bright_black().to_string());
    } else {
        output.push_str(&state.source_text);
    }
    output
}

pub fn target_panel(state: &SessionState) -> String {
    let mut output = header("Target (PostgreSQL)", "");
    if state.is_translating {
        output.push_str(&"Converting...".yellow().to_string());
    } else if state.target_text.is_empty() {
        output.push_str(&TARGET_PLACEHOLDER.bright_black().to_string());
    } else {
        output.push_str(&state.target_text.bright_blue().to_string());
    }
    output
}

/// The dismissible error overlay.
pub fn error_overlay(message: &str) -> String {
    format!(
        "{}\n{}\n{}",
        "Translation Error".red().bold(),
        message.red(),
        "Type /dismiss to close.".bright_black()
    )
}

pub fn insights(state: &SessionState) -> String {
    let mut output = header("Migration Insights", "");
    if state.is_explaining {
        output.push_str(&INSIGHTS_LOADING.yellow().to_string());
    } else if let Some(explanation) = &state.explanation {
        output.push_str(explanation);
    } else {
        output.push_str(&INSIGHTS_PROMPT.bright_black().to_string());
    }
    output
}

pub fn kinds(selected: MigrationKind) -> String {
    MigrationKind::all()
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            let marker = if *kind == selected { "*" } else { " " };
            let entry = format!("{marker} {}. {} ({})", index + 1, kind.label(), kind.identifier());
            if *kind == selected {
                format!("{}\n", entry.green())
            } else {
                format!("{entry}\n")
            }
        })
        .collect()
}

pub fn history(items: &[HistoryItem]) -> String {
    if items.is_empty() {
        return format!("{}\n", "No conversions yet.".bright_black());
    }

    items
        .iter()
        .rev()
        .map(|item| {
            let time = Local
                .timestamp_millis_opt(item.timestamp)
                .single()
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--:--:--".to_string());
            format!(
                "{} {:<12} {}\n",
                time.bright_black(),
                item.kind.identifier(),
                item.snippet.replace('\n', " ")
            )
        })
        .collect()
}

pub fn status(state: &SessionState, verbose: bool) -> String {
    let phase = match state.phase() {
        UiPhase::Idle => "idle",
        UiPhase::Translating => "converting",
        UiPhase::Failed => "translation failed",
        UiPhase::Succeeded => "converted",
        UiPhase::Explaining => "analyzing",
        UiPhase::ExplanationReady => "insights ready",
    };
    let phase = if state.phase().is_busy() {
        format!("{phase} (waiting for the model)")
    } else {
        phase.to_string()
    };
    format!(
        "state: {phase}\nkind: {} ({})\nsource: {}\ntarget: {}\nverbose: {}",
        state.migration_kind.label(),
        state.migration_kind.identifier(),
        line_count(&state.source_text),
        line_count(&state.target_text),
        if verbose { "on" } else { "off" },
    )
}

pub fn activity(event: &ActivityEvent) -> String {
    let line = format!("[{}] {} {}", event.level, event.target, event.message);
    match event.level.as_str() {
        "ERROR" => line.red().to_string(),
        "WARN" => line.yellow().to_string(),
        _ => line.bright_black().to_string(),
    }
}

pub fn help() -> String {
    [
        ("/convert", "Convert the source to PostgreSQL"),
        ("/explain", "Refresh Analysis: generate migration insights"),
        ("/kind [name|n]", "Show or select the migration kind"),
        ("/kinds", "List migration kinds"),
        ("/paste", "Enter source over several lines, finish with /end"),
        ("/load <file>", "Read the source from a file"),
        ("/clear", "Clear the source"),
        ("/source", "Show the source panel"),
        ("/target", "Show the target panel"),
        ("/copy", "Copy the PostgreSQL code to the clipboard"),
        ("/dismiss", "Close the translation error"),
        ("/history", "List conversions of this session"),
        ("/status", "Show session state"),
        ("/verbose", "Toggle request activity output"),
        ("quit", "Exit"),
    ]
    .iter()
    .map(|(command, description)| format!("  {:<16} {}\n", command.bright_cyan(), description))
    .collect()
}
