//! Derived UI phase of a migration session.

use serde::{Deserialize, Serialize};

/// The state the front-end renders.
///
/// `Idle → Translating → {Succeeded, Failed}`; a succeeded session may move to
/// `Explaining → ExplanationReady` any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiPhase {
    /// Nothing has been translated yet.
    Idle,
    /// A translation request is in flight.
    Translating,
    /// The last translation failed and the error overlay is showing.
    Failed,
    /// Target text is available and no insights have been requested.
    Succeeded,
    /// An explanation request is in flight.
    Explaining,
    /// Migration insights are available.
    ExplanationReady,
}

impl UiPhase {
    /// Whether a spinner should be shown.
    pub fn is_busy(&self) -> bool {
        matches!(self, UiPhase::Translating | UiPhase::Explaining)
    }
}
