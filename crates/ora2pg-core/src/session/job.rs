//! Guarded snapshots of orchestrator inputs.
//!
//! A job can only be built from usable input, so an orchestrator never sees
//! an empty request.

use crate::error::MigrationError;
use crate::migration_kind::MigrationKind;

/// Inputs of one translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    source: String,
    kind: MigrationKind,
}

impl TranslationJob {
    /// Returns `None` when the source is blank after trimming.
    pub fn new(source: impl Into<String>, kind: MigrationKind) -> Option<Self> {
        let source = source.into();
        if source.trim().is_empty() {
            return None;
        }
        Some(Self { source, kind })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> MigrationKind {
        self.kind
    }
}

/// Inputs of one explanation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationJob {
    source: String,
    target: String,
}

impl ExplanationJob {
    /// Returns `None` when either side is empty.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Option<Self> {
        let source = source.into();
        let target = target.into();
        if source.is_empty() || target.is_empty() {
            return None;
        }
        Some(Self { source, target })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Result of a finished background job, applied back onto the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Translation(Result<String, MigrationError>),
    Explanation(String),
}
