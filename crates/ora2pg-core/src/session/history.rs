//! Session-scoped conversion history.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::migration_kind::MigrationKind;

/// Characters of source text kept in a history snippet.
pub const SNIPPET_CHARS: usize = 80;

/// A completed conversion, kept in memory for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: MigrationKind,
    /// Leading part of the source text
    pub snippet: String,
}

impl HistoryItem {
    pub fn new(kind: MigrationKind, source: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            kind,
            snippet: source.trim().chars().take(SNIPPET_CHARS).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_is_truncated() {
        let source = "x".repeat(200);
        let item = HistoryItem::new(MigrationKind::Query, &source);
        assert_eq!(item.snippet.chars().count(), SNIPPET_CHARS);
        assert_eq!(item.kind, MigrationKind::Query);
        assert!(item.timestamp > 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = HistoryItem::new(MigrationKind::Schema, "CREATE TABLE t (id NUMBER);");
        let b = HistoryItem::new(MigrationKind::Schema, "CREATE TABLE t (id NUMBER);");
        assert_ne!(a.id, b.id);
    }
}
