//! Migration kind domain model.
//!
//! Describes the category of Oracle code handed to the model. The kind is
//! forwarded verbatim as prompt context and does not change request behavior.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Category of the source code being migrated.
#[derive(
    Deserialize,
    Serialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum MigrationKind {
    /// Table and schema DDL
    #[default]
    Schema,
    /// Stored procedures and functions
    Function,
    /// Ad-hoc SQL queries
    Query,
    /// Complete PL/SQL packages
    FullPackage,
}

impl MigrationKind {
    /// Identifier interpolated into the translation prompt (e.g. `FULL_PACKAGE`).
    pub fn identifier(&self) -> &str {
        self.as_ref()
    }

    /// Human-readable label shown in the kind selector.
    pub fn label(&self) -> &'static str {
        match self {
            MigrationKind::Schema => "Table/Schema DDL",
            MigrationKind::Function => "Stored Procedure/Function",
            MigrationKind::Query => "Ad-hoc SQL Query",
            MigrationKind::FullPackage => "Full Package (PL/SQL)",
        }
    }

    /// All kinds in selector order.
    pub fn all() -> Vec<MigrationKind> {
        MigrationKind::iter().collect()
    }
}
