//! Error types for the Ora2PG-Web application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown in the error overlay whenever a translation fails.
///
/// Network, authentication and malformed-response failures all collapse into
/// this one message.
pub const TRANSLATION_FAILED_MESSAGE: &str =
    "Failed to translate code. Please check the input and try again.";

/// A shared error type for the entire application.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MigrationError {
    /// The translation request failed for any reason.
    #[error("{}", TRANSLATION_FAILED_MESSAGE)]
    TranslationFailed,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Prompt template could not be rendered
    #[error("Prompt rendering error: {0}")]
    Prompt(String),

    /// Copying output to the clipboard failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl MigrationError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt(message.into())
    }

    /// Check if this is the generic translation failure
    pub fn is_translation_failure(&self) -> bool {
        matches!(self, Self::TranslationFailed)
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<std::io::Error> for MigrationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MigrationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MigrationError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MigrationError>`.
pub type Result<T> = std::result::Result<T, MigrationError>;
