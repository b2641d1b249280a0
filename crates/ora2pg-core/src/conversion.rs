//! Serializable summary of a single conversion.

use serde::{Deserialize, Serialize};

use crate::session::SessionState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub postgres_code: String,
    /// Migration insights, when requested
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionResult {
    /// Captures the outcome of the last translation in `state`.
    pub fn from_session(state: &SessionState) -> Self {
        Self {
            postgres_code: state.target_text.clone(),
            notes: state.explanation.iter().cloned().collect(),
            error: state.error_message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MigrationError;

    #[test]
    fn test_failed_session_serializes_error() {
        let mut state = SessionState::new();
        state.begin_translation().unwrap();
        state.complete_translation(Err(MigrationError::TranslationFailed));

        let result = ConversionResult::from_session(&state);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["postgresCode"], "");
        assert_eq!(
            json["error"],
            "Failed to translate code. Please check the input and try again."
        );
        assert!(json["notes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_successful_session_omits_error() {
        let mut state = SessionState::new();
        state.begin_translation().unwrap();
        state.complete_translation(Ok("CREATE SEQUENCE emp_seq;".into()));
        state.begin_explanation().unwrap();
        state.complete_explanation("- NUMBER(6) became INTEGER".into());

        let result = ConversionResult::from_session(&state);
        let json = serde_json::to_string(&result).unwrap();

        assert!(!json.contains("\"error\""));
        assert_eq!(result.notes, vec!["- NUMBER(6) became INTEGER".to_string()]);
    }
}
