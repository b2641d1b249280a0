//! Migration session state.
//!
//! Holds everything the front-end renders. The state is owned by a single
//! event-handling context; background requests hand their results back
//! through [`SessionState::apply`] instead of touching it directly.

use serde::{Deserialize, Serialize};

use super::job::{ExplanationJob, JobOutcome, TranslationJob};
use super::phase::UiPhase;
use crate::error::MigrationError;
use crate::migration_kind::MigrationKind;

/// Source text a new session starts with.
pub const DEFAULT_ORACLE_CODE: &str = r#"CREATE TABLE employees (
    employee_id NUMBER(6),
    first_name VARCHAR2(20),
    last_name VARCHAR2(25) CONSTRAINT emp_last_name_nn NOT NULL,
    email VARCHAR2(25) CONSTRAINT emp_email_nn NOT NULL,
    phone_number VARCHAR2(20),
    hire_date DATE DEFAULT SYSDATE,
    job_id VARCHAR2(10) CONSTRAINT emp_job_nn NOT NULL,
    salary NUMBER(8,2),
    commission_pct NUMBER(2,2),
    manager_id NUMBER(6),
    department_id NUMBER(4),
    CONSTRAINT emp_salary_min CHECK (salary > 0),
    CONSTRAINT emp_email_uk UNIQUE (email)
);

CREATE SEQUENCE emp_seq START WITH 1 INCREMENT BY 1;

CREATE OR REPLACE TRIGGER emp_insert_trg
BEFORE INSERT ON employees
FOR EACH ROW
BEGIN
  SELECT emp_seq.NEXTVAL INTO :new.employee_id FROM dual;
END;
/"#;

/// Ephemeral state of one migration session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub source_text: String,
    pub target_text: String,
    pub migration_kind: MigrationKind,
    pub is_translating: bool,
    pub is_explaining: bool,
    pub explanation: Option<String>,
    pub error_message: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Creates a session seeded with [`DEFAULT_ORACLE_CODE`].
    pub fn new() -> Self {
        Self::with_source(DEFAULT_ORACLE_CODE)
    }

    /// Creates a session with the given source text and defaults elsewhere.
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source_text: source.into(),
            target_text: String::new(),
            migration_kind: MigrationKind::default(),
            is_translating: false,
            is_explaining: false,
            explanation: None,
            error_message: None,
        }
    }

    // ============================================================================
    // Direct user edits
    // ============================================================================

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source_text = source.into();
    }

    /// Empties the source panel. Target text and error state are untouched.
    pub fn clear_source(&mut self) {
        self.source_text.clear();
    }

    pub fn select_kind(&mut self, kind: MigrationKind) {
        self.migration_kind = kind;
    }

    /// Closes the error overlay. Does not retry.
    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    // ============================================================================
    // Translation
    // ============================================================================

    /// Whether the convert control is enabled.
    pub fn can_translate(&self) -> bool {
        !self.is_translating && !self.source_text.trim().is_empty()
    }

    /// Starts a translation.
    ///
    /// Returns `None` without changing anything when the source is blank or a
    /// translation is already in flight. Otherwise marks the session as
    /// translating, clears any previous error and explanation, and returns
    /// the job to run.
    pub fn begin_translation(&mut self) -> Option<TranslationJob> {
        if self.is_translating {
            return None;
        }
        let job = TranslationJob::new(self.source_text.clone(), self.migration_kind)?;

        self.is_translating = true;
        self.error_message = None;
        self.explanation = None;
        Some(job)
    }

    /// Applies the result of a translation.
    ///
    /// On failure the target text keeps its previous value.
    pub fn complete_translation(&mut self, result: Result<String, MigrationError>) {
        self.is_translating = false;
        match result {
            Ok(text) => self.target_text = text,
            Err(err) => self.error_message = Some(err.to_string()),
        }
    }

    // ============================================================================
    // Explanation
    // ============================================================================

    /// Whether the refresh-analysis control is reachable and enabled.
    pub fn can_explain(&self) -> bool {
        !self.is_explaining
            && !self.is_translating
            && self.error_message.is_none()
            && !self.source_text.is_empty()
            && !self.target_text.is_empty()
    }

    /// Starts an explanation, or returns `None` when the control is unavailable.
    pub fn begin_explanation(&mut self) -> Option<ExplanationJob> {
        if !self.can_explain() {
            return None;
        }
        let job = ExplanationJob::new(self.source_text.clone(), self.target_text.clone())?;

        self.is_explaining = true;
        Some(job)
    }

    pub fn complete_explanation(&mut self, text: String) {
        self.is_explaining = false;
        self.explanation = Some(text);
    }

    /// Routes a finished background job to the matching completion.
    pub fn apply(&mut self, outcome: JobOutcome) {
        match outcome {
            JobOutcome::Translation(result) => self.complete_translation(result),
            JobOutcome::Explanation(text) => self.complete_explanation(text),
        }
    }

    pub fn phase(&self) -> UiPhase {
        if self.is_translating {
            UiPhase::Translating
        } else if self.error_message.is_some() {
            UiPhase::Failed
        } else if self.target_text.is_empty() {
            UiPhase::Idle
        } else if self.is_explaining {
            UiPhase::Explaining
        } else if self.explanation.is_some() {
            UiPhase::ExplanationReady
        } else {
            UiPhase::Succeeded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translated_session() -> SessionState {
        let mut state = SessionState::new();
        state.begin_translation().unwrap();
        state.complete_translation(Ok("CREATE TABLE employees ();".to_string()));
        state
    }

    #[test]
    fn test_new_session_is_seeded() {
        let state = SessionState::new();
        assert_eq!(state.source_text, DEFAULT_ORACLE_CODE);
        assert!(state.target_text.is_empty());
        assert_eq!(state.migration_kind, MigrationKind::Schema);
        assert_eq!(state.phase(), UiPhase::Idle);
        assert!(state.can_translate());
        assert!(!state.can_explain());
    }

    #[test]
    fn test_blank_source_leaves_state_unchanged() {
        let mut state = SessionState::with_source("   \n");
        state.error_message = Some("old".into());
        let before = state.clone();

        assert!(state.begin_translation().is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_begin_translation_clears_error_and_explanation() {
        let mut state = translated_session();
        state.complete_explanation("- VARCHAR2 became VARCHAR".into());
        state.error_message = Some("previous failure".into());

        let job = state.begin_translation().unwrap();

        assert_eq!(job.source(), DEFAULT_ORACLE_CODE);
        assert!(state.is_translating);
        assert!(state.error_message.is_none());
        assert!(state.explanation.is_none());
        assert_eq!(state.phase(), UiPhase::Translating);
    }

    #[test]
    fn test_translation_is_not_reentrant() {
        let mut state = SessionState::new();
        assert!(state.begin_translation().is_some());
        assert!(!state.can_translate());
        assert!(state.begin_translation().is_none());
        assert!(state.is_translating);
    }

    #[test]
    fn test_failure_keeps_previous_target() {
        let mut state = translated_session();
        state.begin_translation().unwrap();
        state.complete_translation(Err(MigrationError::TranslationFailed));

        assert_eq!(state.target_text, "CREATE TABLE employees ();");
        assert_eq!(
            state.error_message.as_deref(),
            Some("Failed to translate code. Please check the input and try again.")
        );
        assert!(!state.is_translating);
        assert_eq!(state.phase(), UiPhase::Failed);
        assert!(!state.can_explain());
    }

    #[test]
    fn test_dismiss_error_does_not_retry() {
        let mut state = SessionState::new();
        state.begin_translation().unwrap();
        state.complete_translation(Err(MigrationError::TranslationFailed));

        state.dismiss_error();

        assert!(state.error_message.is_none());
        assert!(!state.is_translating);
        assert_eq!(state.phase(), UiPhase::Idle);
    }

    #[test]
    fn test_clear_source_only_touches_source() {
        let mut state = translated_session();
        state.error_message = Some("boom".into());

        state.clear_source();

        assert!(state.source_text.is_empty());
        assert_eq!(state.target_text, "CREATE TABLE employees ();");
        assert_eq!(state.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_explain_before_translation_is_noop() {
        let mut state = SessionState::new();
        let before = state.clone();
        assert!(state.begin_explanation().is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_explanation_cycle_is_repeatable() {
        let mut state = translated_session();
        assert_eq!(state.phase(), UiPhase::Succeeded);

        for round in 0..2 {
            let job = state.begin_explanation().unwrap();
            assert_eq!(job.target(), "CREATE TABLE employees ();");
            assert_eq!(state.phase(), UiPhase::Explaining);
            assert!(state.begin_explanation().is_none());

            state.apply(JobOutcome::Explanation(format!("round {round}")));
            assert_eq!(state.phase(), UiPhase::ExplanationReady);
            assert_eq!(state.explanation.as_deref(), Some(format!("round {round}").as_str()));
        }
    }

    #[test]
    fn test_apply_routes_translation_outcome() {
        let mut state = SessionState::new();
        state.begin_translation().unwrap();
        state.apply(JobOutcome::Translation(Ok("SELECT 1;".into())));
        assert_eq!(state.target_text, "SELECT 1;");
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_selected_kind_flows_into_job() {
        let mut state = SessionState::with_source("CREATE PACKAGE p AS END;");
        state.select_kind(MigrationKind::FullPackage);
        let job = state.begin_translation().unwrap();
        assert_eq!(job.kind(), MigrationKind::FullPackage);
    }
}
