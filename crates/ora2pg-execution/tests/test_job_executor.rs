use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ora2pg_application::{EXPLANATION_FAILED_MESSAGE, MigrationService, ModelSettings};
use ora2pg_core::generator::{GenerationError, GenerationRequest, TextGenerator};
use ora2pg_core::session::{JobOutcome, SessionState, UiPhase};
use ora2pg_execution::JobExecutor;
use tokio::sync::Notify;

/// Answers translation calls with fenced SQL, explanation calls with an error.
/// Waits for a release signal when gated.
struct GatedGenerator {
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if request.system_instruction.is_some() {
            Ok("```sql\nSELECT 1;\n```".to_string())
        } else {
            Err(GenerationError::Transport {
                message: "connection reset".to_string(),
                is_retryable: true,
            })
        }
    }
}

fn executor(gate: Option<Arc<Notify>>) -> (JobExecutor, tokio::sync::mpsc::UnboundedReceiver<JobOutcome>) {
    let service = MigrationService::new(Arc::new(GatedGenerator { gate }), ModelSettings::default());
    JobExecutor::new(Arc::new(service))
}

#[tokio::test]
async fn test_translation_outcome_is_applied_by_owner() {
    let (executor, mut outcomes) = executor(None);
    let mut state = SessionState::new();

    let job = state.begin_translation().expect("default source is usable");
    executor.spawn_translation(job);

    let outcome = outcomes.recv().await.expect("Should deliver an outcome");
    assert_eq!(outcome, JobOutcome::Translation(Ok("SELECT 1;".to_string())));

    state.apply(outcome);
    assert_eq!(state.phase(), UiPhase::Succeeded);
    assert_eq!(state.target_text, "SELECT 1;");
}

#[tokio::test]
async fn test_explanation_failure_arrives_as_fallback_text() {
    let (executor, mut outcomes) = executor(None);
    let mut state = SessionState::new();
    state.begin_translation().unwrap();
    state.complete_translation(Ok("SELECT 1;".to_string()));

    let job = state.begin_explanation().expect("explanation is enabled");
    executor.spawn_explanation(job).await.unwrap();

    let outcome = outcomes.recv().await.unwrap();
    state.apply(outcome);
    assert_eq!(state.explanation.as_deref(), Some(EXPLANATION_FAILED_MESSAGE));
    assert!(state.error_message.is_none());
}

#[tokio::test]
async fn test_spawn_does_not_block_caller() {
    let gate = Arc::new(Notify::new());
    let (executor, mut outcomes) = executor(Some(gate.clone()));
    let mut state = SessionState::new();

    let job = state.begin_translation().unwrap();
    let handle = executor.spawn_translation(job);

    // The caller is free while the job waits on the gate
    assert!(state.is_translating);
    assert!(state.begin_translation().is_none());
    assert!(
        tokio::time::timeout(Duration::from_millis(50), outcomes.recv())
            .await
            .is_err()
    );

    gate.notify_one();
    handle.await.unwrap();
    state.apply(outcomes.recv().await.unwrap());
    assert!(!state.is_translating);
}
