//! Background execution of orchestrator runs.
//!
//! Jobs run as independent tokio tasks; their outcomes come back over a
//! channel to whoever owns the session state.

use std::sync::Arc;

use ora2pg_application::MigrationService;
use ora2pg_core::session::{ExplanationJob, JobOutcome, TranslationJob};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawns translation and explanation jobs without blocking the caller.
///
/// There is no cancellation: a spawned job always runs to completion.
pub struct JobExecutor {
    service: Arc<MigrationService>,
    sender: mpsc::UnboundedSender<JobOutcome>,
}

impl JobExecutor {
    /// Returns the executor and the receiver its outcomes arrive on.
    pub fn new(service: Arc<MigrationService>) -> (Self, mpsc::UnboundedReceiver<JobOutcome>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { service, sender }, receiver)
    }

    pub fn spawn_translation(&self, job: TranslationJob) -> JoinHandle<()> {
        let service = self.service.clone();
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let result = service.translate(&job).await;
            if sender.send(JobOutcome::Translation(result)).is_err() {
                tracing::debug!("[JobExecutor] Session closed before translation finished");
            }
        })
    }

    pub fn spawn_explanation(&self, job: ExplanationJob) -> JoinHandle<()> {
        let service = self.service.clone();
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let text = service.explain(&job).await;
            if sender.send(JobOutcome::Explanation(text)).is_err() {
                tracing::debug!("[JobExecutor] Session closed before explanation finished");
            }
        })
    }
}
