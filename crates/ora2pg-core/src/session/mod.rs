//! Migration session: state, jobs, phases and history.

pub mod history;
pub mod job;
pub mod model;
pub mod phase;

pub use history::HistoryItem;
pub use job::{ExplanationJob, JobOutcome, TranslationJob};
pub use model::{DEFAULT_ORACLE_CODE, SessionState};
pub use phase::UiPhase;
