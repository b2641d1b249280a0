//! Domain layer of Ora2PG-Web.
//!
//! Session state machine, migration kinds, the collaborator trait for the
//! hosted model, configuration models and the shared error type.

pub mod config;
pub mod conversion;
pub mod error;
pub mod generator;
pub mod migration_kind;
pub mod secret;
pub mod session;

pub use conversion::ConversionResult;
pub use error::{MigrationError, Result, TRANSLATION_FAILED_MESSAGE};
pub use generator::{GenerationError, GenerationRequest, TextGenerator};
pub use migration_kind::MigrationKind;
pub use session::{
    DEFAULT_ORACLE_CODE, ExplanationJob, HistoryItem, JobOutcome, SessionState, TranslationJob,
    UiPhase,
};
