//! Application layer: prompt rendering, reply cleanup and the orchestrators
//! that talk to the hosted model.

pub mod code_fence;
pub mod migration_service;
pub mod prompt;

pub use code_fence::strip_code_fences;
pub use migration_service::{
    EMPTY_EXPLANATION_MESSAGE, EXPLANATION_FAILED_MESSAGE, MigrationService, MigrationSession,
    ModelSettings,
};
