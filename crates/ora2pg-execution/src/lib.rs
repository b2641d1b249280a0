//! Execution layer: background jobs and tracing setup.

pub mod job_executor;
pub mod tracing_layer;

pub use job_executor::JobExecutor;
pub use tracing_layer::{ActivityEvent, ActivityLayer};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding a filter directive (e.g. `ora2pg=debug`).
pub const LOG_ENV_VAR: &str = "ORA2PG_LOG";

/// How the global subscriber is assembled.
#[derive(Default)]
pub struct TracingOptions {
    /// Stderr filter used when `ORA2PG_LOG` is unset; `"warn"` if empty.
    pub default_level: String,
    /// Write formatted events to stderr.
    pub log_to_stderr: bool,
    /// Forward `INFO` and above to the interactive session, independent of
    /// the stderr filter.
    pub activity: Option<ActivityLayer>,
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init_tracing(options: TracingOptions) -> Result<(), TryInitError> {
    let level = if options.default_level.trim().is_empty() {
        "warn"
    } else {
        options.default_level.as_str()
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = options.log_to_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter)
    });
    let activity_layer = options
        .activity
        .map(|layer| layer.with_filter(LevelFilter::INFO));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(activity_layer)
        .try_init()
}
