//! Supported Gemini model versions and update procedures.
//!
//! # Models in use (as of 2026-10-19)
//!
//! | Model ID | Used for | Notes |
//! |----------|----------|-------|
//! | `gemini-3-pro-preview` | Translation (default) | Sent with a 2048 token thinking budget and `text/plain` output |
//! | `gemini-2.5-flash` | Migration insights (default) | Fast, no special configuration |
//! | `gemini-2.5-pro` | Translation (alternative) | Stable, production-ready |
//! | `gemini-2.5-flash-lite` | Insights (alternative) | Lightest option |
//!
//! Reference: <https://ai.google.dev/gemini-api/docs/models>
//!
//! # How to Add or Update Model Versions
//!
//! 1. **Default constants** (`ora2pg-core/src/config.rs`)
//!    - `DEFAULT_TRANSLATION_MODEL`
//!    - `DEFAULT_EXPLANATION_MODEL`
//! 2. **This table**
//!
//! Users can override either model in `config.toml`:
//!
//! ```toml
//! [translation]
//! model_name = "gemini-2.5-pro"
//! thinking_budget = 2048
//!
//! [explanation]
//! model_name = "gemini-2.5-flash-lite"
//! ```
//!
//! Models without thinking support reject a thinking budget; set
//! `thinking_budget = 0` to omit the hint.

use ora2pg_core::config::{DEFAULT_EXPLANATION_MODEL, DEFAULT_TRANSLATION_MODEL};

/// Model IDs documented above, defaults first.
pub const KNOWN_GEMINI_MODELS: &[&str] = &[
    DEFAULT_TRANSLATION_MODEL,
    DEFAULT_EXPLANATION_MODEL,
    "gemini-2.5-pro",
    "gemini-2.5-flash-lite",
];

/// Whether `model` is one of the documented model IDs.
pub fn is_known_model(model: &str) -> bool {
    KNOWN_GEMINI_MODELS.contains(&model)
}
