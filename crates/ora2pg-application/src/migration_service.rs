//! Migration Service
//!
//! The two orchestrators: translation of Oracle code into PostgreSQL and the
//! lighter "migration insights" comparison. Each builds a prompt, calls the
//! injected [`TextGenerator`] once and normalizes the reply.

use std::sync::Arc;

use ora2pg_core::config::AppConfig;
use ora2pg_core::error::MigrationError;
use ora2pg_core::generator::{GenerationError, GenerationRequest, TextGenerator};
use ora2pg_core::session::{ExplanationJob, HistoryItem, SessionState, TranslationJob};
use ora2pg_core::MigrationKind;

use crate::code_fence::strip_code_fences;
use crate::prompt::{SYSTEM_INSTRUCTION, render_explanation_prompt, render_translation_prompt};

/// Shown in the insights region when the comparison call fails.
pub const EXPLANATION_FAILED_MESSAGE: &str = "Could not generate explanation.";
/// Shown in the insights region when the model returns no text.
pub const EMPTY_EXPLANATION_MESSAGE: &str = "No explanation available.";

/// Model identifiers and generation hints for both call shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub translation_model: String,
    /// `None` omits the thinking hint.
    pub thinking_budget: Option<u32>,
    pub response_mime_type: Option<String>,
    pub explanation_model: String,
}

impl ModelSettings {
    /// A zero budget or an empty MIME type in the config omits that hint.
    pub fn from_config(config: &AppConfig) -> Self {
        let translation = &config.translation;
        Self {
            translation_model: translation.model_name.clone(),
            thinking_budget: (translation.thinking_budget > 0).then_some(translation.thinking_budget),
            response_mime_type: (!translation.response_mime_type.is_empty())
                .then(|| translation.response_mime_type.clone()),
            explanation_model: config.explanation.model_name.clone(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Runs the translation and explanation requests against the hosted model.
pub struct MigrationService {
    generator: Arc<dyn TextGenerator>,
    settings: ModelSettings,
}

impl MigrationService {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: ModelSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    /// Translates the job's Oracle code into PostgreSQL.
    ///
    /// Every failure is logged and reported as
    /// [`MigrationError::TranslationFailed`]. No retry is attempted.
    pub async fn translate(&self, job: &TranslationJob) -> Result<String, MigrationError> {
        tracing::info!(
            "[MigrationService] Translating {} ({} chars)",
            job.kind(),
            job.source().chars().count()
        );

        match self.request_translation(job).await {
            Ok(text) => {
                let code = strip_code_fences(&text);
                if code.is_empty() {
                    tracing::error!("[MigrationService] Migration failed: reply has no code");
                    return Err(MigrationError::TranslationFailed);
                }
                tracing::info!("[MigrationService] Translation finished ({} chars)", code.chars().count());
                Ok(code)
            }
            Err(err) => {
                tracing::error!("[MigrationService] Migration failed: {}", err);
                Err(MigrationError::TranslationFailed)
            }
        }
    }

    /// Summarizes the differences between source and translated code.
    ///
    /// Never fails: errors become [`EXPLANATION_FAILED_MESSAGE`].
    pub async fn explain(&self, job: &ExplanationJob) -> String {
        tracing::info!("[MigrationService] Generating migration insights");

        let prompt = match render_explanation_prompt(job.source(), job.target()) {
            Ok(prompt) => prompt,
            Err(err) => {
                tracing::debug!("[MigrationService] Explanation prompt failed: {}", err);
                return EXPLANATION_FAILED_MESSAGE.to_string();
            }
        };

        let request = GenerationRequest::new(&self.settings.explanation_model, prompt);
        match self.generator.generate(request).await {
            Ok(text) if text.is_empty() => EMPTY_EXPLANATION_MESSAGE.to_string(),
            Ok(text) => text,
            Err(GenerationError::EmptyResponse) => EMPTY_EXPLANATION_MESSAGE.to_string(),
            Err(err) => {
                tracing::debug!("[MigrationService] Explanation failed: {}", err);
                EXPLANATION_FAILED_MESSAGE.to_string()
            }
        }
    }

    async fn request_translation(&self, job: &TranslationJob) -> Result<String, String> {
        let prompt = render_translation_prompt(job.kind(), job.source()).map_err(|e| e.to_string())?;

        let mut request = GenerationRequest::new(&self.settings.translation_model, prompt)
            .with_system_instruction(SYSTEM_INSTRUCTION);
        if let Some(budget) = self.settings.thinking_budget {
            request = request.with_thinking_budget(budget);
        }
        if let Some(mime_type) = &self.settings.response_mime_type {
            request = request.with_response_mime_type(mime_type);
        }

        self.generator.generate(request).await.map_err(|e| e.to_string())
    }
}

/// A session driven step by step: each action awaits its request before
/// returning.
pub struct MigrationSession {
    state: SessionState,
    service: Arc<MigrationService>,
    history: Vec<HistoryItem>,
}

impl MigrationSession {
    /// Starts from the default Oracle sample.
    pub fn new(service: Arc<MigrationService>) -> Self {
        Self::with_state(SessionState::new(), service)
    }

    pub fn with_state(state: SessionState, service: Arc<MigrationService>) -> Self {
        Self {
            state,
            service,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Completed conversions, oldest first.
    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.state.set_source(source);
    }

    pub fn clear_source(&mut self) {
        self.state.clear_source();
    }

    pub fn select_kind(&mut self, kind: MigrationKind) {
        self.state.select_kind(kind);
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    /// Runs one translation. Returns `false` when nothing was sent.
    pub async fn translate(&mut self) -> bool {
        let Some(job) = self.state.begin_translation() else {
            return false;
        };

        let result = self.service.translate(&job).await;
        if result.is_ok() {
            self.history.push(HistoryItem::new(job.kind(), job.source()));
        }
        self.state.complete_translation(result);
        true
    }

    /// Refreshes the migration insights. Returns `false` when nothing was sent.
    pub async fn explain(&mut self) -> bool {
        let Some(job) = self.state.begin_explanation() else {
            return false;
        };

        let text = self.service.explain(&job).await;
        self.state.complete_explanation(text);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ora2pg_core::config::TranslationModelConfig;

    #[test]
    fn test_settings_from_default_config() {
        let settings = ModelSettings::default();
        assert_eq!(settings.translation_model, "gemini-3-pro-preview");
        assert_eq!(settings.thinking_budget, Some(2048));
        assert_eq!(settings.response_mime_type.as_deref(), Some("text/plain"));
        assert_eq!(settings.explanation_model, "gemini-2.5-flash");
    }

    #[test]
    fn test_zero_budget_omits_thinking_hint() {
        let config = AppConfig {
            translation: TranslationModelConfig {
                model_name: "gemini-2.5-flash-lite".to_string(),
                thinking_budget: 0,
                response_mime_type: String::new(),
            },
            ..AppConfig::default()
        };

        let settings = ModelSettings::from_config(&config);
        assert_eq!(settings.thinking_budget, None);
        assert_eq!(settings.response_mime_type, None);
    }
}
