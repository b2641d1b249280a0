//! Outbound integration with the hosted text-generation service.

pub mod gemini_api_client;
pub mod supported_models;

use std::sync::Arc;

use ora2pg_core::config::AppConfig;
use ora2pg_core::generator::TextGenerator;
use ora2pg_core::secret::SecretService;

pub use gemini_api_client::GeminiApiClient;

/// Builds the Gemini client once for injection into the orchestrators.
///
/// A missing API key is tolerated; the service rejects the requests and the
/// failure surfaces as a generic translation error.
pub async fn connect_gemini(
    config: &AppConfig,
    secrets: &dyn SecretService,
) -> Arc<dyn TextGenerator> {
    for model in [&config.translation.model_name, &config.explanation.model_name] {
        if !supported_models::is_known_model(model) {
            tracing::warn!("[Interaction] Model '{}' is not in the supported list", model);
        }
    }

    let api_key = secrets.gemini_api_key().await.unwrap_or_default();
    Arc::new(GeminiApiClient::new(api_key).with_base_url(config.gemini.base_url.clone()))
}
