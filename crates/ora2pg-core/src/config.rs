//! Application configuration models.
//!
//! Loaded from `config.toml`; every field has a default so a missing or
//! partial file is valid.

use serde::{Deserialize, Serialize};

/// Model used for translations.
pub const DEFAULT_TRANSLATION_MODEL: &str = "gemini-3-pro-preview";
/// Lighter model used for migration insights.
pub const DEFAULT_EXPLANATION_MODEL: &str = "gemini-2.5-flash";
/// Thinking tokens allotted to translation requests.
pub const DEFAULT_THINKING_BUDGET: u32 = 2048;
pub const DEFAULT_RESPONSE_MIME_TYPE: &str = "text/plain";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub gemini: GeminiEndpointConfig,
    #[serde(default)]
    pub translation: TranslationModelConfig,
    #[serde(default)]
    pub explanation: ExplanationModelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GeminiEndpointConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GeminiEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TranslationModelConfig {
    #[serde(default = "default_translation_model")]
    pub model_name: String,
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,
    #[serde(default = "default_response_mime_type")]
    pub response_mime_type: String,
}

impl Default for TranslationModelConfig {
    fn default() -> Self {
        Self {
            model_name: default_translation_model(),
            thinking_budget: default_thinking_budget(),
            response_mime_type: default_response_mime_type(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ExplanationModelConfig {
    #[serde(default = "default_explanation_model")]
    pub model_name: String,
}

impl Default for ExplanationModelConfig {
    fn default() -> Self {
        Self {
            model_name: default_explanation_model(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive for the `ora2pg` CLI when `ORA2PG_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_translation_model() -> String {
    DEFAULT_TRANSLATION_MODEL.to_string()
}

fn default_thinking_budget() -> u32 {
    DEFAULT_THINKING_BUDGET
}

fn default_response_mime_type() -> String {
    DEFAULT_RESPONSE_MIME_TYPE.to_string()
}

fn default_explanation_model() -> String {
    DEFAULT_EXPLANATION_MODEL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Root structure of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiSecret>,
}

/// Gemini API credentials
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiSecret {
    pub api_key: String,
}
