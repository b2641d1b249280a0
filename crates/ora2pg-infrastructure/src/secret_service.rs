//! API key resolution.
//!
//! Sources, first match wins:
//! 1. `API_KEY` environment variable
//! 2. `GEMINI_API_KEY` environment variable
//! 3. `gemini.api_key` in `secret.json`

use std::path::Path;
use std::sync::Arc;

use ora2pg_core::config::SecretConfig;
use ora2pg_core::secret::SecretService;

use crate::paths::AppPaths;

/// Environment variables consulted, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["API_KEY", "GEMINI_API_KEY"];

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves the Gemini API key from the environment, then `secret.json`.
#[derive(Clone)]
pub struct EnvSecretService {
    paths: AppPaths,
    env: EnvLookup,
}

impl EnvSecretService {
    pub fn new(paths: AppPaths) -> Self {
        Self {
            paths,
            env: Arc::new(|name| std::env::var(name).ok()),
        }
    }

    /// Replaces the environment lookup.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self
    }

    fn key_from_env(&self) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| (self.env)(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }

    fn key_from_secret_file(&self) -> Option<String> {
        let path = self.paths.secret_file().ok()?;
        let secrets = match load_secret_config(&path) {
            Ok(secrets) => secrets,
            Err(e) => {
                tracing::debug!("[SecretService] {}", e);
                return None;
            }
        };
        secrets
            .gemini
            .map(|gemini| gemini.api_key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

#[async_trait::async_trait]
impl SecretService for EnvSecretService {
    async fn gemini_api_key(&self) -> Option<String> {
        let key = self.key_from_env().or_else(|| self.key_from_secret_file());
        if key.is_none() {
            tracing::warn!("[SecretService] No Gemini API key configured; requests will be rejected");
        }
        key
    }
}

/// Reads `secret.json`. Error messages never contain key material.
pub fn load_secret_config(path: &Path) -> Result<SecretConfig, String> {
    if !path.exists() {
        return Err(format!("Secret file not found at: {}", path.display()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read secret file at {}: {}", path.display(), e))?;

    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse secret file at {}: {}", path.display(), e))
}
