//! Loads `config.toml`.

use std::path::Path;

use ora2pg_core::MigrationError;
use ora2pg_core::config::AppConfig;

use crate::paths::AppPaths;

/// Reads the application configuration from the config directory.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    paths: AppPaths,
}

impl ConfigService {
    pub fn new(paths: AppPaths) -> Self {
        Self { paths }
    }

    /// Loads the configuration, falling back to defaults when no file exists.
    pub fn load(&self) -> Result<AppConfig, MigrationError> {
        match self.paths.config_file() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::debug!("[ConfigService] {}; using defaults", e);
                Ok(AppConfig::default())
            }
        }
    }

    /// Loads the configuration from an explicit file.
    ///
    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> Result<AppConfig, MigrationError> {
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {}; using defaults",
                path.display()
            );
            return Ok(AppConfig::default());
        }
        if path.is_dir() {
            return Err(MigrationError::config(format!(
                "{} is a directory, expected config.toml",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        tracing::info!("[ConfigService] Loaded config from {}", path.display());
        Ok(config)
    }
}
