//! Unified path management for Ora2PG-Web configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/ora2pg-web/        # Config directory (platform config dir)
//! ├── config.toml              # Model and logging configuration
//! └── secret.json              # API keys
//! ```

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "ora2pg-web";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves configuration file locations.
///
/// An explicit base directory replaces the platform config directory, which
/// tests use to stay inside a temp dir.
#[derive(Debug, Clone, Default)]
pub struct AppPaths {
    base: Option<PathBuf>,
}

impl AppPaths {
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            base: base_path.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory (e.g. `~/.config/ora2pg-web/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to config.toml
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to secret.json
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_is_used() {
        let paths = AppPaths::new(Some(Path::new("/tmp/ora2pg-test")));
        assert_eq!(paths.config_dir().unwrap(), PathBuf::from("/tmp/ora2pg-test"));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/ora2pg-test/config.toml")
        );
        assert_eq!(
            paths.secret_file().unwrap(),
            PathBuf::from("/tmp/ora2pg-test/secret.json")
        );
    }

    #[test]
    fn test_default_dir_ends_with_app_name() {
        // Only meaningful where the platform exposes a config dir
        if let Ok(dir) = AppPaths::default().config_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }
}
