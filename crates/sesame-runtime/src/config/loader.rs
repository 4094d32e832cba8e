//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Global config (`~/.sesame/config.toml`)
//! 3. Project config (`.sesame/config.toml`)
//! 4. Environment variables (`SESAME_*`)
//!
//! Each layer overrides the previous for the keys it sets.

use super::{
    default_config_path, AppKind, ConfigError, ConfigLayer, SesameConfig, PROJECT_CONFIG_DIR,
    PROJECT_CONFIG_FILE,
};
use sesame_types::Locale;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use sesame_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_project_root("/path/to/project")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), sesame_runtime::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    global_config_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Project config is read from `<project_root>/.sesame/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be read
    /// or parsed, or if an environment variable holds an invalid value.
    /// Missing files are skipped.
    pub fn load(&self) -> Result<SesameConfig, ConfigError> {
        let mut config = SesameConfig::default();

        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global_config) = load_file(&global_path)? {
                debug!(path = %global_path.display(), "Loaded global config");
                config.merge(&global_config);
            }
        }

        if !self.skip_project {
            if let Some(ref project_root) = self.project_root {
                let project_config_path = project_root
                    .join(PROJECT_CONFIG_DIR)
                    .join(PROJECT_CONFIG_FILE);

                if let Some(project_config) = load_file(&project_config_path)? {
                    debug!(path = %project_config_path.display(), "Loaded project config");
                    config.merge(&project_config);
                }
            }
        }

        if !self.skip_env {
            apply_env_vars(&mut config)?;
        }

        Ok(config)
    }
}

fn load_file(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let layer = ConfigLayer::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

    Ok(Some(layer))
}

fn apply_env_vars(config: &mut SesameConfig) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var("SESAME_APP") {
        config.app = val
            .parse::<AppKind>()
            .map_err(|msg| ConfigError::invalid_env_var("SESAME_APP", msg))?;
    }

    if let Ok(val) = std::env::var("SESAME_DEFAULT_LOCALE") {
        config.preferences.default_locale = val
            .parse::<Locale>()
            .map_err(|e| ConfigError::invalid_env_var("SESAME_DEFAULT_LOCALE", e.to_string()))?;
    }

    if let Ok(val) = std::env::var("SESAME_LOGIN_PATH") {
        config.guard.login_path = val;
    }

    if let Ok(val) = std::env::var("SESAME_STORAGE_DIR") {
        config.storage.dir = Some(PathBuf::from(val));
    }

    if let Ok(val) = std::env::var("SESAME_VOCABULARY") {
        config.vocabulary.path = Some(PathBuf::from(val));
    }

    Ok(())
}
