//! Configuration management with hierarchical layering.
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌─────────────────────────────────────────────┐
//! │  1. Environment Variables (SESAME_*)        │
//! ├─────────────────────────────────────────────┤
//! │  2. Project Config (.sesame/config.toml)    │
//! ├─────────────────────────────────────────────┤
//! │  3. Global Config (~/.sesame/config.toml)   │
//! ├─────────────────────────────────────────────┤
//! │  4. Default Values                          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `SESAME_APP` | `app` | `admin` \| `user` |
//! | `SESAME_LOGIN_PATH` | `guard.login_path` | String |
//! | `SESAME_STORAGE_DIR` | `storage.dir` | PathBuf |
//! | `SESAME_VOCABULARY` | `vocabulary.path` | PathBuf |
//! | `SESAME_DEFAULT_LOCALE` | `preferences.default_locale` | `uz` \| `ru` \| `en` |
//!
//! # Example Configuration
//!
//! ```toml
//! app = "admin"
//!
//! [guard]
//! login_path = "/login"
//!
//! [storage]
//! dir = "~/.sesame/preferences"
//! # key defaults to "admin-preferences" / "user-preferences"
//!
//! [vocabulary]
//! path = "schema/permissions.json"
//!
//! [preferences]
//! default_locale = "uz"
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::{ConfigResolver, NoOpResolver};
pub use types::{
    AppKind, ConfigLayer, GuardConfig, GuardLayer, PreferencesConfig, PreferencesLayer,
    SesameConfig, StorageConfig, VocabularyConfig,
};

/// Default global config directory.
#[must_use]
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".sesame")
}

/// Default global config file path.
#[must_use]
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".sesame";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
