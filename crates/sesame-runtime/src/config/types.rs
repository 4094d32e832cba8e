//! Configuration types.
//!
//! All types implement [`Default`]; every field is optional in a file.

use sesame_auth::DEFAULT_LOGIN_PATH;
use sesame_types::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which front-end application this client core serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    /// Administrative console (staff accounts).
    #[default]
    Admin,
    /// End-user application.
    User,
}

impl AppKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Storage key used when `storage.key` is not set.
    #[must_use]
    pub fn default_storage_key(self) -> &'static str {
        match self {
            Self::Admin => "admin-preferences",
            Self::User => "user-preferences",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(format!("expected 'admin' or 'user', got '{other}'")),
        }
    }
}

/// Main configuration structure, after all layers are merged.
///
/// # Example
///
/// ```
/// use sesame_runtime::config::{AppKind, SesameConfig};
///
/// let config = SesameConfig::from_toml(r#"
/// app = "user"
///
/// [guard]
/// login_path = "/auth"
/// "#).unwrap();
///
/// assert_eq!(config.app, AppKind::User);
/// assert_eq!(config.guard.login_path, "/auth");
/// assert_eq!(config.storage_key(), "user-preferences");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SesameConfig {
    pub app: AppKind,
    pub guard: GuardConfig,
    pub storage: StorageConfig,
    pub vocabulary: VocabularyConfig,
    pub preferences: PreferencesConfig,
}

impl SesameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Preference storage key: `storage.key`, or the app's default.
    #[must_use]
    pub fn storage_key(&self) -> String {
        self.storage
            .key
            .clone()
            .unwrap_or_else(|| self.app.default_storage_key().to_string())
    }

    /// Applies the values a config file actually sets.
    ///
    /// Keys absent from the file leave the current value untouched; keys
    /// present win even when they equal the default.
    pub fn merge(&mut self, layer: &ConfigLayer) {
        if let Some(app) = layer.app {
            self.app = app;
        }
        if let Some(ref path) = layer.guard.login_path {
            self.guard.login_path.clone_from(path);
        }
        self.storage.merge(&layer.storage);
        self.vocabulary.merge(&layer.vocabulary);
        if let Some(locale) = layer.preferences.default_locale {
            self.preferences.default_locale = locale;
        }
    }
}

/// One config file as written, before merging.
///
/// Every field is optional so that "not set" and "set to the default"
/// stay distinguishable.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigLayer {
    pub app: Option<AppKind>,
    pub guard: GuardLayer,
    pub storage: StorageConfig,
    pub vocabulary: VocabularyConfig,
    pub preferences: PreferencesLayer,
}

impl ConfigLayer {
    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// `[guard]` section of a [`ConfigLayer`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuardLayer {
    pub login_path: Option<String>,
}

/// `[preferences]` section of a [`ConfigLayer`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreferencesLayer {
    pub default_locale: Option<Locale>,
}

/// Route guard settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuardConfig {
    /// Anonymous-only destination for redirects.
    pub login_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

/// Preference storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding preference files (default `~/.sesame/preferences`).
    pub dir: Option<PathBuf>,

    /// Key the preference envelope is stored under.
    pub key: Option<String>,
}

impl StorageConfig {
    /// Returns `dir` or the default under the global config directory.
    #[must_use]
    pub fn dir_or_default(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| super::default_config_dir().join("preferences"))
    }

    fn merge(&mut self, other: &Self) {
        if other.dir.is_some() {
            self.dir.clone_from(&other.dir);
        }
        if other.key.is_some() {
            self.key.clone_from(&other.key);
        }
    }
}

/// Permission vocabulary source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VocabularyConfig {
    /// JSON or TOML file exported by the schema package.
    pub path: Option<PathBuf>,
}

impl VocabularyConfig {
    fn merge(&mut self, other: &Self) {
        if other.path.is_some() {
            self.path.clone_from(&other.path);
        }
    }
}

/// Preference defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Locale used when nothing has been persisted yet.
    pub default_locale: Locale,
}
