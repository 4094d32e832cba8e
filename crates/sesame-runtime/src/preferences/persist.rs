//! Persistence boundary for preferences.
//!
//! [`project`] picks the persisted fields out of a [`PreferenceState`];
//! [`hydrate`] rebuilds a state from them. Mutation logic never touches
//! these types, so changing what is persisted is a change to this file
//! alone.
//!
//! # Stored document
//!
//! ```json
//! { "version": 1, "state": { "sidebarOpen": true, "locale": "uz" } }
//! ```
//!
//! A document with a different `version`, or one that fails to parse, is
//! treated as absent.

use super::PreferenceState;
use sesame_types::Locale;
use serde::{Deserialize, Serialize};

/// Envelope version written by this build.
pub const PREFERENCES_VERSION: u32 = 1;

/// The persisted subset of [`PreferenceState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersistedPreferences {
    pub sidebar_open: bool,
    pub locale: Locale,
}

/// Versioned wrapper around [`PersistedPreferences`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEnvelope {
    pub version: u32,
    pub state: PersistedPreferences,
}

impl PreferenceEnvelope {
    #[must_use]
    pub fn new(state: PersistedPreferences) -> Self {
        Self {
            version: PREFERENCES_VERSION,
            state,
        }
    }

    /// Serializes to the stored JSON document.
    ///
    /// # Errors
    ///
    /// Returns a serialization error; with the types here this cannot occur
    /// in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a stored document, returning `None` if it is unusable.
    #[must_use]
    pub fn from_json(json: &str) -> Option<PersistedPreferences> {
        match serde_json::from_str::<Self>(json) {
            Ok(env) if env.version == PREFERENCES_VERSION => Some(env.state),
            Ok(env) => {
                tracing::warn!(
                    found = env.version,
                    expected = PREFERENCES_VERSION,
                    "discarding preferences with unsupported version"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable preferences");
                None
            }
        }
    }
}

/// Extracts the persisted fields.
#[must_use]
pub fn project(state: &PreferenceState) -> PersistedPreferences {
    PersistedPreferences {
        sidebar_open: state.sidebar_open,
        locale: state.locale,
    }
}

/// Rebuilds a runtime state from persisted fields.
#[must_use]
pub fn hydrate(persisted: PersistedPreferences) -> PreferenceState {
    PreferenceState {
        sidebar_open: persisted.sidebar_open,
        locale: persisted.locale,
        restored: true,
    }
}
