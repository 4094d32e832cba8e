//! In-memory preference state.

use sesame_types::Locale;

/// User-facing settings unrelated to authorization.
///
/// `restored` records whether this value was hydrated from storage. It is
/// runtime-only: the persisted shape is
/// [`PersistedPreferences`](super::PersistedPreferences), which has no such
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceState {
    pub sidebar_open: bool,
    pub locale: Locale,
    pub restored: bool,
}

impl PreferenceState {
    /// Default preferences with the given starting locale.
    #[must_use]
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }
}

impl Default for PreferenceState {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            locale: Locale::FALLBACK,
            restored: false,
        }
    }
}
