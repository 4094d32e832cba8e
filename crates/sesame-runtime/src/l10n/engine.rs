//! Localization engine contract.

use sesame_types::{ErrorCode, Locale};
use thiserror::Error;

/// Errors returned by a [`LocalizationEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalizationError {
    /// The engine has not finished initializing.
    #[error("localization engine is not initialized")]
    NotInitialized,

    /// The engine cannot switch to this language.
    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(Locale),

    /// Engine-specific failure.
    #[error("localization backend error: {0}")]
    Backend(String),
}

impl ErrorCode for LocalizationError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "L10N_NOT_INITIALIZED",
            Self::UnsupportedLanguage(_) => "L10N_UNSUPPORTED_LANGUAGE",
            Self::Backend(_) => "L10N_BACKEND",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnsupportedLanguage(_))
    }
}

/// The operations the locale synchronizer needs from a translation
/// subsystem.
///
/// Methods take `&self`; engines are shared and use interior mutability.
pub trait LocalizationEngine: Send + Sync {
    /// Currently active language, if one has been set.
    fn active_language(&self) -> Option<Locale>;

    /// Switches the active language.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizationError::NotInitialized`] before the engine is
    /// ready, or another variant if the switch is refused.
    fn set_active_language(&self, locale: Locale) -> Result<(), LocalizationError>;

    /// Returns `true` if translations for `namespace` are loaded for `locale`.
    fn has_resource_bundle(&self, locale: Locale, namespace: &str) -> bool;

    fn is_initialized(&self) -> bool;
}
