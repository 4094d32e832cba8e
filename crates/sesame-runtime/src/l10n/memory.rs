//! In-process localization engine.

use super::{LocalizationEngine, LocalizationError};
use parking_lot::Mutex;
use sesame_types::Locale;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Default)]
struct Inner {
    initialized: bool,
    active: Option<Locale>,
    bundles: HashMap<Locale, HashSet<String>>,
    switches: Vec<Locale>,
}

/// A [`LocalizationEngine`] that only tracks state.
///
/// Holds resource-bundle names rather than translation strings. Useful
/// for the CLI, tests and hosts that render text elsewhere.
///
/// # Example
///
/// ```
/// use sesame_runtime::l10n::{InMemoryLocalization, LocalizationEngine};
/// use sesame_types::Locale;
///
/// let engine = InMemoryLocalization::ready().with_bundle(Locale::Ru, "common");
/// engine.set_active_language(Locale::Ru).unwrap();
///
/// assert_eq!(engine.active_language(), Some(Locale::Ru));
/// assert!(engine.has_resource_bundle(Locale::Ru, "common"));
/// ```
#[derive(Debug)]
pub struct InMemoryLocalization {
    inner: Mutex<Inner>,
    supported: BTreeSet<Locale>,
}

impl InMemoryLocalization {
    /// Creates an engine that still needs [`initialize`](Self::initialize).
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            supported: Locale::ALL.into_iter().collect(),
        }
    }

    /// Creates an already initialized engine.
    #[must_use]
    pub fn ready() -> Self {
        let engine = Self::new();
        engine.initialize();
        engine
    }

    /// Restricts the languages the engine accepts.
    #[must_use]
    pub fn with_supported(mut self, locales: impl IntoIterator<Item = Locale>) -> Self {
        self.supported = locales.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_bundle(self, locale: Locale, namespace: impl Into<String>) -> Self {
        self.add_bundle(locale, namespace);
        self
    }

    pub fn add_bundle(&self, locale: Locale, namespace: impl Into<String>) {
        self.inner
            .lock()
            .bundles
            .entry(locale)
            .or_default()
            .insert(namespace.into());
    }

    /// Marks the engine ready.
    pub fn initialize(&self) {
        self.inner.lock().initialized = true;
    }

    /// Every successful language switch, oldest first.
    #[must_use]
    pub fn switches(&self) -> Vec<Locale> {
        self.inner.lock().switches.clone()
    }
}

impl Default for InMemoryLocalization {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalizationEngine for InMemoryLocalization {
    fn active_language(&self) -> Option<Locale> {
        self.inner.lock().active
    }

    fn set_active_language(&self, locale: Locale) -> Result<(), LocalizationError> {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return Err(LocalizationError::NotInitialized);
        }
        if !self.supported.contains(&locale) {
            return Err(LocalizationError::UnsupportedLanguage(locale));
        }
        inner.active = Some(locale);
        inner.switches.push(locale);
        Ok(())
    }

    fn has_resource_bundle(&self, locale: Locale, namespace: &str) -> bool {
        self.inner
            .lock()
            .bundles
            .get(&locale)
            .is_some_and(|ns| ns.contains(namespace))
    }

    fn is_initialized(&self) -> bool {
        self.inner.lock().initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sesame_types::{assert_error_code, ErrorCode};

    #[test]
    fn rejects_switch_before_initialization() {
        let engine = InMemoryLocalization::new();
        assert!(!engine.is_initialized());
        let err = engine.set_active_language(Locale::Ru).unwrap_err();
        assert_eq!(err, LocalizationError::NotInitialized);
        assert_error_code(&err, "L10N_");
        assert!(err.is_recoverable());
        assert_eq!(engine.active_language(), None);

        engine.initialize();
        engine.set_active_language(Locale::Ru).unwrap();
        assert_eq!(engine.active_language(), Some(Locale::Ru));
    }

    #[test]
    fn unsupported_language_is_refused() {
        let engine = InMemoryLocalization::ready().with_supported([Locale::Uz, Locale::Ru]);
        let err = engine.set_active_language(Locale::En).unwrap_err();
        assert_eq!(err.code(), "L10N_UNSUPPORTED_LANGUAGE");
        assert!(!err.is_recoverable());
        assert!(engine.switches().is_empty());
    }

    #[test]
    fn bundles_are_per_locale() {
        let engine = InMemoryLocalization::ready().with_bundle(Locale::Uz, "menu");
        engine.add_bundle(Locale::En, "menu");
        assert!(engine.has_resource_bundle(Locale::Uz, "menu"));
        assert!(engine.has_resource_bundle(Locale::En, "menu"));
        assert!(!engine.has_resource_bundle(Locale::Ru, "menu"));
        assert!(!engine.has_resource_bundle(Locale::Uz, "forms"));
    }
}
