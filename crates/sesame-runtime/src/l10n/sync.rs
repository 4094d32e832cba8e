//! One-way bridge from the preference store to a localization engine.

use super::LocalizationEngine;
use crate::preferences::PreferenceStore;
use parking_lot::Mutex;
use sesame_state::Subscription;
use sesame_types::{ErrorCode, Locale};
use std::sync::Arc;
use tracing::{debug, warn};

/// Keeps a [`LocalizationEngine`]'s active language equal to the
/// preference store's locale.
///
/// The engine never gets a handle to the store. If the engine refuses a
/// switch (typically because it is not initialized yet) the locale is
/// held as pending. It is delivered by [`flush_pending`](Self::flush_pending)
/// or by the next store mutation, whichever comes first. A refusal the
/// engine reports as unrecoverable is logged and dropped instead.
///
/// What gets delivered is always the store's locale at delivery time, so
/// a listener that changes the locale again mid-notification cannot leave
/// the engine behind.
///
/// Dropping the synchronizer detaches it from the store.
///
/// # Example
///
/// ```
/// use sesame_runtime::l10n::{InMemoryLocalization, LocaleSynchronizer, LocalizationEngine};
/// use sesame_runtime::preferences::{MemoryStorage, PreferenceState, PreferenceStore};
/// use sesame_types::Locale;
/// use std::sync::Arc;
///
/// let prefs = PreferenceStore::open(Arc::new(MemoryStorage::new()), "p", PreferenceState::default());
/// let engine = Arc::new(InMemoryLocalization::ready());
/// let _sync = LocaleSynchronizer::start(&prefs, engine.clone());
///
/// assert_eq!(engine.active_language(), Some(Locale::Uz));
/// prefs.set_locale(Locale::Ru);
/// assert_eq!(engine.active_language(), Some(Locale::Ru));
/// ```
pub struct LocaleSynchronizer {
    engine: Arc<dyn LocalizationEngine>,
    pending: Arc<Mutex<Option<Locale>>>,
    _subscription: Subscription,
}

impl LocaleSynchronizer {
    /// Pushes the store's current locale into `engine` and subscribes to
    /// later changes.
    pub fn start(store: &PreferenceStore, engine: Arc<dyn LocalizationEngine>) -> Self {
        let pending = Arc::new(Mutex::new(None));
        deliver(engine.as_ref(), &pending, store.locale());

        let subscription = {
            let engine = Arc::clone(&engine);
            let pending = Arc::clone(&pending);
            let state = store.downgrade();
            store.subscribe(move |prev, next| {
                let retry = pending.lock().is_some();
                if prev.locale != next.locale || retry {
                    let current = state
                        .upgrade()
                        .map_or(next.locale, |s| s.read(|s| s.locale));
                    deliver(engine.as_ref(), &pending, current);
                }
            })
        };

        Self {
            engine,
            pending,
            _subscription: subscription,
        }
    }

    /// Locale waiting for the engine, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Locale> {
        *self.pending.lock()
    }

    /// Retries delivery of a pending locale.
    ///
    /// Returns `true` if nothing is pending afterwards.
    pub fn flush_pending(&self) -> bool {
        let Some(locale) = self.pending() else {
            return true;
        };
        deliver(self.engine.as_ref(), &self.pending, locale);
        self.pending().is_none()
    }
}

impl std::fmt::Debug for LocaleSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleSynchronizer")
            .field("active", &self.engine.active_language())
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

fn deliver(engine: &dyn LocalizationEngine, pending: &Mutex<Option<Locale>>, locale: Locale) {
    match engine.set_active_language(locale) {
        Ok(()) => {
            *pending.lock() = None;
            debug!(%locale, "localization language switched");
        }
        Err(e) if e.is_recoverable() => {
            *pending.lock() = Some(locale);
            debug!(%locale, error = %e, "localization switch deferred");
        }
        Err(e) => {
            *pending.lock() = None;
            warn!(%locale, code = e.code(), error = %e, "localization switch refused");
        }
    }
}
