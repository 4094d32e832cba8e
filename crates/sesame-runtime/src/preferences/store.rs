//! Persisted preference store.

use super::persist::{hydrate, project, PreferenceEnvelope};
use super::storage::PreferenceStorage;
use super::PreferenceState;
use sesame_state::{Store, Subscription};
use sesame_types::Locale;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// Observable [`PreferenceState`] that writes itself to storage after
/// every mutation.
///
/// Writes are best-effort. A failed write is logged at `warn` and the
/// in-memory value stays authoritative; setters never fail.
///
/// # Example
///
/// ```
/// use sesame_runtime::preferences::{MemoryStorage, PreferenceState, PreferenceStore};
/// use sesame_types::Locale;
/// use std::sync::Arc;
///
/// let storage = Arc::new(MemoryStorage::new());
/// let prefs = PreferenceStore::open(storage.clone(), "user-preferences", PreferenceState::default());
///
/// prefs.set_locale(Locale::Ru);
/// assert!(storage.get("user-preferences").unwrap().contains(r#""locale":"ru""#));
/// ```
pub struct PreferenceStore {
    state: Arc<Store<PreferenceState>>,
    storage: Arc<dyn PreferenceStorage>,
    key: String,
}

impl PreferenceStore {
    /// Restores preferences from `storage` under `key`.
    ///
    /// Falls back to `defaults` when nothing usable is stored.
    pub fn open(
        storage: Arc<dyn PreferenceStorage>,
        key: impl Into<String>,
        defaults: PreferenceState,
    ) -> Self {
        let key = key.into();
        let initial = match storage.load(&key) {
            Ok(Some(document)) => PreferenceEnvelope::from_json(&document)
                .map(hydrate)
                .unwrap_or(defaults),
            Ok(None) => defaults,
            Err(e) => {
                warn!(key = %key, error = %e, "failed to load preferences, using defaults");
                defaults
            }
        };
        debug!(
            key = %key,
            locale = %initial.locale,
            restored = initial.restored,
            "preferences opened"
        );

        Self {
            state: Arc::new(Store::new(initial)),
            storage,
            key,
        }
    }

    /// Storage key this store writes under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn snapshot(&self) -> PreferenceState {
        self.state.get()
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.state.read(|s| s.locale)
    }

    #[must_use]
    pub fn sidebar_open(&self) -> bool {
        self.state.read(|s| s.sidebar_open)
    }

    pub fn set_locale(&self, locale: Locale) {
        self.mutate(|s| s.locale = locale);
    }

    pub fn set_sidebar_open(&self, open: bool) {
        self.mutate(|s| s.sidebar_open = open);
    }

    /// Flips the sidebar flag and returns the new value.
    pub fn toggle_sidebar(&self) -> bool {
        self.mutate(|s| s.sidebar_open = !s.sidebar_open).sidebar_open
    }

    /// Registers a listener called with `(prev, next)` after every mutation.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&PreferenceState, &PreferenceState) + Send + Sync + 'static,
    {
        self.state.subscribe(listener)
    }

    /// Handle for reading the live state from inside a listener.
    pub(crate) fn downgrade(&self) -> Weak<Store<PreferenceState>> {
        Arc::downgrade(&self.state)
    }

    fn mutate(&self, f: impl FnOnce(&mut PreferenceState)) -> PreferenceState {
        let next = self.state.update(|s| {
            f(s);
            *s
        });
        // Listeners may have mutated again; the latest value is what gets written.
        self.persist(&self.state.get());
        next
    }

    fn persist(&self, state: &PreferenceState) {
        let document = match PreferenceEnvelope::new(project(state)).to_json() {
            Ok(document) => document,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to encode preferences");
                return;
            }
        };
        if let Err(e) = self.storage.save(&self.key, &document) {
            warn!(key = %self.key, error = %e, "failed to persist preferences");
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("key", &self.key)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
