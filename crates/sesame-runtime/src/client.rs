//! Client core wiring.
//!
//! [`ClientCoreBuilder`] resolves configuration and constructs every
//! component with its dependencies passed in explicitly:
//!
//! ```text
//! SesameConfig ─┬─► Vocabulary ──► SessionStore ──► RouteGuard
//!               ├─► PreferenceStorage ──► PreferenceStore
//!               └─► LocalizationEngine ─┐       │
//!                                       ▼       ▼
//!                                  LocaleSynchronizer
//! ```

use crate::config::{ConfigError, ConfigResolver, NoOpResolver, SesameConfig};
use crate::l10n::{InMemoryLocalization, LocaleSynchronizer, LocalizationEngine};
use crate::preferences::{
    FileStorage, PreferenceState, PreferenceStorage, PreferenceStore, StorageError,
};
use crate::vocabulary::load_vocabulary;
use sesame_auth::{GuardDecision, Requirement, RouteGuard, SessionStore};
use sesame_types::{ErrorCode, Vocabulary};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors raised while building a [`ClientCore`].
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ErrorCode for CoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.code(),
            Self::Storage(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(e) => e.is_recoverable(),
            Self::Storage(e) => e.is_recoverable(),
        }
    }
}

/// The assembled client-side core for one running application.
pub struct ClientCore {
    config: SesameConfig,
    vocabulary: Option<Arc<Vocabulary>>,
    session: SessionStore,
    guard: RouteGuard,
    preferences: PreferenceStore,
    localization: Arc<dyn LocalizationEngine>,
    synchronizer: LocaleSynchronizer,
}

impl ClientCore {
    #[must_use]
    pub fn builder(config: SesameConfig) -> ClientCoreBuilder {
        ClientCoreBuilder::new(config)
    }

    #[must_use]
    pub fn config(&self) -> &SesameConfig {
        &self.config
    }

    #[must_use]
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_deref()
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    #[must_use]
    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    #[must_use]
    pub fn localization(&self) -> &dyn LocalizationEngine {
        self.localization.as_ref()
    }

    #[must_use]
    pub fn synchronizer(&self) -> &LocaleSynchronizer {
        &self.synchronizer
    }

    /// Guard decision for navigating to a target with `requirement`.
    #[must_use]
    pub fn check_navigation(&self, requirement: &Requirement) -> GuardDecision {
        self.session
            .read(|state| self.guard.check_requirement(state, requirement))
    }
}

impl std::fmt::Debug for ClientCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCore")
            .field("app", &self.config.app)
            .field("session", &self.session.phase())
            .field("preferences", &self.preferences)
            .field("synchronizer", &self.synchronizer)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ClientCore`].
///
/// Storage defaults to [`FileStorage`] under `storage.dir`; the engine
/// defaults to a ready [`InMemoryLocalization`]; the vocabulary is read
/// from `vocabulary.path` when one is configured.
///
/// # Example
///
/// ```
/// use sesame_runtime::config::SesameConfig;
/// use sesame_runtime::preferences::MemoryStorage;
/// use sesame_runtime::ClientCore;
/// use sesame_types::Locale;
/// use std::sync::Arc;
///
/// let core = ClientCore::builder(SesameConfig::default())
///     .with_storage(Arc::new(MemoryStorage::new()))
///     .build()
///     .unwrap();
///
/// core.preferences().set_locale(Locale::Ru);
/// assert_eq!(core.localization().active_language(), Some(Locale::Ru));
/// ```
pub struct ClientCoreBuilder {
    config: SesameConfig,
    resolver: Box<dyn ConfigResolver>,
    storage: Option<Arc<dyn PreferenceStorage>>,
    localization: Option<Arc<dyn LocalizationEngine>>,
    vocabulary: Option<Vocabulary>,
}

impl ClientCoreBuilder {
    #[must_use]
    pub fn new(config: SesameConfig) -> Self {
        Self {
            config,
            resolver: Box::new(NoOpResolver),
            storage: None,
            localization: None,
            vocabulary: None,
        }
    }

    /// Applies `resolver` to the configuration before anything is built.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl ConfigResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn PreferenceStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    #[must_use]
    pub fn with_localization(mut self, engine: Arc<dyn LocalizationEngine>) -> Self {
        self.localization = Some(engine);
        self
    }

    /// Uses `vocabulary` instead of reading `vocabulary.path`.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Builds the core.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if the configured vocabulary cannot be
    /// loaded, or [`CoreError::Storage`] if the storage directory cannot be
    /// created.
    pub fn build(self) -> Result<ClientCore, CoreError> {
        let mut config = self.config;
        self.resolver.apply(&mut config);

        let vocabulary = match self.vocabulary {
            Some(v) => Some(v),
            None => config
                .vocabulary
                .path
                .as_deref()
                .map(load_vocabulary)
                .transpose()?,
        }
        .map(Arc::new);

        let storage: Arc<dyn PreferenceStorage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(FileStorage::new(config.storage.dir_or_default())?),
        };
        let localization: Arc<dyn LocalizationEngine> = match self.localization {
            Some(engine) => engine,
            None => Arc::new(InMemoryLocalization::ready()),
        };

        let session = match &vocabulary {
            Some(v) => SessionStore::new().with_vocabulary(Arc::clone(v)),
            None => SessionStore::new(),
        };
        let guard = RouteGuard::new(config.guard.login_path.clone());
        let preferences = PreferenceStore::open(
            storage,
            config.storage_key(),
            PreferenceState::with_locale(config.preferences.default_locale),
        );
        let synchronizer = LocaleSynchronizer::start(&preferences, Arc::clone(&localization));

        info!(
            app = %config.app,
            login_path = %guard.login_path(),
            vocabulary = vocabulary.as_ref().map(|v| v.version()),
            locale = %preferences.locale(),
            "Client core ready"
        );

        Ok(ClientCore {
            config,
            vocabulary,
            session,
            guard,
            preferences,
            localization,
            synchronizer,
        })
    }
}
