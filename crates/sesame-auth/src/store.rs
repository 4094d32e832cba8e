//! Observable session store.

use crate::evaluator::{has_all_permissions, has_any_permission, has_permission, PermissionSet};
use crate::requirement::Requirement;
use crate::session::{AuthToken, SessionPhase, SessionState};
use sesame_state::{Store, Subscription};
use sesame_types::{Identity, Permission, Vocabulary};
use std::sync::Arc;
use tracing::debug;

/// Owns the [`SessionState`] and applies transitions to it.
///
/// Every transition is synchronous. When it returns, subscribers have
/// already been called with the previous and next state.
///
/// Permission queries read the current state on every call; nothing is
/// cached across transitions.
///
/// # Example
///
/// ```
/// use sesame_auth::{SessionPhase, SessionStore};
///
/// let session = SessionStore::new();
/// session.set_token("tok");
///
/// assert_eq!(session.phase(), SessionPhase::PartiallyAuthenticated);
/// assert!(!session.is_authenticated());
/// ```
#[derive(Debug, Default)]
pub struct SessionStore {
    state: Store<SessionState>,
    vocabulary: Option<Arc<Vocabulary>>,
}

impl SessionStore {
    /// Creates a store in the anonymous state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters identity grants through `vocabulary` on every derivation.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Arc<Vocabulary>) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    #[must_use]
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_deref()
    }

    /// Sets the token without authenticating.
    pub fn set_token(&self, token: impl Into<AuthToken>) {
        let token = token.into();
        let phase = self.state.update(|s| {
            s.apply_token(token);
            s.phase()
        });
        debug!(%phase, "session token set");
    }

    /// Sets the identity and re-derives permissions.
    ///
    /// The authenticated flag is left as it was. Only [`login`](Self::login)
    /// authenticates.
    pub fn set_user(&self, identity: Identity) {
        let vocabulary = self.vocabulary.as_deref();
        let (phase, grants) = self.state.update(|s| {
            s.apply_user(identity, vocabulary);
            (s.phase(), s.permissions().len())
        });
        debug!(%phase, grants, "session identity set");
    }

    /// Sets token and identity and authenticates, as one transition.
    pub fn login(&self, token: impl Into<AuthToken>, identity: Identity) {
        let token = token.into();
        let vocabulary = self.vocabulary.as_deref();
        let (phase, grants) = self.state.update(|s| {
            s.apply_login(token, identity, vocabulary);
            (s.phase(), s.permissions().len())
        });
        debug!(%phase, grants, "session logged in");
    }

    /// Returns to the anonymous state.
    pub fn logout(&self) {
        let phase = self.state.update(|s| {
            s.apply_logout();
            s.phase()
        });
        debug!(%phase, "session logged out");
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.get()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read(SessionState::is_authenticated)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.read(SessionState::phase)
    }

    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.state.read(|s| s.token().cloned())
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.state.read(|s| s.identity().cloned())
    }

    #[must_use]
    pub fn permissions(&self) -> PermissionSet {
        self.state.read(|s| s.permissions().clone())
    }

    /// Checks one permission against the current grants.
    #[must_use]
    pub fn can(&self, permission: &Permission) -> bool {
        self.state
            .read(|s| has_permission(s.permissions(), permission))
    }

    #[must_use]
    pub fn can_any(&self, permissions: &[Permission]) -> bool {
        self.state
            .read(|s| has_any_permission(s.permissions(), permissions))
    }

    #[must_use]
    pub fn can_all(&self, permissions: &[Permission]) -> bool {
        self.state
            .read(|s| has_all_permissions(s.permissions(), permissions))
    }

    #[must_use]
    pub fn satisfies(&self, requirement: &Requirement) -> bool {
        self.state
            .read(|s| requirement.is_satisfied_by(s.permissions()))
    }

    /// Registers a listener called with `(prev, next)` after every
    /// transition.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionState, &SessionState) + Send + Sync + 'static,
    {
        self.state.subscribe(listener)
    }

    /// Runs `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        self.state.read(f)
    }
}
