//! Session state and its transitions.
//!
//! [`SessionState`] is a plain value. The transitions live here as
//! functions from one state to the next so they can be tested without a
//! store; [`SessionStore`](crate::SessionStore) applies them atomically
//! and notifies subscribers.
//!
//! ```text
//!              set_token / set_user
//!  Anonymous ─────────────────────────► PartiallyAuthenticated
//!      │                                        │
//!      │ login                           login  │
//!      ▼                                        ▼
//!  Authenticated ◄──────────────────────────────┘
//!      │
//!      │ logout (from any phase)
//!      ▼
//!  Anonymous
//! ```

use crate::evaluator::PermissionSet;
use sesame_types::{Identity, Vocabulary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque bearer token issued by the backend.
///
/// `Debug` never prints the secret. Use [`expose`](Self::expose) at the
/// single point where the token is attached to a request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl From<&str> for AuthToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Coarse classification of a [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No token, no identity.
    Anonymous,
    /// A token or identity is present but `login` has not run.
    PartiallyAuthenticated,
    /// Reached only through `login`.
    Authenticated,
}

impl SessionPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::PartiallyAuthenticated => "partially_authenticated",
            Self::Authenticated => "authenticated",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current authentication record.
///
/// # Invariants
///
/// - `is_authenticated` implies both `token` and `identity` are present.
/// - `permissions` is always derived from `identity`; it is never set
///   directly.
/// - `SessionState::default()` is the anonymous state, and `logout`
///   returns exactly this value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    token: Option<AuthToken>,
    identity: Option<Identity>,
    is_authenticated: bool,
    permissions: PermissionSet,
}

impl SessionState {
    /// The anonymous state.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Permissions derived from the current identity.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.is_authenticated {
            SessionPhase::Authenticated
        } else if self.token.is_some() || self.identity.is_some() {
            SessionPhase::PartiallyAuthenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    /// Replaces the token. Identity and the authenticated flag are kept.
    pub(crate) fn apply_token(&mut self, token: AuthToken) {
        self.token = Some(token);
    }

    /// Replaces the identity and re-derives permissions.
    ///
    /// Does not change `is_authenticated`.
    pub(crate) fn apply_user(&mut self, identity: Identity, vocabulary: Option<&Vocabulary>) {
        self.permissions = derive_permissions(&identity, vocabulary);
        self.identity = Some(identity);
    }

    pub(crate) fn apply_login(
        &mut self,
        token: AuthToken,
        identity: Identity,
        vocabulary: Option<&Vocabulary>,
    ) {
        *self = Self {
            token: Some(token),
            permissions: derive_permissions(&identity, vocabulary),
            identity: Some(identity),
            is_authenticated: true,
        };
    }

    pub(crate) fn apply_logout(&mut self) {
        *self = Self::anonymous();
    }
}

fn derive_permissions(identity: &Identity, vocabulary: Option<&Vocabulary>) -> PermissionSet {
    match vocabulary {
        Some(v) => v.retain_known(identity.permissions()).into_iter().collect(),
        None => PermissionSet::from(identity.permissions()),
    }
}
