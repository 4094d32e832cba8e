//! Pre-navigation route guard.
//!
//! The guard is consulted once per navigation attempt. It does not watch
//! the session afterwards: a user who is logged out while on a protected
//! page stays there until the next navigation.

use crate::requirement::Requirement;
use crate::session::SessionState;
use crate::store::SessionStore;
use serde::{Deserialize, Serialize};

/// Anonymous-only destination used when none is configured.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum GuardDecision {
    /// Proceed to the requested target.
    Allow,
    /// Abort and navigate to `to` instead.
    Redirect { to: String },
    /// Authenticated, but the target's requirement is not met.
    Forbidden,
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Redirect target, if this is a redirect.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect { to } => Some(to),
            _ => None,
        }
    }
}

/// Gates protected targets on the session's authenticated flag.
///
/// # Example
///
/// ```
/// use sesame_auth::{GuardDecision, RouteGuard, SessionState};
///
/// let guard = RouteGuard::new("/sign-in");
/// assert_eq!(
///     guard.check(&SessionState::anonymous()),
///     GuardDecision::Redirect { to: "/sign-in".into() },
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    login_path: String,
}

impl RouteGuard {
    #[must_use]
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Allows authenticated sessions and redirects everyone else.
    #[must_use]
    pub fn check(&self, state: &SessionState) -> GuardDecision {
        if state.is_authenticated() {
            GuardDecision::Allow
        } else {
            tracing::debug!(phase = %state.phase(), to = %self.login_path, "guard redirect");
            GuardDecision::Redirect {
                to: self.login_path.clone(),
            }
        }
    }

    /// [`check`](Self::check) against the store's current state.
    #[must_use]
    pub fn check_session(&self, session: &SessionStore) -> GuardDecision {
        session.read(|s| self.check(s))
    }

    /// Like [`check`](Self::check), then also evaluates `requirement`.
    ///
    /// Anonymous sessions are redirected before the requirement is looked
    /// at.
    #[must_use]
    pub fn check_requirement(
        &self,
        state: &SessionState,
        requirement: &Requirement,
    ) -> GuardDecision {
        match self.check(state) {
            GuardDecision::Allow if !requirement.is_satisfied_by(state.permissions()) => {
                tracing::debug!("guard forbidden");
                GuardDecision::Forbidden
            }
            decision => decision,
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sesame_types::{Identity, StaffUser, Vocabulary};

    fn vocab() -> Vocabulary {
        Vocabulary::new(1, ["reports.view", "reports.export"]).unwrap()
    }

    fn authenticated(v: &Vocabulary, perms: &[&str]) -> SessionStore {
        let session = SessionStore::new();
        session.login(
            "tok",
            Identity::Staff(StaffUser {
                id: 1,
                display_name: "Malika".into(),
                login_handle: "malika".into(),
                permissions: v.permissions(perms.iter().copied()).unwrap(),
            }),
        );
        session
    }

    #[test]
    fn anonymous_redirects_to_default_login() {
        let decision = RouteGuard::default().check(&SessionState::anonymous());
        assert_eq!(decision.redirect_target(), Some(DEFAULT_LOGIN_PATH));
        assert!(!decision.is_allowed());
    }

    #[test]
    fn token_without_login_still_redirects() {
        let session = SessionStore::new();
        session.set_token("tok");
        let decision = RouteGuard::new("/enter").check_session(&session);
        assert_eq!(decision, GuardDecision::Redirect { to: "/enter".into() });
    }

    #[test]
    fn authenticated_is_allowed() {
        let session = authenticated(&vocab(), &[]);
        assert!(RouteGuard::default().check_session(&session).is_allowed());
    }

    #[test]
    fn decision_is_taken_at_check_time() {
        let session = authenticated(&vocab(), &[]);
        let guard = RouteGuard::default();
        let decision = guard.check_session(&session);
        session.logout();
        assert!(decision.is_allowed());
        assert!(!guard.check_session(&session).is_allowed());
    }

    #[test]
    fn requirement_checks() {
        let v = vocab();
        let guard = RouteGuard::default();
        let export = Requirement::One(v.permission("reports.export").unwrap());

        let viewer = authenticated(&v, &["reports.view"]).snapshot();
        assert_eq!(guard.check_requirement(&viewer, &export), GuardDecision::Forbidden);
        assert!(guard
            .check_requirement(&viewer, &Requirement::None)
            .is_allowed());

        let exporter = authenticated(&v, &["reports.export"]).snapshot();
        assert!(guard.check_requirement(&exporter, &export).is_allowed());

        assert!(matches!(
            guard.check_requirement(&SessionState::anonymous(), &Requirement::None),
            GuardDecision::Redirect { .. }
        ));
    }

    #[test]
    fn decision_serializes_with_tag() {
        let json = serde_json::to_value(GuardDecision::Redirect { to: "/login".into() }).unwrap();
        assert_eq!(json["decision"], "redirect");
        assert_eq!(json["to"], "/login");
        assert_eq!(
            serde_json::to_value(GuardDecision::Allow).unwrap()["decision"],
            "allow"
        );
    }
}
