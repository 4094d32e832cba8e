//! Authorization primitives for sesame.
//!
//! # Layers
//!
//! ```text
//! Evaluator   (pure)     has_permission / has_any_permission / has_all_permissions
//!     ▲
//! SessionStore (state)   token + identity + derived PermissionSet + is_authenticated
//!     ▲
//! RouteGuard  (policy)   allow, or redirect to the anonymous entry path
//! ```
//!
//! | Item | Kind | Role |
//! |------|------|------|
//! | [`Grants`] | Trait | Anything that can answer "is this permission granted?" |
//! | [`PermissionSet`] | Struct | Hash-set of grants, O(1) membership |
//! | [`Requirement`] | Enum | None / one / any-of / all-of |
//! | [`SessionStore`] | Struct | Observable session state machine |
//! | [`RouteGuard`] | Struct | Pre-navigation check |
//!
//! # Advisory only
//!
//! Everything here runs on the client. A "yes" from this crate decides what
//! to render; it never replaces the backend's own authorization check.
//!
//! # Example
//!
//! ```
//! use sesame_auth::{GuardDecision, RouteGuard, SessionStore};
//! use sesame_types::{Identity, StaffUser, Vocabulary};
//!
//! let vocab = Vocabulary::new(1, ["orders.read", "orders.refund"]).unwrap();
//! let refund = vocab.permission("orders.refund").unwrap();
//!
//! let session = SessionStore::new();
//! let guard = RouteGuard::default();
//! assert!(matches!(guard.check_session(&session), GuardDecision::Redirect { .. }));
//!
//! session.login(
//!     "tok-1",
//!     Identity::Staff(StaffUser {
//!         id: 1,
//!         display_name: "Nodira".into(),
//!         login_handle: "nodira".into(),
//!         permissions: vec![refund.clone()],
//!     }),
//! );
//! assert!(guard.check_session(&session).is_allowed());
//! assert!(session.can(&refund));
//!
//! session.logout();
//! assert!(!session.can(&refund));
//! ```

pub mod evaluator;
pub mod guard;
pub mod requirement;
pub mod session;
pub mod store;

pub use evaluator::{
    has_all_permissions, has_any_permission, has_permission, Grants, PermissionSet,
};
pub use guard::{GuardDecision, RouteGuard, DEFAULT_LOGIN_PATH};
pub use requirement::Requirement;
pub use session::{AuthToken, SessionPhase, SessionState};
pub use store::SessionStore;

pub use sesame_state::Subscription;
