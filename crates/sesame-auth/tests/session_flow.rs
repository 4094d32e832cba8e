//! Integration tests for the session lifecycle.
//!
//! Walks a session through the transitions a client performs against the
//! backend and checks the guard, the capability queries and subscriber
//! notifications at each step.

use sesame_auth::{
    has_all_permissions, has_any_permission, AuthToken, GuardDecision, Requirement, RouteGuard,
    SessionPhase, SessionState, SessionStore,
};
use sesame_types::{Identity, StaffUser, Vocabulary};
use std::sync::{Arc, Mutex};

// =============================================================================
// Fixtures
// =============================================================================

fn vocabulary() -> Arc<Vocabulary> {
    Arc::new(
        Vocabulary::from_json(
            r#"{
                "version": 4,
                "permissions": ["users.read", "users.write", "orders.read", "orders.refund"]
            }"#,
        )
        .unwrap(),
    )
}

fn staff(v: &Vocabulary, names: &[&str]) -> Identity {
    Identity::Staff(StaffUser {
        id: 77,
        display_name: "Shahzoda".into(),
        login_handle: "shahzoda".into(),
        permissions: v.permissions(names.iter().copied()).unwrap(),
    })
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn multi_step_login_scenario() {
    let v = vocabulary();
    let session = SessionStore::new().with_vocabulary(Arc::clone(&v));
    let guard = RouteGuard::default();

    let phases = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&phases);
    let _sub = session.subscribe(move |_, next| sink.lock().unwrap().push(next.phase()));

    // Anonymous: guard redirects, nothing is granted.
    assert_eq!(
        guard.check_session(&session),
        GuardDecision::Redirect {
            to: "/login".into()
        }
    );
    assert!(!session.can(&v.permission("users.read").unwrap()));

    // Token arrives first, identity is fetched afterwards.
    session.set_token("abc");
    let state = session.snapshot();
    assert_eq!(state.token().map(AuthToken::expose), Some("abc"));
    assert_eq!(state.identity(), None);
    assert!(!state.is_authenticated());
    assert!(!guard.check_session(&session).is_allowed());

    let user = staff(&v, &["users.read", "orders.refund"]);
    session.set_user(user.clone());
    let state = session.snapshot();
    assert_eq!(state.identity(), Some(&user));
    assert!(!state.is_authenticated());
    assert!(session.can(&v.permission("users.read").unwrap()));
    assert!(!guard.check_session(&session).is_allowed());

    // Only login flips the flag.
    session.login("abc", user.clone());
    let state = session.snapshot();
    assert_eq!(state.identity(), Some(&user));
    assert_eq!(state.token().map(AuthToken::expose), Some("abc"));
    assert!(state.is_authenticated());
    assert!(guard.check_session(&session).is_allowed());
    assert!(session.satisfies(&Requirement::All(
        v.permissions(["users.read", "orders.refund"]).unwrap()
    )));
    assert!(!session.satisfies(&Requirement::One(v.permission("users.write").unwrap())));

    session.logout();
    assert!(!guard.check_session(&session).is_allowed());

    assert_eq!(
        *phases.lock().unwrap(),
        vec![
            SessionPhase::PartiallyAuthenticated,
            SessionPhase::PartiallyAuthenticated,
            SessionPhase::Authenticated,
            SessionPhase::Anonymous,
        ]
    );
}

#[test]
fn logout_from_every_phase_equals_initial_state() {
    let v = vocabulary();
    let initial = SessionStore::new().snapshot();
    assert_eq!(initial, SessionState::default());

    let setups: [fn(&SessionStore); 4] = [
        |_| {},
        |s| s.set_token("t"),
        |s| s.set_user(staff(&vocabulary(), &["orders.read"])),
        |s| s.login("t", staff(&vocabulary(), &["orders.read", "users.write"])),
    ];

    for setup in setups {
        let session = SessionStore::new().with_vocabulary(Arc::clone(&v));
        setup(&session);
        session.logout();

        let after = session.snapshot();
        assert_eq!(after, initial);
        assert!(after.token().is_none());
        assert!(after.permissions().is_empty());
        assert_eq!(session.phase(), SessionPhase::Anonymous);
    }
}

#[test]
fn login_postconditions() {
    let v = vocabulary();
    let session = SessionStore::new();
    let identity = staff(&v, &["orders.read", "orders.refund"]);
    session.login("bearer-9", identity.clone());

    let state = session.snapshot();
    assert!(state.is_authenticated());
    assert_eq!(state.token().map(|t| t.expose()), Some("bearer-9"));
    assert_eq!(state.identity(), Some(&identity));
    assert!(has_all_permissions(state.permissions(), identity.permissions()));
    assert_eq!(state.permissions().len(), identity.permissions().len());
}

#[test]
fn snapshot_queries_match_store_queries() {
    let v = vocabulary();
    let session = SessionStore::new();
    session.login("t", staff(&v, &["orders.read"]));

    let snapshot = session.snapshot();
    let required = v.permissions(["orders.refund", "orders.read"]).unwrap();
    assert_eq!(
        has_any_permission(snapshot.permissions(), &required),
        session.can_any(&required)
    );
    assert_eq!(
        has_all_permissions(snapshot.permissions(), &required),
        session.can_all(&required)
    );
}
