//! Shared vocabulary types for sesame.
//!
//! This crate is the leaf of the workspace. It carries the type contract
//! that both front-end applications (the administrative console and the
//! end-user application) agree on, and nothing else:
//!
//! ```text
//! sesame-types   : Permission, Vocabulary, Identity, Role, Locale  ◄── HERE
//!     ↑
//! sesame-state   : Store<T>, Subscription
//!     ↑
//! sesame-auth    : evaluator, SessionStore, RouteGuard
//!     ↑
//! sesame-runtime : PreferenceStore, LocaleSynchronizer, config
//!     ↑
//! sesame-cli     : `sesame` binary
//! ```
//!
//! # Permissions are not defined here
//!
//! The permission vocabulary belongs to the schema package. This crate only
//! knows how to *hold* one ([`Vocabulary`]) and hands out validated
//! [`Permission`] values from it. No permission name is compiled in.
//!
//! # Example
//!
//! ```
//! use sesame_types::{Identity, Locale, Vocabulary};
//!
//! let vocab = Vocabulary::new(3, ["users.read", "users.write"]).unwrap();
//! let read = vocab.permission("users.read").unwrap();
//!
//! let json = r#"{
//!     "kind": "staff",
//!     "id": 7,
//!     "displayName": "Dilnoza",
//!     "loginHandle": "dilnoza",
//!     "permissions": ["users.read"]
//! }"#;
//! let identity: Identity = serde_json::from_str(json).unwrap();
//! assert!(identity.is_staff());
//! assert_eq!(identity.permissions(), &[read]);
//!
//! assert_eq!(Locale::default(), Locale::Uz);
//! ```

mod error;
mod identity;
mod locale;
mod permission;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use identity::{Identity, IdentityKind, Role, StaffUser, User};
pub use locale::{Locale, LocaleParseError};
pub use permission::{Permission, Vocabulary, VocabularyError};
