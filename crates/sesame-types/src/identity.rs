//! Identity and role shapes.
//!
//! The two applications authenticate different kinds of accounts:
//!
//! | Kind | Application | Carries permissions |
//! |------|-------------|---------------------|
//! | [`StaffUser`] | administrative console | yes |
//! | [`User`] | end-user application | no |
//!
//! Both travel as one [`Identity`] value, tagged by `kind` on the wire.

use crate::Permission;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A staff account of the administrative console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUser {
    pub id: i64,
    pub display_name: String,
    pub login_handle: String,
    /// Granted permissions in the order the backend sent them.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// An account of the end-user application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub display_name: String,
    pub login_handle: String,
}

/// A named bundle of permissions as defined by the schema package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Discriminant of an [`Identity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    Staff,
    User,
}

impl IdentityKind {
    /// Returns the wire tag (`"staff"` or `"user"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::User => "user",
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated account, whichever application it belongs to.
///
/// # Example
///
/// ```
/// use sesame_types::{Identity, IdentityKind, User};
///
/// let identity = Identity::User(User {
///     id: 42,
///     display_name: "Aziz".into(),
///     login_handle: "aziz".into(),
/// });
///
/// assert_eq!(identity.kind(), IdentityKind::User);
/// assert!(identity.permissions().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Identity {
    Staff(StaffUser),
    User(User),
}

impl Identity {
    #[must_use]
    pub fn id(&self) -> i64 {
        match self {
            Self::Staff(s) => s.id,
            Self::User(u) => u.id,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Staff(s) => &s.display_name,
            Self::User(u) => &u.display_name,
        }
    }

    #[must_use]
    pub fn login_handle(&self) -> &str {
        match self {
            Self::Staff(s) => &s.login_handle,
            Self::User(u) => &u.login_handle,
        }
    }

    #[must_use]
    pub fn kind(&self) -> IdentityKind {
        match self {
            Self::Staff(_) => IdentityKind::Staff,
            Self::User(_) => IdentityKind::User,
        }
    }

    /// Returns `true` for a [`StaffUser`].
    #[must_use]
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff(_))
    }

    /// Granted permissions. Always empty for end-user accounts.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        match self {
            Self::Staff(s) => &s.permissions,
            Self::User(_) => &[],
        }
    }
}

impl From<StaffUser> for Identity {
    fn from(staff: StaffUser) -> Self {
        Self::Staff(staff)
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.kind(), self.login_handle(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vocabulary;

    fn staff() -> Identity {
        let vocab = Vocabulary::new(1, ["users.read", "users.write"]).unwrap();
        Identity::Staff(StaffUser {
            id: 1,
            display_name: "Kamola".into(),
            login_handle: "kamola".into(),
            permissions: vocab.permissions(["users.write", "users.read"]).unwrap(),
        })
    }

    #[test]
    fn staff_accessors() {
        let id = staff();
        assert_eq!(id.id(), 1);
        assert_eq!(id.display_name(), "Kamola");
        assert_eq!(id.login_handle(), "kamola");
        assert_eq!(id.kind(), IdentityKind::Staff);
        assert!(id.is_staff());
        assert_eq!(id.permissions().len(), 2);
        assert_eq!(id.permissions()[0].as_str(), "users.write");
    }

    #[test]
    fn wire_format_is_kind_tagged_camel_case() {
        let json = serde_json::to_value(staff()).unwrap();
        assert_eq!(json["kind"], "staff");
        assert_eq!(json["displayName"], "Kamola");
        assert_eq!(json["loginHandle"], "kamola");
        assert_eq!(json["permissions"][1], "users.read");
    }

    #[test]
    fn user_payload_without_permissions() {
        let json = r#"{"kind":"user","id":9,"displayName":"Bobur","loginHandle":"bobur"}"#;
        let id: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(id.kind(), IdentityKind::User);
        assert!(id.permissions().is_empty());
        assert_eq!(id.to_string(), "user:bobur#9");
    }

    #[test]
    fn staff_payload_permissions_default_to_empty() {
        let json = r#"{"kind":"staff","id":3,"displayName":"S","loginHandle":"s"}"#;
        let id: Identity = serde_json::from_str(json).unwrap();
        assert!(id.is_staff());
        assert!(id.permissions().is_empty());
    }

    #[test]
    fn unknown_kind_rejected() {
        let json = r#"{"kind":"robot","id":3,"displayName":"R","loginHandle":"r"}"#;
        assert!(serde_json::from_str::<Identity>(json).is_err());
    }

    #[test]
    fn role_deserializes() {
        let role: Role =
            serde_json::from_str(r#"{"id":2,"name":"auditor","permissions":["users.read"]}"#)
                .unwrap();
        assert_eq!(role.name, "auditor");
        assert_eq!(role.permissions.len(), 1);
    }
}
