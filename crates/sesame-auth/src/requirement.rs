//! Declarative permission requirements.

use crate::evaluator::{has_all_permissions, has_any_permission, has_permission, Grants};
use sesame_types::Permission;
use serde::{Deserialize, Serialize};

/// What a route, menu entry or widget needs in order to be shown.
///
/// # Example
///
/// ```
/// use sesame_auth::Requirement;
/// use sesame_types::Vocabulary;
///
/// let v = Vocabulary::new(1, ["reports.view", "reports.export"]).unwrap();
/// let export = Requirement::All(v.permissions(["reports.view", "reports.export"]).unwrap());
///
/// let granted = v.permissions(["reports.view"]).unwrap();
/// assert!(!export.is_satisfied_by(&granted));
/// assert!(Requirement::None.is_satisfied_by(&granted));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "permissions", rename_all = "lowercase")]
pub enum Requirement {
    /// No permission needed.
    #[default]
    None,
    /// Exactly this permission.
    One(Permission),
    /// At least one of these. Empty is never satisfied.
    Any(Vec<Permission>),
    /// Every one of these. Empty is always satisfied.
    All(Vec<Permission>),
}

impl Requirement {
    /// Evaluates this requirement against `granted`.
    #[must_use]
    pub fn is_satisfied_by<G: Grants + ?Sized>(&self, granted: &G) -> bool {
        match self {
            Self::None => true,
            Self::One(p) => has_permission(granted, p),
            Self::Any(ps) => has_any_permission(granted, ps),
            Self::All(ps) => has_all_permissions(granted, ps),
        }
    }

    /// Returns the permissions this requirement mentions.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        match self {
            Self::None => &[],
            Self::One(p) => std::slice::from_ref(p),
            Self::Any(ps) | Self::All(ps) => ps,
        }
    }
}

impl From<Permission> for Requirement {
    fn from(permission: Permission) -> Self {
        Self::One(permission)
    }
}
