//! Capability evaluation.
//!
//! Three pure, total queries over a caller-supplied grant set:
//!
//! | Query | Empty `required` |
//! |-------|------------------|
//! | [`has_permission`] | n/a |
//! | [`has_any_permission`] | `false` |
//! | [`has_all_permissions`] | `true` |
//!
//! The grant set is anything implementing [`Grants`]. Slices work, but
//! callers that query repeatedly should hold a [`PermissionSet`] so each
//! membership check is a hash lookup rather than a scan.
//!
//! Nothing here knows about sessions; [`SessionStore`](crate::SessionStore)
//! feeds its current set into these functions on every query.

use sesame_types::{Permission, Role};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// A collection that can answer whether a permission is granted.
///
/// Order and duplicates never matter to the answer.
pub trait Grants {
    /// Returns `true` if `permission` is granted.
    fn grants(&self, permission: &Permission) -> bool;
}

impl Grants for [Permission] {
    fn grants(&self, permission: &Permission) -> bool {
        self.contains(permission)
    }
}

impl<const N: usize> Grants for [Permission; N] {
    fn grants(&self, permission: &Permission) -> bool {
        self.contains(permission)
    }
}

impl Grants for Vec<Permission> {
    fn grants(&self, permission: &Permission) -> bool {
        self.as_slice().grants(permission)
    }
}

impl<S: BuildHasher> Grants for HashSet<Permission, S> {
    fn grants(&self, permission: &Permission) -> bool {
        self.contains(permission)
    }
}

impl Grants for BTreeSet<Permission> {
    fn grants(&self, permission: &Permission) -> bool {
        self.contains(permission)
    }
}

impl<G: Grants + ?Sized> Grants for &G {
    fn grants(&self, permission: &Permission) -> bool {
        (**self).grants(permission)
    }
}

/// Returns `true` iff `required` is in `granted`.
///
/// ```
/// use sesame_auth::has_permission;
/// use sesame_types::Vocabulary;
///
/// let v = Vocabulary::new(1, ["a", "b"]).unwrap();
/// let (a, b) = (v.permission("a").unwrap(), v.permission("b").unwrap());
///
/// assert!(has_permission(&[a.clone(), a.clone()], &a));
/// assert!(!has_permission(&[a], &b));
/// ```
#[must_use]
pub fn has_permission<G: Grants + ?Sized>(granted: &G, required: &Permission) -> bool {
    granted.grants(required)
}

/// Returns `true` iff at least one of `required` is in `granted`.
///
/// An empty `required` can never be "any"-satisfied and returns `false`.
#[must_use]
pub fn has_any_permission<G: Grants + ?Sized>(granted: &G, required: &[Permission]) -> bool {
    required.iter().any(|p| granted.grants(p))
}

/// Returns `true` iff every one of `required` is in `granted`.
///
/// An empty `required` is trivially satisfied and returns `true`.
#[must_use]
pub fn has_all_permissions<G: Grants + ?Sized>(granted: &G, required: &[Permission]) -> bool {
    required.iter().all(|p| granted.grants(p))
}

/// An unordered, duplicate-free set of granted permissions.
///
/// # Example
///
/// ```
/// use sesame_auth::{has_all_permissions, PermissionSet};
/// use sesame_types::Vocabulary;
///
/// let v = Vocabulary::new(1, ["users.read", "users.write"]).unwrap();
/// let grants: PermissionSet = v.iter().cloned().collect();
///
/// assert_eq!(grants.len(), 2);
/// assert!(has_all_permissions(&grants, &v.permissions(["users.read", "users.write"]).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashSet<Permission>);

impl PermissionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the permissions carried by all `roles`.
    #[must_use]
    pub fn from_roles(roles: &[Role]) -> Self {
        roles
            .iter()
            .flat_map(|r| r.permissions.iter().cloned())
            .collect()
    }

    /// Returns `true` if `permission` is in the set.
    #[must_use]
    pub fn contains(&self, permission: &Permission) -> bool {
        self.0.contains(permission)
    }

    /// Returns `true` if a permission with this exact name is in the set.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Returns a new set holding the grants of both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.0.union(&other.0).cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }

    /// Returns the grants sorted by name, for display and stable output.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Permission> {
        let mut all: Vec<&Permission> = self.0.iter().collect();
        all.sort();
        all
    }
}

impl Grants for PermissionSet {
    fn grants(&self, permission: &Permission) -> bool {
        self.contains(permission)
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&[Permission]> for PermissionSet {
    fn from(granted: &[Permission]) -> Self {
        granted.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::collections::hash_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
