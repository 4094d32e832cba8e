//! Permission identifiers and the vocabulary they are drawn from.
//!
//! A [`Permission`] is an opaque, immutable name such as `"users.read"`.
//! The set of legal names is closed and versioned: it is published by the
//! schema package and loaded at startup into a [`Vocabulary`].
//!
//! ```text
//! schema package ──(json/toml)──► Vocabulary { version, permissions }
//!                                      │
//!                                      ├── permission("users.read") ──► Permission
//!                                      └── retain_known(&grants)     ──► Vec<Permission>
//! ```
//!
//! Permissions also arrive inside identity payloads from the backend; those
//! are deserialized as-is and can be filtered with
//! [`Vocabulary::retain_known`].

use crate::ErrorCode;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// A single grantable capability.
///
/// Obtain one from [`Vocabulary::permission`] or by deserializing a backend
/// payload. There is intentionally no public string constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    /// Returns the identifier as published by the schema package.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors raised while building or querying a [`Vocabulary`].
#[derive(Debug, Error)]
pub enum VocabularyError {
    /// The name is not part of this vocabulary version.
    #[error("unknown permission '{name}' (vocabulary v{version})")]
    UnknownPermission { name: String, version: u32 },

    /// A blank or whitespace-padded entry was found.
    #[error("invalid permission name '{0}'")]
    InvalidName(String),

    /// The vocabulary document could not be parsed.
    #[error("failed to parse vocabulary: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ErrorCode for VocabularyError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownPermission { .. } => "VOCAB_UNKNOWN_PERMISSION",
            Self::InvalidName(_) => "VOCAB_INVALID_NAME",
            Self::Parse(_) => "VOCAB_PARSE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Wire shape of a vocabulary document before validation.
#[derive(Deserialize)]
struct RawVocabulary {
    version: u32,
    permissions: Vec<String>,
}

impl TryFrom<RawVocabulary> for Vocabulary {
    type Error = VocabularyError;

    fn try_from(raw: RawVocabulary) -> Result<Self, Self::Error> {
        Self::new(raw.version, raw.permissions)
    }
}

/// The closed, versioned set of permission identifiers.
///
/// # Example
///
/// ```
/// use sesame_types::Vocabulary;
///
/// let vocab = Vocabulary::from_json(r#"{
///     "version": 12,
///     "permissions": ["orders.read", "orders.refund"]
/// }"#).unwrap();
///
/// assert_eq!(vocab.version(), 12);
/// assert!(vocab.permission("orders.refund").is_ok());
/// assert!(vocab.permission("orders.delete").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVocabulary")]
pub struct Vocabulary {
    version: u32,
    permissions: BTreeSet<Permission>,
}

impl Vocabulary {
    /// Builds a vocabulary from raw names.
    ///
    /// Duplicate names collapse into one entry.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError::InvalidName`] for an empty name or one with
    /// surrounding whitespace.
    pub fn new<I, S>(version: u32, names: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut permissions = BTreeSet::new();
        for name in names {
            let name = name.into();
            if name.is_empty() || name.trim() != name {
                return Err(VocabularyError::InvalidName(name));
            }
            permissions.insert(Permission(name));
        }
        Ok(Self {
            version,
            permissions,
        })
    }

    /// Parses a vocabulary document exported by the schema package.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError::Parse`] if the JSON is malformed or any
    /// entry fails validation.
    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the schema version this vocabulary was published as.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Looks up a permission by name.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError::UnknownPermission`] if `name` is not defined.
    pub fn permission(&self, name: &str) -> Result<Permission, VocabularyError> {
        self.permissions
            .get(name)
            .cloned()
            .ok_or_else(|| VocabularyError::UnknownPermission {
                name: name.to_string(),
                version: self.version,
            })
    }

    /// Looks up several permissions at once, failing on the first unknown name.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError::UnknownPermission`] for the first unknown name.
    pub fn permissions<'a, I>(&self, names: I) -> Result<Vec<Permission>, VocabularyError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().map(|n| self.permission(n)).collect()
    }

    /// Returns `true` if `permission` belongs to this vocabulary.
    #[must_use]
    pub fn contains(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// Drops grants the vocabulary does not define.
    ///
    /// Backend payloads may be produced against a newer or older schema.
    /// Unknown entries are logged and discarded; order is preserved.
    #[must_use]
    pub fn retain_known(&self, granted: &[Permission]) -> Vec<Permission> {
        granted
            .iter()
            .filter(|p| {
                let known = self.contains(p);
                if !known {
                    tracing::warn!(
                        permission = %p,
                        version = self.version,
                        "dropping permission missing from vocabulary"
                    );
                }
                known
            })
            .cloned()
            .collect()
    }

    /// Iterates over all permissions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    /// Number of permissions defined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Returns `true` if the vocabulary defines nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_error_codes;

    fn vocab() -> Vocabulary {
        Vocabulary::new(4, ["users.read", "users.write", "reports.export"]).unwrap()
    }

    #[test]
    fn lookup_known_permission() {
        let p = vocab().permission("users.write").unwrap();
        assert_eq!(p.as_str(), "users.write");
        assert_eq!(p.to_string(), "users.write");
    }

    #[test]
    fn lookup_unknown_permission_reports_version() {
        let err = vocab().permission("users.delete").unwrap_err();
        assert!(matches!(
            err,
            VocabularyError::UnknownPermission { ref name, version: 4 } if name == "users.delete"
        ));
        assert!(err.to_string().contains("v4"));
    }

    #[test]
    fn duplicates_collapse() {
        let v = Vocabulary::new(1, ["a", "a", "b"]).unwrap();
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn blank_and_padded_names_rejected() {
        assert!(matches!(
            Vocabulary::new(1, [""]),
            Err(VocabularyError::InvalidName(_))
        ));
        assert!(matches!(
            Vocabulary::new(1, [" users.read"]),
            Err(VocabularyError::InvalidName(_))
        ));
    }

    #[test]
    fn from_json_validates_entries() {
        let ok = Vocabulary::from_json(r#"{"version": 2, "permissions": ["x"]}"#).unwrap();
        assert_eq!(ok.version(), 2);

        let bad = Vocabulary::from_json(r#"{"version": 2, "permissions": [""]}"#);
        assert!(matches!(bad, Err(VocabularyError::Parse(_))));
    }

    #[test]
    fn retain_known_filters_and_keeps_order() {
        let v = vocab();
        let payload: Vec<Permission> =
            serde_json::from_str(r#"["reports.export", "legacy.thing", "users.read"]"#).unwrap();

        let kept = v.retain_known(&payload);
        let names: Vec<&str> = kept.iter().map(Permission::as_str).collect();
        assert_eq!(names, vec!["reports.export", "users.read"]);
    }

    #[test]
    fn permission_serializes_as_plain_string() {
        let p = vocab().permission("users.read").unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), r#""users.read""#);
    }

    #[test]
    fn permissions_batch_lookup() {
        let v = vocab();
        assert_eq!(v.permissions(["users.read", "users.write"]).unwrap().len(), 2);
        assert!(v.permissions(["users.read", "nope"]).is_err());
    }

    #[test]
    fn error_codes() {
        assert_error_codes(
            &[
                VocabularyError::UnknownPermission {
                    name: "x".into(),
                    version: 1,
                },
                VocabularyError::InvalidName(String::new()),
            ],
            "VOCAB_",
        );
    }
}
