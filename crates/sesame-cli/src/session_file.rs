//! Identity files passed to `check` and `guard`.
//!
//! Two shapes are accepted. A bare identity payload, as the backend
//! returns it after login, is treated as a completed login:
//!
//! ```json
//! { "kind": "staff", "id": 1, "displayName": "N", "loginHandle": "n", "permissions": ["a.read"] }
//! ```
//!
//! A session document replays individual transitions, so partially
//! authenticated states can be reproduced:
//!
//! ```json
//! { "token": "abc", "identity": { "kind": "user", ... }, "authenticated": false }
//! ```

use anyhow::{Context, Result};
use sesame_auth::SessionStore;
use sesame_types::Identity;
use serde::Deserialize;
use std::path::Path;

const CLI_TOKEN: &str = "sesame-cli";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionDocument {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub authenticated: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdentityFile {
    Identity(Identity),
    Session(SessionDocument),
}

impl IdentityFile {
    pub fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read identity file '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse identity file '{}'", path.display()))
    }

    /// Replays this file onto `session`.
    pub fn apply(self, session: &SessionStore) {
        match self {
            Self::Identity(identity) => session.login(CLI_TOKEN, identity),
            Self::Session(doc) => match (doc.authenticated, doc.token, doc.identity) {
                (true, Some(token), Some(identity)) => session.login(token, identity),
                (authenticated, token, identity) => {
                    if authenticated {
                        tracing::warn!("'authenticated' needs both token and identity, ignoring");
                    }
                    if let Some(token) = token {
                        session.set_token(token);
                    }
                    if let Some(identity) = identity {
                        session.set_user(identity);
                    }
                }
            },
        }
    }

    /// Permission names carried by the identity, if any.
    pub fn permission_names(&self) -> Vec<String> {
        let identity = match self {
            Self::Identity(identity) => Some(identity),
            Self::Session(doc) => doc.identity.as_ref(),
        };
        identity
            .map(|i| i.permissions().iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }
}
