//! Shared E2E test helpers for `sesame` binary tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Variables that would leak host configuration into a test run.
const SESAME_VARS: &[&str] = &[
    "SESAME_APP",
    "SESAME_LOGIN_PATH",
    "SESAME_STORAGE_DIR",
    "SESAME_VOCABULARY",
    "SESAME_DEFAULT_LOCALE",
    "SESAME_LOG",
    "RUST_LOG",
];

/// An isolated home, project root and storage directory for one test.
pub struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create sandbox dir");
        for dir in ["home", "project", "prefs"] {
            std::fs::create_dir_all(root.path().join(dir)).expect("create sandbox subdir");
        }
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn prefs_dir(&self) -> PathBuf {
        self.root.path().join("prefs")
    }

    pub fn project_dir(&self) -> PathBuf {
        self.root.path().join("project")
    }

    /// Writes `content` to `name` under the sandbox and returns the path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write sandbox file");
        path
    }

    /// Reads the stored preference document for `key` as JSON.
    pub fn stored(&self, key: &str) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.prefs_dir().join(format!("{key}.json")))
            .expect("read preference file");
        serde_json::from_str(&raw).expect("parse preference file")
    }

    /// Command for the `sesame` binary confined to this sandbox.
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd: assert_cmd::Command = cargo_bin_cmd!("sesame");
        cmd.timeout(TIMEOUT_BASIC);
        for var in SESAME_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.root.path().join("home"));
        cmd.args(["-C", self.project_dir().to_str().expect("valid utf8")]);
        cmd.args(["--storage-dir", self.prefs_dir().to_str().expect("valid utf8")]);
        cmd
    }
}

pub const STAFF_IDENTITY: &str = r#"{
    "kind": "staff",
    "id": 7,
    "displayName": "Nodira",
    "loginHandle": "nodira",
    "permissions": ["orders.read", "orders.refund"]
}"#;

pub const VOCABULARY: &str = r#"{
    "version": 5,
    "permissions": ["orders.read", "orders.refund", "users.read", "users.write"]
}"#;
