//! Shared fixtures for sesame-runtime integration tests.

use sesame_runtime::config::SesameConfig;
use sesame_runtime::l10n::InMemoryLocalization;
use sesame_runtime::preferences::FileStorage;
use sesame_runtime::ClientCore;
use std::sync::Arc;
use tempfile::TempDir;

/// Builds a core backed by file storage in `dir`.
pub fn core_in(dir: &TempDir, engine: Arc<InMemoryLocalization>) -> ClientCore {
    let storage = FileStorage::new(dir.path()).expect("create file storage");
    ClientCore::builder(SesameConfig::default())
        .with_storage(Arc::new(storage))
        .with_localization(engine)
        .build()
        .expect("build client core")
}

/// Reads the stored preference envelope as JSON.
pub fn stored_envelope(dir: &TempDir, key: &str) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.path().join(format!("{key}.json")))
        .expect("read preference file");
    serde_json::from_str(&raw).expect("parse preference file")
}
