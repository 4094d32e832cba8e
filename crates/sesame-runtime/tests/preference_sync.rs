//! Integration tests for preference persistence and locale propagation.
//!
//! Runs the full core against real files: mutations must reach the
//! localization engine in the same call, survive a restart, and never
//! write more than the two persisted fields.

mod common;

use common::{core_in, stored_envelope};
use sesame_runtime::l10n::{InMemoryLocalization, LocalizationEngine};
use sesame_types::Locale;
use std::sync::Arc;
use tempfile::TempDir;

const KEY: &str = "admin-preferences";

#[test]
fn locale_change_reaches_engine_synchronously() {
    let dir = TempDir::new().unwrap();
    let engine = Arc::new(InMemoryLocalization::ready());
    let core = core_in(&dir, engine.clone());
    assert_eq!(engine.active_language(), Some(Locale::Uz));

    core.preferences().set_locale(Locale::Ru);
    assert_eq!(engine.active_language(), Some(Locale::Ru));
    assert_eq!(engine.switches(), vec![Locale::Uz, Locale::Ru]);
}

#[test]
fn restart_restores_and_reinitializes_engine() {
    let dir = TempDir::new().unwrap();
    {
        let core = core_in(&dir, Arc::new(InMemoryLocalization::ready()));
        core.preferences().set_locale(Locale::En);
        core.preferences().set_sidebar_open(false);
    }

    let engine = Arc::new(InMemoryLocalization::ready());
    let core = core_in(&dir, engine.clone());
    let prefs = core.preferences().snapshot();
    assert!(prefs.restored);
    assert_eq!(prefs.locale, Locale::En);
    assert!(!prefs.sidebar_open);
    assert_eq!(engine.active_language(), Some(Locale::En));
}

#[test]
fn persisted_snapshot_holds_only_latest_two_fields() {
    let dir = TempDir::new().unwrap();
    let core = core_in(&dir, Arc::new(InMemoryLocalization::ready()));
    let prefs = core.preferences();

    let steps: [(Option<bool>, Option<Locale>); 5] = [
        (Some(false), None),
        (None, Some(Locale::Ru)),
        (Some(true), Some(Locale::En)),
        (None, Some(Locale::Uz)),
        (Some(false), None),
    ];

    for (sidebar, locale) in steps {
        if let Some(open) = sidebar {
            prefs.set_sidebar_open(open);
        }
        if let Some(locale) = locale {
            prefs.set_locale(locale);
        }

        let doc = stored_envelope(&dir, KEY);
        assert_eq!(doc["version"], 1);
        let state = doc["state"].as_object().unwrap();
        assert_eq!(state.len(), 2, "unexpected fields: {state:?}");
        assert_eq!(state["sidebarOpen"], prefs.sidebar_open());
        assert_eq!(state["locale"], prefs.locale().code());
    }
}

#[test]
fn corrupt_file_reverts_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{KEY}.json")), "{\"version\":1,").unwrap();

    let core = core_in(&dir, Arc::new(InMemoryLocalization::ready()));
    let prefs = core.preferences().snapshot();
    assert!(!prefs.restored);
    assert_eq!(prefs.locale, Locale::Uz);

    core.preferences().toggle_sidebar();
    assert_eq!(stored_envelope(&dir, KEY)["state"]["sidebarOpen"], false);
}

#[test]
fn late_engine_initialization_catches_up() {
    let dir = TempDir::new().unwrap();
    let engine = Arc::new(InMemoryLocalization::new());
    let core = core_in(&dir, engine.clone());

    core.preferences().set_locale(Locale::Ru);
    assert_eq!(engine.active_language(), None);
    assert_eq!(core.synchronizer().pending(), Some(Locale::Ru));

    engine.initialize();
    assert!(core.synchronizer().flush_pending());
    assert_eq!(engine.active_language(), Some(Locale::Ru));
}
