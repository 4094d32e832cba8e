//! E2E tests for `sesame prefs`.

mod common;

use common::Sandbox;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

#[test]
fn show_defaults() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(contains("key: admin-preferences"))
        .stdout(contains("locale: uz"))
        .stdout(contains("sidebar: open"))
        .stdout(contains("restored: false"));
}

#[test]
fn set_locale_persists_across_runs() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["prefs", "set-locale", "ru"])
        .assert()
        .success()
        .stdout(contains("locale: ru"));

    let doc = sandbox.stored("admin-preferences");
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["state"]["locale"], "ru");
    assert_eq!(doc["state"].as_object().unwrap().len(), 2);

    sandbox
        .cmd()
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(contains("locale: ru"))
        .stdout(contains("restored: true"));
}

#[test]
fn sidebar_and_toggle() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["prefs", "sidebar", "closed"])
        .assert()
        .success()
        .stdout(contains("sidebar: closed"));
    sandbox
        .cmd()
        .args(["prefs", "toggle-sidebar"])
        .assert()
        .success()
        .stdout(contains("sidebar: open"));

    assert_eq!(sandbox.stored("admin-preferences")["state"]["sidebarOpen"], true);
}

#[test]
fn show_json_has_only_persisted_fields() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["prefs", "show", "--json"])
        .assert()
        .success()
        .stdout(contains("\"sidebarOpen\": true"))
        .stdout(contains("\"locale\": \"uz\""))
        .stdout(contains("restored").not());
}

#[test]
fn user_app_uses_its_own_key() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["--app", "user", "prefs", "set-locale", "en"])
        .assert()
        .success();

    assert_eq!(sandbox.stored("user-preferences")["state"]["locale"], "en");
    assert!(!sandbox.prefs_dir().join("admin-preferences.json").exists());
}

#[test]
fn unsupported_locale_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["prefs", "set-locale", "de"])
        .assert()
        .failure()
        .stderr(contains("unsupported locale"));
}

#[test]
fn debug_flag_logs_locale_switch() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["-d", "prefs", "set-locale", "ru"])
        .assert()
        .success()
        .stderr(contains("localization language switched"));
}
