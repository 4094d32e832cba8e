//! Subcommand handlers.

use crate::session_file::IdentityFile;
use crate::{Command, PrefsAction, SidebarArg};
use anyhow::{bail, Result};
use sesame_auth::{GuardDecision, Requirement};
use sesame_runtime::preferences::{project, PreferenceStore};
use sesame_runtime::ClientCore;
use sesame_types::{Permission, Vocabulary};
use std::path::Path;
use std::process::ExitCode;

pub fn run(core: &ClientCore, command: Command) -> Result<ExitCode> {
    match command {
        Command::Prefs { action } => prefs(core.preferences(), action),
        Command::Check {
            identity,
            require,
            any,
            all,
        } => check(core, &identity, require, any, all),
        Command::Guard {
            identity,
            require,
            json,
        } => guard(core, identity.as_deref(), &require, json),
        // Handled before the core is built.
        Command::Config => Ok(ExitCode::SUCCESS),
    }
}

fn prefs(store: &PreferenceStore, action: PrefsAction) -> Result<ExitCode> {
    match action {
        PrefsAction::Show { json } => {
            let state = store.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&project(&state))?);
            } else {
                println!("key: {}", store.key());
                println!("locale: {}", state.locale);
                println!("sidebar: {}", sidebar_label(state.sidebar_open));
                println!("restored: {}", state.restored);
            }
        }
        PrefsAction::SetLocale { locale } => {
            store.set_locale(locale);
            println!("locale: {locale}");
        }
        PrefsAction::Sidebar { state } => {
            store.set_sidebar_open(matches!(state, SidebarArg::Open));
            println!("sidebar: {}", sidebar_label(store.sidebar_open()));
        }
        PrefsAction::ToggleSidebar => {
            let open = store.toggle_sidebar();
            println!("sidebar: {}", sidebar_label(open));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn sidebar_label(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

fn check(
    core: &ClientCore,
    identity: &Path,
    require: Option<String>,
    any: Option<Vec<String>>,
    all: Option<Vec<String>>,
) -> Result<ExitCode> {
    let file = IdentityFile::read(identity)?;

    let (names, build): (Vec<String>, fn(Vec<Permission>) -> Requirement) =
        match (require, any, all) {
            (Some(one), None, None) => (vec![one], |mut ps: Vec<Permission>| {
                ps.pop().map_or(Requirement::None, Requirement::One)
            }),
            (None, Some(any), None) => (any, Requirement::Any),
            (None, None, Some(all)) => (all, Requirement::All),
            _ => bail!("exactly one of --require, --any or --all is required"),
        };

    let mut known = names.clone();
    known.extend(file.permission_names());
    let vocabulary = resolve_vocabulary(core, &known)?;
    let requirement = build(vocabulary.permissions(names.iter().map(String::as_str))?);

    file.apply(core.session());
    let granted = core.session().satisfies(&requirement);
    println!("{}", if granted { "granted" } else { "denied" });

    Ok(if granted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn guard(
    core: &ClientCore,
    identity: Option<&Path>,
    require: &[String],
    json: bool,
) -> Result<ExitCode> {
    let file = identity.map(IdentityFile::read).transpose()?;

    let requirement = if require.is_empty() {
        Requirement::None
    } else {
        let mut known = require.to_vec();
        if let Some(ref file) = file {
            known.extend(file.permission_names());
        }
        let vocabulary = resolve_vocabulary(core, &known)?;
        Requirement::All(vocabulary.permissions(require.iter().map(String::as_str))?)
    };

    if let Some(file) = file {
        file.apply(core.session());
    }
    let decision = core.check_navigation(&requirement);

    if json {
        println!("{}", serde_json::to_string(&decision)?);
    } else {
        match &decision {
            GuardDecision::Allow => println!("allow"),
            GuardDecision::Redirect { to } => println!("redirect {to}"),
            GuardDecision::Forbidden => println!("forbidden"),
        }
    }

    Ok(if decision.is_allowed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// The configured vocabulary, or one made of every name in play.
fn resolve_vocabulary(core: &ClientCore, names: &[String]) -> Result<Vocabulary> {
    match core.vocabulary() {
        Some(v) => Ok(v.clone()),
        None => {
            tracing::debug!("no vocabulary configured, accepting names as given");
            Ok(Vocabulary::new(0, names.iter().cloned())?)
        }
    }
}
