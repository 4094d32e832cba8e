//! sesame CLI - offline inspection of the client authorization core
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SESAME_*`)
//! 3. Project config (`.sesame/config.toml` in current directory)
//! 4. Global config (`~/.sesame/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Logging
//!
//! Logs go to stderr. `-d` enables `debug`, `-v` enables `info`; otherwise
//! `SESAME_LOG`, then `RUST_LOG`, then `warn`.

mod commands;
mod session_file;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sesame_runtime::config::{AppKind, ConfigLoader, ConfigResolver, SesameConfig};
use sesame_runtime::ClientCore;
use sesame_types::Locale;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// sesame - client authorization and preference core
#[derive(Parser, Debug)]
#[command(name = "sesame")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    /// Application whose preferences and identities are used
    #[arg(long, global = true, value_enum)]
    app: Option<AppArg>,

    /// Preference storage directory
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Permission vocabulary file (JSON or TOML)
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    /// Redirect target for unauthenticated navigation
    #[arg(long, global = true)]
    login_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect or change persisted preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Evaluate permissions for an identity
    Check {
        /// Identity or session JSON file
        #[arg(long)]
        identity: PathBuf,

        /// Require exactly this permission
        #[arg(long, conflicts_with_all = ["any", "all"])]
        require: Option<String>,

        /// Require at least one of these permissions
        #[arg(long, num_args = 1.., conflicts_with = "all")]
        any: Option<Vec<String>>,

        /// Require every one of these permissions
        #[arg(long, num_args = 1..)]
        all: Option<Vec<String>>,
    },
    /// Run the route guard for an identity
    Guard {
        /// Identity or session JSON file; anonymous when omitted
        #[arg(long)]
        identity: Option<PathBuf>,

        /// Permission the target route requires
        #[arg(long)]
        require: Vec<String>,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    /// Show current preferences
    Show {
        /// Print the persisted shape as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the UI locale
    SetLocale {
        /// uz, ru or en
        locale: Locale,
    },
    /// Open or close the sidebar
    Sidebar { state: SidebarArg },
    /// Flip the sidebar state
    ToggleSidebar,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AppArg {
    Admin,
    User,
}

impl From<AppArg> for AppKind {
    fn from(arg: AppArg) -> Self {
        match arg {
            AppArg::Admin => Self::Admin,
            AppArg::User => Self::User,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SidebarArg {
    Open,
    Closed,
}

/// CLI argument overrides, applied as the highest-priority layer.
#[derive(Debug, Default)]
struct CliOverrides {
    app: Option<AppKind>,
    storage_dir: Option<PathBuf>,
    vocabulary: Option<PathBuf>,
    login_path: Option<String>,
}

impl CliOverrides {
    fn from_args(args: &Args) -> Self {
        Self {
            app: args.app.map(AppKind::from),
            storage_dir: args.storage_dir.clone(),
            vocabulary: args.vocabulary.clone(),
            login_path: args.login_path.clone(),
        }
    }
}

impl ConfigResolver for CliOverrides {
    fn apply(&self, config: &mut SesameConfig) {
        if let Some(app) = self.app {
            config.app = app;
        }
        if let Some(ref dir) = self.storage_dir {
            config.storage.dir = Some(dir.clone());
        }
        if let Some(ref path) = self.vocabulary {
            config.vocabulary.path = Some(path.clone());
        }
        if let Some(ref path) = self.login_path {
            config.guard.login_path.clone_from(path);
        }
    }
}

fn init_tracing(args: &Args) {
    // --debug > --verbose > SESAME_LOG > RUST_LOG > "warn"
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_env("SESAME_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(layer).init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args);

    let project_root = args.project.clone().unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to get current directory, using '.'");
            PathBuf::from(".")
        })
    });
    info!(path = %project_root.display(), "Project root");

    let config = ConfigLoader::new()
        .with_project_root(&project_root)
        .load()
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    let overrides = CliOverrides::from_args(&args);

    if let Command::Config = args.command {
        let mut config = config;
        overrides.apply(&mut config);
        print!("{}", config.to_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let core = ClientCore::builder(config)
        .with_resolver(overrides)
        .build()?;

    commands::run(&core, args.command)
}
