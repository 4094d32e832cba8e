//! Runtime layer for sesame clients.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`preferences`] | [`PreferenceStore`](preferences::PreferenceStore), persistence boundary, storage backends |
//! | [`l10n`] | [`LocalizationEngine`](l10n::LocalizationEngine) contract, [`LocaleSynchronizer`](l10n::LocaleSynchronizer) |
//! | [`config`] | Layered [`SesameConfig`](config::SesameConfig) loading |
//! | [`vocabulary`] | Reading the permission vocabulary file |
//!
//! [`ClientCore`] wires all of them together with the session store and
//! route guard from `sesame-auth`.

mod client;
pub mod config;
pub mod l10n;
pub mod preferences;
pub mod vocabulary;

pub use client::{ClientCore, ClientCoreBuilder, CoreError};
pub use config::{ConfigError, ConfigLoader, SesameConfig};
pub use vocabulary::load_vocabulary;
