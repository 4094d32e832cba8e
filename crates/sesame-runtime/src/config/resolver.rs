//! Overrides applied on top of the loaded configuration.
//!
//! ```text
//! ConfigLoader.load()  →  SesameConfig (base)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()
//!                              │
//!                              ▼
//!                     SesameConfig (final)
//! ```

use super::SesameConfig;

/// Applies runtime overrides (CLI flags, programmatic settings).
///
/// Only options that were actually given should be applied.
pub trait ConfigResolver {
    fn apply(&self, config: &mut SesameConfig);
}

/// Resolver that changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResolver;

impl ConfigResolver for NoOpResolver {
    fn apply(&self, _config: &mut SesameConfig) {}
}
