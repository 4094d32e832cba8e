//! Localization engine contract and the locale synchronizer.

mod engine;
mod memory;
mod sync;

pub use engine::{LocalizationEngine, LocalizationError};
pub use memory::InMemoryLocalization;
pub use sync::LocaleSynchronizer;
