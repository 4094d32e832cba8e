//! User preferences: state, persistence boundary and storage.
//!
//! ```text
//! setter ──► Store<PreferenceState> ──► subscribers
//!                    │
//!                    └─ project() ──► PreferenceEnvelope ──► PreferenceStorage
//!
//! startup:  PreferenceStorage ──► PreferenceEnvelope ──► hydrate() ──► Store
//! ```

mod persist;
mod state;
mod storage;
mod store;

pub use persist::{hydrate, project, PersistedPreferences, PreferenceEnvelope, PREFERENCES_VERSION};
pub use state::PreferenceState;
pub use storage::{FileStorage, MemoryStorage, PreferenceStorage, StorageError};
pub use store::PreferenceStore;
