//! Key-value backends for persisted preferences.
//!
//! ```text
//! <storage dir>/
//! ├── admin-preferences.json
//! └── user-preferences.json
//! ```

use parking_lot::Mutex;
use sesame_types::ErrorCode;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by a [`PreferenceStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage directory creation failed.
    #[error("failed to create storage directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be used as a file name.
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn directory_creation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.into(),
            source,
        }
    }
}

impl ErrorCode for StorageError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "STORAGE_IO",
            Self::DirectoryCreation { .. } => "STORAGE_DIRECTORY_CREATION",
            Self::InvalidKey(_) => "STORAGE_INVALID_KEY",
            Self::Unavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Unavailable(_))
    }
}

/// A string-keyed document store.
///
/// Implementations must be thread-safe.
pub trait PreferenceStorage: Send + Sync {
    /// Returns the document stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `document` under `key`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn save(&self, key: &str, document: &str) -> Result<(), StorageError>;
}

/// Process-local storage.
///
/// [`fail_writes`](Self::fail_writes) makes every later `save` fail, for
/// exercising the best-effort persistence path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the storage with a document.
    #[must_use]
    pub fn with_entry(self, key: impl Into<String>, document: impl Into<String>) -> Self {
        self.entries.lock().insert(key.into(), document.into());
        self
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    /// Returns the raw document under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, document: &str) -> Result<(), StorageError> {
        if *self.fail_writes.lock() {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }
        self.entries
            .lock()
            .insert(key.to_string(), document.to_string());
        Ok(())
    }
}

/// One JSON file per key under a base directory.
///
/// Writes go to a hidden temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Creates the storage, creating `base_path` if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DirectoryCreation`] if the directory cannot
    /// be created.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = expand_tilde(&base_path.into());
        if !base_path.exists() {
            std::fs::create_dir_all(&base_path)
                .map_err(|e| StorageError::directory_creation(&base_path, e))?;
        }
        Ok(Self { base_path })
    }

    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the file that holds `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for keys that are empty, start
    /// with a dot, or contain path separators.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{key}.json")))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{key}.json.tmp"))
    }
}

impl PreferenceStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, document: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let temp_path = self.temp_path(key);
        std::fs::write(&temp_path, document)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\'])
        || key.chars().any(char::is_control);
    if bad {
        Err(StorageError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}

/// Expands a leading `~` to the home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
