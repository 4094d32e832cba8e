//! Loading the permission vocabulary from the schema package export.

use crate::config::ConfigError;
use sesame_types::Vocabulary;
use std::path::Path;
use tracing::debug;

/// Reads a vocabulary file.
///
/// Files ending in `.toml` are parsed as TOML; everything else as JSON.
/// Both carry the same shape:
///
/// ```json
/// { "version": 12, "permissions": ["orders.read", "orders.refund"] }
/// ```
///
/// # Errors
///
/// Returns [`ConfigError::ReadFile`] if the file cannot be read,
/// [`ConfigError::ParseToml`] for malformed TOML and
/// [`ConfigError::Vocabulary`] for malformed JSON or invalid entries.
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let vocabulary = if is_toml {
        toml::from_str::<Vocabulary>(&content).map_err(|e| ConfigError::parse_toml(path, e))?
    } else {
        Vocabulary::from_json(&content).map_err(|e| ConfigError::vocabulary(path, e))?
    };

    debug!(
        path = %path.display(),
        version = vocabulary.version(),
        permissions = vocabulary.len(),
        "Loaded permission vocabulary"
    );
    Ok(vocabulary)
}
