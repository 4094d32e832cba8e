//! Machine-readable error codes.
//!
//! Every error enum in the workspace implements [`ErrorCode`]. Codes are
//! `UPPER_SNAKE_CASE`, prefixed by the owning module (`VOCAB_`, `STORAGE_`,
//! `L10N_`, `CONFIG_`), and stable once published.
//!
//! # Example
//!
//! ```
//! use sesame_types::ErrorCode;
//!
//! enum FetchError {
//!     Offline,
//!     Rejected,
//! }
//!
//! impl ErrorCode for FetchError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Offline => "FETCH_OFFLINE",
//!             Self::Rejected => "FETCH_REJECTED",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Offline)
//!     }
//! }
//!
//! assert_eq!(FetchError::Offline.code(), "FETCH_OFFLINE");
//! assert!(!FetchError::Rejected.is_recoverable());
//! ```

/// Stable error code plus recoverability for an error value.
pub trait ErrorCode {
    /// Returns the `UPPER_SNAKE_CASE` code for this error.
    fn code(&self) -> &'static str;

    /// Returns `true` if retrying, or a user action, may clear the error.
    ///
    /// Corrupt input and unknown identifiers are not recoverable; an
    /// unavailable backend or an engine that has not finished loading is.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that `err` carries a well-formed code starting with `expected_prefix`.
///
/// Intended for tests.
///
/// # Panics
///
/// Panics if the code is empty, lacks the prefix, or is not `UPPER_SNAKE_CASE`.
///
/// ```
/// use sesame_types::{assert_error_code, ErrorCode};
///
/// struct Boom;
/// impl ErrorCode for Boom {
///     fn code(&self) -> &'static str { "TEST_BOOM" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Boom, "TEST_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();
    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Runs [`assert_error_code`] over every variant sample in `errors`.
///
/// # Panics
///
/// Panics on the first malformed code.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
        && s
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
