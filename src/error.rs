//! Error types for the preference store and its backends.

use std::path::PathBuf;

/// Errors surfaced by the preference layer.
///
/// A missing backend or a missing key is never an error: the store treats
/// both as "no stored preference" and falls back to the default scheme.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// Text that is neither `"light"` nor `"dark"`.
    #[error("invalid color scheme '{0}' (expected 'light' or 'dark')")]
    InvalidValue(String),

    #[error("failed to access preference file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preference file {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, PreferenceError>;
