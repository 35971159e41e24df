//! All error types for the kvlocale crate.
//!
//! Errors fall into two classes. Caller errors (unknown language, unsupported
//! format, malformed arguments) are always returned to the caller. Recoverable
//! errors (I/O, malformed files, duplicate or missing keys) are subject to the
//! [`ErrorPolicy`](crate::options::ErrorPolicy) of the [`Localizer`](crate::Localizer).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("language already exists: {0}")]
    LanguageAlreadyExists(String),

    #[error("language not found: {0}")]
    LanguageNotFound(String),

    #[error("invalid language code `{0}`")]
    InvalidLanguageCode(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    #[error("key `{key}` already exists in {}", .path.display())]
    DuplicateKey { key: String, path: PathBuf },

    #[error("key `{key}` not found in {}", .path.display())]
    KeyNotFound { key: String, path: PathBuf },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Creates a new duplicate key error.
    pub fn duplicate_key(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::DuplicateKey {
            key: key.into(),
            path: path.into(),
        }
    }

    /// Creates a new key not found error.
    pub fn key_not_found(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::KeyNotFound {
            key: key.into(),
            path: path.into(),
        }
    }

    /// Returns `true` for conditions a lenient caller may treat as a no-op:
    /// file system failures, malformed files, and duplicate or missing keys.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::DuplicateKey { .. }
                | Error::KeyNotFound { .. }
                | Error::Parse(_)
                | Error::Io(_)
                | Error::InvalidData(_)
        )
    }
}
