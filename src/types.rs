//! Core types shared by the [`Localizer`](crate::Localizer) and its callers.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, formats::extension_of};

/// A registered localization file: its language code and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageEntry {
    /// The language code, i.e. the file name without its extension (e.g. "en").
    pub language: String,

    /// The path of the localization file.
    pub path: PathBuf,
}

impl LanguageEntry {
    /// Builds an entry whose language code is the base name of `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let language = language_code_from_path(path)?;
        Ok(LanguageEntry {
            language,
            path: path.to_path_buf(),
        })
    }

    /// The normalized extension of the file, used to pick its handler.
    pub fn extension(&self) -> String {
        extension_of(&self.path)
    }

    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.language.parse().ok()
    }
}

/// Derives the language code from a file path: `locales/en.json` → `en`.
pub fn language_code_from_path(path: &Path) -> Result<String, Error> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::InvalidPath(format!(
                "cannot derive a language code from {}",
                path.display()
            ))
        })
}

/// The result of an operation that ran under a lenient
/// [`ErrorPolicy`](crate::options::ErrorPolicy).
///
/// Caller errors never end up here; they are returned as `Err` instead.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The operation completed.
    Applied(T),
    /// The operation was a no-op because of a recoverable condition
    /// (missing or malformed file, duplicate or missing key).
    Skipped(Error),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    /// Returns the value of an applied operation.
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Skipped(_) => None,
        }
    }

    /// Returns the reason an operation was skipped.
    pub fn skipped_reason(&self) -> Option<&Error> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Skipped(err) => Some(err),
        }
    }

    /// Converts back into a plain result, treating a skip as an error.
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Outcome::Applied(value) => Ok(value),
            Outcome::Skipped(err) => Err(err),
        }
    }
}

impl<T> Outcome<Option<T>> {
    /// Collapses a lookup outcome: skipped lookups read as absent.
    pub fn flatten(self) -> Option<T> {
        self.applied().flatten()
    }
}
