//! Support for line-based `key: value` localization files.
//!
//! Every line containing a colon is an entry; the first colon separates the
//! key from the value and both sides are trimmed. Other lines are carried
//! through rewrites untouched but never match a key.

use std::{
    fs::{self, OpenOptions},
    io::{BufRead, Write},
    path::Path,
};

use crate::{
    error::Error,
    traits::{FormatHandler, Parser},
};

pub const EXTENSION: &str = "txt";

/// The lines of a TXT localization file, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxtDocument {
    pub lines: Vec<String>,
}

/// Splits a line into its trimmed key and value, if it is an entry.
pub fn split_entry(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}

/// Formats an entry the way it is stored on disk, without the line break.
pub fn format_entry(key: &str, value: &str) -> String {
    format!("{}: {}", key, value)
}

fn keys_match_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl TxtDocument {
    /// Iterates over all `(key, value)` entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| split_entry(line))
    }

    /// Returns the value of the first entry whose key matches `key` ignoring case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .find(|(current, _)| keys_match_ignore_case(current, key))
            .map(|(_, value)| value)
    }

    /// Returns `true` if an entry matches `key` ignoring case, the same
    /// comparison [`TxtDocument::get`] uses.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn push(&mut self, key: &str, value: &str) {
        self.lines.push(format_entry(key, value));
    }

    /// Removes every entry whose key equals `key` exactly and returns how many
    /// lines were dropped.
    pub fn remove_all(&mut self, key: &str) -> usize {
        let before = self.lines.len();
        self.lines
            .retain(|line| !matches!(split_entry(line), Some((current, _)) if current == key));
        before - self.lines.len()
    }
}

impl Parser for TxtDocument {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        if let Some(first) = lines.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }
        Ok(TxtDocument { lines })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

/// Rejects pairs that cannot be stored as a single `key: value` line.
fn validate_entry(key: &str, value: &str) -> Result<(), Error> {
    if key.is_empty() {
        return Err(Error::InvalidEntry("key must not be empty".to_string()));
    }
    if key.contains(':') {
        return Err(Error::InvalidEntry(format!(
            "key `{}` must not contain ':'",
            key
        )));
    }
    if key.contains(['\n', '\r']) || value.contains(['\n', '\r']) {
        return Err(Error::InvalidEntry(format!(
            "entry `{}` must fit on a single line",
            key
        )));
    }
    if value != value.trim() {
        return Err(Error::InvalidEntry(format!(
            "value of `{}` must not start or end with whitespace",
            key
        )));
    }
    Ok(())
}

/// Handler for `.txt` localization files.
///
/// Keys are trimmed before use, since the format trims them on read.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxtHandler;

impl FormatHandler for TxtHandler {
    fn extension(&self) -> &str {
        EXTENSION
    }

    fn get_localized_string(&self, path: &Path, key: &str) -> Result<Option<String>, Error> {
        let document = TxtDocument::read_from(path)?;
        Ok(document.get(key.trim()).map(str::to_string))
    }

    fn add_key_value_pair(&self, path: &Path, key: &str, value: &str) -> Result<(), Error> {
        let key = key.trim();
        validate_entry(key, value)?;

        let content = fs::read_to_string(path)?;
        let document = TxtDocument::from_str(&content)?;
        if document.contains_key(key) {
            return Err(Error::duplicate_key(key, path));
        }

        let mut line = String::new();
        if !content.is_empty() && !content.ends_with('\n') {
            line.push('\n');
        }
        line.push_str(&format_entry(key, value));
        line.push('\n');

        let mut file = OpenOptions::new().append(true).open(path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn remove_key_value_pair(&self, path: &Path, key: &str) -> Result<(), Error> {
        let key = key.trim();
        let mut document = TxtDocument::read_from(path)?;
        if document.remove_all(key) == 0 {
            return Err(Error::key_not_found(key, path));
        }
        document.write_to(path)
    }
}
