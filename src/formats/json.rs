//! Support for flat JSON localization files.
//!
//! A file holds a single JSON object mapping keys to string values. An empty
//! file is treated as an empty object so freshly created files can be filled.

use std::{
    io::{BufRead, Write},
    path::Path,
};

use serde_json::{Map, Value};

use crate::{
    error::Error,
    traits::{FormatHandler, Parser},
};

pub const EXTENSION: &str = "json";

/// The parsed content of a JSON localization file, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonDocument {
    pub entries: Map<String, Value>,
}

impl JsonDocument {
    /// Returns the value for `key`. Non-string scalars are returned as their
    /// JSON text; `null` counts as missing.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.entries.get(key)? {
            Value::Null => None,
            Value::String(value) => Some(value.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a new string entry. Returns `false` and leaves the document
    /// untouched if `key` already holds a value. A `null` slot reads as
    /// missing, so it is filled in place.
    pub fn insert(&mut self, key: &str, value: &str) -> bool {
        if !matches!(self.entries.get(key), None | Some(Value::Null)) {
            return false;
        }
        self.entries
            .insert(key.to_string(), Value::String(value.to_string()));
        true
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Parser for JsonDocument {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let content = content.trim_start_matches('\u{feff}');
        if content.trim().is_empty() {
            return Ok(JsonDocument::default());
        }

        match serde_json::from_str::<Value>(content)? {
            Value::Object(entries) => Ok(JsonDocument { entries }),
            other => Err(Error::InvalidData(format!(
                "expected a JSON object at the top level, found {}",
                value_kind(&other)
            ))),
        }
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Handler for `.json` localization files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHandler;

impl FormatHandler for JsonHandler {
    fn extension(&self) -> &str {
        EXTENSION
    }

    fn get_localized_string(&self, path: &Path, key: &str) -> Result<Option<String>, Error> {
        Ok(JsonDocument::read_from(path)?.get(key))
    }

    fn add_key_value_pair(&self, path: &Path, key: &str, value: &str) -> Result<(), Error> {
        let mut document = JsonDocument::read_from(path)?;
        if !document.insert(key, value) {
            return Err(Error::duplicate_key(key, path));
        }
        document.write_to(path)
    }

    fn remove_key_value_pair(&self, path: &Path, key: &str) -> Result<(), Error> {
        let mut document = JsonDocument::read_from(path)?;
        if !document.remove(key) {
            return Err(Error::key_not_found(key, path));
        }
        document.write_to(path)
    }
}
