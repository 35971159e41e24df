//! Traits for format-specific parsing and key-value access in kvlocale.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing and writing one localization document from/to one file.
///
/// # Example
///
/// ```rust,no_run
/// use kvlocale::traits::Parser;
/// let document = kvlocale::formats::TxtDocument::read_from("fr.txt")?;
/// document.write_to("fr_copy.txt")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path, replacing its previous content.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

/// Reads and mutates single key-value pairs of localization files in one format.
///
/// Implementations report every failure as an [`Error`]. Whether a failure
/// reaches the caller is decided by the [`Localizer`](crate::Localizer) that
/// dispatches to the handler.
pub trait FormatHandler: Send + Sync {
    /// The file extension this handler reads and writes, without the leading dot.
    fn extension(&self) -> &str;

    /// Returns the value stored under `key`, or `None` when the key is missing.
    fn get_localized_string(&self, path: &Path, key: &str) -> Result<Option<String>, Error>;

    /// Inserts a new entry. Fails with [`Error::DuplicateKey`] if `key` already exists.
    fn add_key_value_pair(&self, path: &Path, key: &str, value: &str) -> Result<(), Error>;

    /// Deletes the entry for `key`. Fails with [`Error::KeyNotFound`] if there is none.
    fn remove_key_value_pair(&self, path: &Path, key: &str) -> Result<(), Error>;
}

impl std::fmt::Debug for dyn FormatHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatHandler")
            .field("extension", &self.extension())
            .finish()
    }
}
