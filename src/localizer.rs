//! This module provides the `Localizer` struct, the entry point for reading and
//! editing localization files. A `Localizer` maps language codes to files on
//! disk and forwards every key-value operation to the format handler that the
//! file's extension selects.
//!
//! Failures come in two flavors. Caller errors (unknown language, unsupported
//! format, invalid arguments) are always returned as `Err`. Recoverable
//! failures (missing or malformed file, duplicate or missing key) follow the
//! configured [`ErrorPolicy`]: logged and reported as [`Outcome::Skipped`]
//! when lenient, returned as `Err` when strict.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use log::{debug, trace, warn};

use crate::{
    error::Error,
    formats::normalize_extension,
    options::{ErrorPolicy, LocalizerOptions},
    registry::{HandlerId, HandlerRegistry},
    traits::FormatHandler,
    types::{LanguageEntry, Outcome},
};

/// Keeps the language → file mapping and dispatches key-value operations to
/// the registered format handlers.
///
/// # Example
///
/// ```rust,no_run
/// use kvlocale::Localizer;
///
/// let mut localizer = Localizer::new();
/// localizer.create_localization_file("locales", "en", "json")?;
/// localizer.add_key_value_pair("en", "greeting", "hello")?;
///
/// let greeting = localizer.get_localized_string("en", "greeting")?.flatten();
/// assert_eq!(greeting.as_deref(), Some("hello"));
/// # Ok::<(), kvlocale::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Localizer {
    languages: Vec<LanguageEntry>,
    registry: HandlerRegistry,
    options: LocalizerOptions,
}

impl Localizer {
    /// Creates a localizer with the built-in handlers and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a localizer with the built-in handlers and the given options.
    pub fn with_options(options: LocalizerOptions) -> Self {
        Self::with_registry(HandlerRegistry::with_builtin_handlers(), options)
    }

    /// Creates a localizer that dispatches to `registry`.
    pub fn with_registry(registry: HandlerRegistry, options: LocalizerOptions) -> Self {
        Localizer {
            languages: Vec::new(),
            registry,
            options,
        }
    }

    /// Creates a localizer with the built-in handlers and registers every file
    /// in `paths` through [`Localizer::add_localization_file`].
    pub fn from_files<I, P>(paths: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut localizer = Self::new();
        for path in paths {
            localizer.add_localization_file(path)?;
        }
        Ok(localizer)
    }

    pub fn options(&self) -> &LocalizerOptions {
        &self.options
    }

    pub fn set_policy(&mut self, policy: ErrorPolicy) {
        self.options.policy = policy;
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    /// Looks up `key` in the file registered for `language`.
    ///
    /// A missing key is `Outcome::Applied(None)`; a missing or malformed file
    /// is a recoverable failure.
    pub fn get_localized_string(
        &self,
        language: &str,
        key: &str,
    ) -> Result<Outcome<Option<String>>, Error> {
        let (path, handler) = self.resolve_handler(language)?;
        let result = handler.get_localized_string(path, key);
        self.settle("get localized string", language, result)
    }

    /// Creates an empty `<language>.<extension>` file in `directory` and
    /// registers it.
    ///
    /// Fails with [`Error::UnsupportedFormat`] before touching the disk if no
    /// handler serves `extension`, and with [`Error::LanguageAlreadyExists`]
    /// if `language` is taken. An existing file at the target path is kept as
    /// is. Returns the path of the registered file.
    pub fn create_localization_file<P: AsRef<Path>>(
        &mut self,
        directory: P,
        language: &str,
        extension: &str,
    ) -> Result<Outcome<PathBuf>, Error> {
        let normalized = normalize_extension(extension);
        if !self.registry.is_supported(&normalized) {
            return Err(Error::UnsupportedFormat(extension.to_string()));
        }
        if self.contains_language(language) {
            return Err(Error::LanguageAlreadyExists(language.to_string()));
        }
        validate_language_code(language)?;

        let directory = directory.as_ref();
        let path = directory.join(format!("{}.{}", language, normalized));
        let result = create_empty_file(directory, &path, self.options.create_missing_dirs);

        match self.settle("create localization file", language, result)? {
            Outcome::Applied(()) => {
                let entry = LanguageEntry::from_path(&path)?;
                debug!(
                    "Created localization file {} for `{}`",
                    path.display(),
                    entry.language
                );
                self.languages.push(entry);
                Ok(Outcome::Applied(path))
            }
            Outcome::Skipped(err) => Ok(Outcome::Skipped(err)),
        }
    }

    /// Unregisters `language` and deletes its file.
    ///
    /// Best effort: an unknown language or a failed delete is logged and
    /// skipped unless the policy is strict. The mapping is removed even when
    /// deleting the file fails.
    pub fn delete_localization_file(&mut self, language: &str) -> Result<Outcome<()>, Error> {
        let result = match self.remove_localization_file(language) {
            Some(entry) => fs::remove_file(&entry.path)
                .map(|()| debug!("Deleted localization file {}", entry.path.display()))
                .map_err(Error::Io),
            None => Err(Error::LanguageNotFound(language.to_string())),
        };

        match result {
            Ok(()) => Ok(Outcome::Applied(())),
            Err(err) if !self.options.is_strict() => {
                warn!("delete localization file for `{}` skipped: {}", language, err);
                Ok(Outcome::Skipped(err))
            }
            Err(err) => Err(err),
        }
    }

    /// Registers an existing file under the language code derived from its
    /// base name.
    ///
    /// Neither the file's existence nor its extension is checked here; both
    /// surface on the first key-value operation.
    pub fn add_localization_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let entry = LanguageEntry::from_path(path)?;
        if self.contains_language(&entry.language) {
            return Err(Error::LanguageAlreadyExists(entry.language));
        }
        debug!(
            "Registered localization file {} for `{}`",
            entry.path.display(),
            entry.language
        );
        self.languages.push(entry);
        Ok(())
    }

    /// Adds a new key-value pair to the file registered for `language`.
    pub fn add_key_value_pair(
        &self,
        language: &str,
        key: &str,
        value: &str,
    ) -> Result<Outcome<()>, Error> {
        let (path, handler) = self.resolve_handler(language)?;
        let result = handler.add_key_value_pair(path, key, value);
        if result.is_ok() {
            debug!("Added `{}` to {}", key, path.display());
        }
        self.settle("add key-value pair", language, result)
    }

    /// Removes `key` from the file registered for `language`.
    pub fn remove_key_value_pair(&self, language: &str, key: &str) -> Result<Outcome<()>, Error> {
        let (path, handler) = self.resolve_handler(language)?;
        let result = handler.remove_key_value_pair(path, key);
        if result.is_ok() {
            debug!("Removed `{}` from {}", key, path.display());
        }
        self.settle("remove key-value pair", language, result)
    }

    /// Unregisters `language` without touching its file.
    pub fn remove_localization_file(&mut self, language: &str) -> Option<LanguageEntry> {
        let index = self
            .languages
            .iter()
            .position(|entry| entry.language == language)?;
        let entry = self.languages.remove(index);
        debug!(
            "Unregistered localization file {} for `{}`",
            entry.path.display(),
            entry.language
        );
        Some(entry)
    }

    pub fn contains_language(&self, language: &str) -> bool {
        self.entry(language).is_some()
    }

    /// Returns the registered language codes in registration order.
    pub fn languages(&self) -> Vec<String> {
        self.languages
            .iter()
            .map(|entry| entry.language.clone())
            .collect()
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.languages
    }

    /// Returns the file registered for `language`.
    pub fn path_of(&self, language: &str) -> Option<&Path> {
        self.entry(language).map(|entry| entry.path.as_path())
    }

    /// Registers an additional format handler. See [`HandlerRegistry::register`].
    pub fn add_format_handler(&mut self, handler: Box<dyn FormatHandler>) -> HandlerId {
        self.registry.register(handler)
    }

    /// Unregisters a format handler. See [`HandlerRegistry::unregister`].
    pub fn remove_format_handler(&mut self, id: HandlerId) -> Option<Box<dyn FormatHandler>> {
        self.registry.unregister(id)
    }

    fn entry(&self, language: &str) -> Option<&LanguageEntry> {
        self.languages
            .iter()
            .find(|entry| entry.language == language)
    }

    fn resolve_handler(&self, language: &str) -> Result<(&Path, &dyn FormatHandler), Error> {
        let entry = self
            .entry(language)
            .ok_or_else(|| Error::LanguageNotFound(language.to_string()))?;
        let extension = entry.extension();
        let handler = self
            .registry
            .resolve(&extension)
            .ok_or_else(|| Error::UnsupportedFormat(extension.clone()))?;
        trace!(
            "Resolved `{}` handler for {}",
            extension,
            entry.path.display()
        );
        Ok((entry.path.as_path(), handler))
    }

    /// Applies the error policy to the result of a handler operation.
    fn settle<T>(
        &self,
        operation: &str,
        language: &str,
        result: Result<T, Error>,
    ) -> Result<Outcome<T>, Error> {
        match result {
            Ok(value) => Ok(Outcome::Applied(value)),
            Err(err) if err.is_recoverable() && !self.options.is_strict() => {
                warn!("{} for `{}` skipped: {}", operation, language, err);
                Ok(Outcome::Skipped(err))
            }
            Err(err) => Err(err),
        }
    }
}

fn validate_language_code(language: &str) -> Result<(), Error> {
    if language.trim().is_empty()
        || language == "."
        || language == ".."
        || language.chars().any(std::path::is_separator)
    {
        return Err(Error::InvalidLanguageCode(language.to_string()));
    }
    Ok(())
}

/// Creates `path` if it does not exist yet, leaving existing content intact.
fn create_empty_file(directory: &Path, path: &Path, create_missing_dirs: bool) -> Result<(), Error> {
    if create_missing_dirs && !directory.exists() {
        fs::create_dir_all(directory)?;
    }
    OpenOptions::new().append(true).create(true).open(path)?;
    Ok(())
}
