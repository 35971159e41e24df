#![forbid(unsafe_code)]
//! Key-value localization store for Rust.
//!
//! Keeps one localization file per language (`en.json`, `fr.txt`, ...) and
//! reads, adds, and removes single entries in them. Every file operation goes
//! through a [`FormatHandler`] picked by the file's extension.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kvlocale::{Localizer, Outcome};
//!
//! let mut localizer = Localizer::new();
//! localizer.create_localization_file("locales", "fr", "txt")?;
//!
//! if let Outcome::Skipped(reason) = localizer.add_key_value_pair("fr", "greeting", "bonjour")? {
//!     eprintln!("nothing written: {reason}");
//! }
//!
//! let greeting = localizer.get_localized_string("fr", "greeting")?.flatten();
//! assert_eq!(greeting.as_deref(), Some("bonjour"));
//! # Ok::<(), kvlocale::Error>(())
//! ```
//!
//! # Supported Formats
//!
//! - **JSON** (`.json`): a single flat object of string keys and values
//! - **TXT** (`.txt`): one `key: value` entry per line
//!
//! Additional formats plug in through [`FormatHandler`] and
//! [`Localizer::add_format_handler`].

pub mod error;
pub mod formats;
pub mod localizer;
pub mod options;
pub mod registry;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formats::{JsonHandler, TxtHandler},
    localizer::Localizer,
    options::{ErrorPolicy, LocalizerOptions},
    registry::{HandlerId, HandlerRegistry},
    traits::FormatHandler,
    types::{LanguageEntry, Outcome},
};
