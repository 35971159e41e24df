//! All supported localization file formats for kvlocale.
//!
//! This module re-exports the document and handler types for each format and
//! provides [`BUILTIN_HANDLERS`], the table every default registry is built from.

pub mod json;
pub mod txt;

use std::path::Path;

// Reexporting the formats for easier access
pub use json::{JsonDocument, JsonHandler};
pub use txt::{TxtDocument, TxtHandler};

use crate::traits::FormatHandler;

/// Creates a fresh instance of a built-in handler.
pub type HandlerConstructor = fn() -> Box<dyn FormatHandler>;

fn new_json_handler() -> Box<dyn FormatHandler> {
    Box::new(JsonHandler)
}

fn new_txt_handler() -> Box<dyn FormatHandler> {
    Box::new(TxtHandler)
}

/// Every built-in handler, keyed by the extension it serves.
pub const BUILTIN_HANDLERS: &[(&str, HandlerConstructor)] = &[
    (json::EXTENSION, new_json_handler as HandlerConstructor),
    (txt::EXTENSION, new_txt_handler as HandlerConstructor),
];

/// Normalizes an extension for comparison: one leading dot is dropped and
/// ASCII letters are lowercased, so `".JSON"` and `"json"` are equal.
pub fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim();
    extension
        .strip_prefix('.')
        .unwrap_or(extension)
        .to_ascii_lowercase()
}

/// Returns the normalized extension of `path`, or an empty string if it has none.
pub fn extension_of<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(normalize_extension)
        .unwrap_or_default()
}
