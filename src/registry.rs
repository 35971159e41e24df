//! The set of format handlers a [`Localizer`](crate::Localizer) dispatches to.

use crate::{
    formats::{BUILTIN_HANDLERS, normalize_extension},
    traits::FormatHandler,
};

/// Identifies one registration in a [`HandlerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

/// Owned, ordered collection of [`FormatHandler`]s.
///
/// Several handlers may be registered for the same extension. Lookups always
/// resolve to the earliest registration that is still present, and removal
/// goes through the [`HandlerId`] returned by [`HandlerRegistry::register`],
/// so it is never ambiguous which handler is dropped.
#[derive(Debug)]
pub struct HandlerRegistry {
    handlers: Vec<(HandlerId, Box<dyn FormatHandler>)>,
    next_id: u64,
}

impl HandlerRegistry {
    /// Creates a registry with no handlers.
    pub fn new() -> Self {
        HandlerRegistry {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Creates a registry holding one instance of every built-in handler.
    pub fn with_builtin_handlers() -> Self {
        let mut registry = HandlerRegistry::new();
        for (_, constructor) in BUILTIN_HANDLERS {
            registry.register(constructor());
        }
        registry
    }

    /// Adds a handler after all existing ones.
    pub fn register(&mut self, handler: Box<dyn FormatHandler>) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    /// Removes the handler registered under `id`.
    pub fn unregister(&mut self, id: HandlerId) -> Option<Box<dyn FormatHandler>> {
        let index = self
            .handlers
            .iter()
            .position(|(current, _)| *current == id)?;
        Some(self.handlers.remove(index).1)
    }

    /// Removes every handler for `extension` and returns how many were dropped.
    pub fn unregister_extension(&mut self, extension: &str) -> usize {
        let extension = normalize_extension(extension);
        let before = self.handlers.len();
        self.handlers
            .retain(|(_, handler)| normalize_extension(handler.extension()) != extension);
        before - self.handlers.len()
    }

    /// Returns the first registered handler for `extension`.
    pub fn resolve(&self, extension: &str) -> Option<&dyn FormatHandler> {
        self.resolve_entry(extension)
            .map(|(_, handler)| handler.as_ref())
    }

    /// Returns the id of the handler [`HandlerRegistry::resolve`] would pick.
    pub fn resolve_id(&self, extension: &str) -> Option<HandlerId> {
        self.resolve_entry(extension).map(|(id, _)| *id)
    }

    fn resolve_entry(&self, extension: &str) -> Option<&(HandlerId, Box<dyn FormatHandler>)> {
        let extension = normalize_extension(extension);
        self.handlers
            .iter()
            .find(|(_, handler)| normalize_extension(handler.extension()) == extension)
    }

    pub fn is_supported(&self, extension: &str) -> bool {
        self.resolve_entry(extension).is_some()
    }

    /// Lists the supported extensions in registration order, without duplicates.
    pub fn extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = Vec::new();
        for (_, handler) in &self.handlers {
            let extension = normalize_extension(handler.extension());
            if !extensions.contains(&extension) {
                extensions.push(extension);
            }
        }
        extensions
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_builtin_handlers()
    }
}
