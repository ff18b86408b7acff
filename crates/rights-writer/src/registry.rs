//! Strategy registry for rules object writers
//!
//! Provides [`WriterRegistry`] for looking up writer strategies by name.

use crate::recycling::RecyclingWriter;
use crate::replacing::ReplacingWriter;
use crate::strategy::{RulesObjectWriter, WriterError};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of available writer strategies
///
/// Maps names to shared strategy instances. Callers select a strategy by
/// name at save time; registering under an existing name replaces it.
#[derive(Debug, Default, Clone)]
pub struct WriterRegistry {
    writers: HashMap<String, Arc<dyn RulesObjectWriter>>,
}

impl WriterRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            writers: HashMap::new(),
        }
    }

    /// Create registry with built-in strategies
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_writer(RecyclingWriter::new());
        registry.register_writer(ReplacingWriter::new());
        registry
    }

    /// Register a strategy under an explicit name
    pub fn register(&mut self, name: &str, writer: Arc<dyn RulesObjectWriter>) {
        self.writers.insert(name.to_string(), writer);
    }

    /// Register a strategy under its own name
    pub fn register_writer<W: RulesObjectWriter + 'static>(&mut self, writer: W) {
        let name = writer.name();
        self.register(name, Arc::new(writer));
    }

    /// Look up a strategy
    ///
    /// # Errors
    /// Returns [`WriterError::StrategyNotFound`] if nothing is registered
    /// under `name`
    pub fn get(&self, name: &str) -> Result<Arc<dyn RulesObjectWriter>, WriterError> {
        self.writers
            .get(name)
            .cloned()
            .ok_or_else(|| WriterError::StrategyNotFound(name.to_string()))
    }

    /// Check if strategy exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.writers.contains_key(name)
    }

    /// Remove strategy
    #[inline]
    pub fn remove(&mut self, name: &str) -> bool {
        self.writers.remove(name).is_some()
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.writers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.writers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}
