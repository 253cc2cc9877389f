//! Catalog mapping keyword names to their descriptors.

mod descriptor;

pub use descriptor::{BoundAttributes, ElementDescriptor, PropertySpec, RenderFn};

use crate::attributes::AttributeMap;
use crate::element::DynamicElement;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::sync::Arc;

/// Name to descriptor map. Names are case-insensitive.
///
/// Built mutably at startup, then shared read-only (typically behind an
/// `Arc`); lookups need no locking.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    descriptors: IndexMap<String, Arc<ElementDescriptor>>,
}

impl ElementRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in keyword catalog.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in crate::keywords::builtins() {
            registry.descriptors.insert(descriptor.name().to_lowercase(), Arc::new(descriptor));
        }
        registry
    }

    /// Adds a descriptor.
    ///
    /// # Returns
    /// * `Result<()>` - `Error::DuplicateElement` if the name is taken
    pub fn register(&mut self, descriptor: ElementDescriptor) -> Result<()> {
        let key = descriptor.name().to_lowercase();
        if self.descriptors.contains_key(&key) {
            return Err(Error::DuplicateElement { name: descriptor.name().to_string() });
        }
        debug!("Registering element '{}'", descriptor.name());
        self.descriptors.insert(key, Arc::new(descriptor));
        Ok(())
    }

    /// Adds or replaces a descriptor, returning the replaced one.
    pub fn replace(&mut self, descriptor: ElementDescriptor) -> Option<Arc<ElementDescriptor>> {
        self.descriptors.insert(descriptor.name().to_lowercase(), Arc::new(descriptor))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ElementDescriptor>> {
        self.descriptors.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.values().map(|d| d.name())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Builds a dynamic element from a keyword name and its parsed attributes.
    ///
    /// # Arguments
    /// * `name` - Keyword name as written (case-insensitive)
    /// * `attributes` - Parsed attributes
    /// * `position` - Byte offset of the markup body, reported on unknown names
    pub fn build(
        &self,
        name: &str,
        attributes: AttributeMap,
        position: usize,
    ) -> Result<DynamicElement> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| Error::UnknownElement { name: name.to_string(), position })?;

        for (key, _) in attributes.iter() {
            if !descriptor.accepts_key(key) {
                debug!("Element '{}' ignores attribute '{key}'", descriptor.name());
            }
        }

        let bound = descriptor.bind(&attributes)?;
        Ok(DynamicElement::new(name, attributes, bound, Arc::clone(descriptor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderContext;

    fn echo() -> ElementDescriptor {
        ElementDescriptor::new("Echo", |bound, _| {
            Ok(bound.get_str("value").unwrap_or_default().to_string())
        })
        .property(PropertySpec::new("value"))
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut registry = ElementRegistry::new();
        registry.register(echo()).unwrap();
        assert!(registry.contains("echo"));
        assert!(registry.contains("ECHO"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Echo"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = ElementRegistry::new();
        registry.register(echo()).unwrap();
        let err = registry.register(echo()).unwrap_err();
        assert!(matches!(err, Error::DuplicateElement { name } if name == "Echo"));
    }

    #[test]
    fn replace_overwrites() {
        let mut registry = ElementRegistry::new();
        assert!(registry.replace(echo()).is_none());
        assert!(registry.replace(echo()).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn build_unknown_reports_name_and_position() {
        let registry = ElementRegistry::new();
        let err = registry.build("missing", AttributeMap::new(), 7).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownElement { ref name, position: 7 } if name == "missing"
        ));
    }

    #[test]
    fn build_binds_and_renders() {
        let mut registry = ElementRegistry::new();
        registry.register(echo()).unwrap();
        let mut attributes = AttributeMap::new();
        attributes.push("value", "hi");
        let element = registry.build("echo", attributes, 0).unwrap();
        assert_eq!(element.render(&RenderContext::default()).unwrap(), "hi");
    }

    #[test]
    fn builtins_are_registered() {
        let registry = ElementRegistry::with_builtins();
        for name in ["text", "value", "parameter", "now", "counter", "hash"] {
            assert!(registry.contains(name), "missing builtin {name}");
        }
    }
}
