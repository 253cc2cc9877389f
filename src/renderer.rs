use crate::config::ParserOptions;
use crate::context::RenderContext;
use crate::counter::CounterStore;
use crate::element::ElementCollection;
use crate::error::Result;
use crate::parser::Parser;
use crate::registry::ElementRegistry;
use log::debug;
use std::sync::Arc;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Parses a template string into elements.
    ///
    /// # Arguments
    /// * `template` - Template string to parse
    ///
    /// # Returns
    /// * `Result<ElementCollection>` - Parsed elements
    fn parse(&self, template: &str) -> Result<ElementCollection>;

    /// Renders parsed elements with the given context.
    ///
    /// # Arguments
    /// * `collection` - Elements to render
    /// * `context` - Context data for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text
    fn render_collection(
        &self,
        collection: &ElementCollection,
        context: &serde_json::Value,
    ) -> Result<String>;

    /// Parses and renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context data for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let collection = self.parse(template)?;
        self.render_collection(&collection, context)
    }

    /// Serializes parsed elements back to template text.
    fn to_text(&self, collection: &ElementCollection) -> String {
        collection.to_text()
    }
}

/// Keyword template engine: a parser, a registry and a counter store.
///
/// Every render through one renderer shares its counter store.
#[derive(Debug, Clone)]
pub struct KeywordRenderer {
    parser: Parser,
    registry: Arc<ElementRegistry>,
    counters: Arc<CounterStore>,
}

impl KeywordRenderer {
    /// Creates a renderer with default boundaries and the built-in keywords.
    pub fn new() -> Self {
        Self {
            parser: Parser::default(),
            registry: Arc::new(ElementRegistry::with_builtins()),
            counters: Arc::new(CounterStore::new()),
        }
    }

    /// Creates a renderer with custom boundaries and registry.
    ///
    /// # Returns
    /// * `Result<KeywordRenderer>` - `Error::InvalidBoundary` for bad options
    pub fn with_options(options: &ParserOptions, registry: Arc<ElementRegistry>) -> Result<Self> {
        Ok(Self {
            parser: Parser::new(options)?,
            registry,
            counters: Arc::new(CounterStore::new()),
        })
    }

    /// Replaces the counter store, e.g. to share counters between renderers.
    pub fn with_counters(mut self, counters: Arc<CounterStore>) -> Self {
        self.counters = counters;
        self
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn counters(&self) -> &Arc<CounterStore> {
        &self.counters
    }

    /// Builds a render context over `data` using this renderer's counters.
    pub fn context(&self, data: serde_json::Value) -> RenderContext {
        RenderContext::with_counters(data, Arc::clone(&self.counters))
    }
}

impl Default for KeywordRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for KeywordRenderer {
    fn parse(&self, template: &str) -> Result<ElementCollection> {
        self.parser.parse(template, &self.registry)
    }

    fn render_collection(
        &self,
        collection: &ElementCollection,
        context: &serde_json::Value,
    ) -> Result<String> {
        debug!("Rendering {} element(s)", collection.len());
        collection.render(&self.context(context.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::registry::{ElementDescriptor, PropertySpec};
    use serde_json::json;

    #[test]
    fn renders_with_builtins() {
        let renderer = KeywordRenderer::new();
        let out = renderer.render("Result: {value?format={0:N2}}", &json!(3.14159)).unwrap();
        assert_eq!(out, "Result: 3.14");
    }

    #[test]
    fn counters_persist_across_renders() {
        let renderer = KeywordRenderer::new();
        let collection = renderer.parse("#{counter}").unwrap();
        assert_eq!(renderer.render_collection(&collection, &json!(null)).unwrap(), "#1");
        assert_eq!(renderer.render_collection(&collection, &json!(null)).unwrap(), "#2");
    }

    #[test]
    fn custom_boundaries_and_registry() {
        let mut registry = ElementRegistry::new();
        registry
            .register(
                ElementDescriptor::new("greet", |bound, _| {
                    Ok(format!("hello {}", bound.get_str("who").unwrap_or("world")))
                })
                .property(PropertySpec::new("who")),
            )
            .unwrap();
        let options = ParserOptions {
            start: "[[".into(),
            end: "]]".into(),
            attribute: ":".into(),
        };
        let renderer = KeywordRenderer::with_options(&options, Arc::new(registry)).unwrap();
        assert_eq!(renderer.render("<[[greet:who=you]]>", &json!(null)).unwrap(), "<hello you>");
        assert!(matches!(
            renderer.render("{value}[[value]]", &json!(null)),
            Err(Error::UnknownElement { .. })
        ));
    }

    #[test]
    fn rejects_invalid_options() {
        let options = ParserOptions { start: String::new(), ..Default::default() };
        let result = KeywordRenderer::with_options(&options, Arc::new(ElementRegistry::new()));
        assert!(matches!(result, Err(Error::InvalidBoundary(_))));
    }

    #[test]
    fn to_text_round_trips() {
        let renderer = KeywordRenderer::new();
        let collection = renderer.parse("a {@id=42} b").unwrap();
        assert_eq!(renderer.to_text(&collection), "a {parameter?name=id&value=42} b");
    }
}
