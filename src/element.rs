//! Parsed template content: static text and dynamic keywords.

use crate::attributes::AttributeMap;
use crate::boundary::Boundaries;
use crate::context::RenderContext;
use crate::error::Result;
use crate::registry::{BoundAttributes, ElementDescriptor};
use std::fmt::Display;
use std::sync::Arc;

/// Fixed text, rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticElement {
    text: String,
}

impl StaticElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start and end tokens are doubled so the text never opens markup.
    fn to_text(&self, boundaries: &Boundaries) -> String {
        boundaries.end.escape(&boundaries.start.escape(&self.text))
    }
}

/// A keyword bound to its registered descriptor.
#[derive(Debug, Clone)]
pub struct DynamicElement {
    name: String,
    attributes: AttributeMap,
    bound: BoundAttributes,
    descriptor: Arc<ElementDescriptor>,
}

impl DynamicElement {
    pub(crate) fn new(
        name: impl Into<String>,
        attributes: AttributeMap,
        bound: BoundAttributes,
        descriptor: Arc<ElementDescriptor>,
    ) -> Self {
        Self { name: name.into(), attributes, bound, descriptor }
    }

    /// Keyword name as written in the template.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes as written, including those no property consumed.
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn bound(&self) -> &BoundAttributes {
        &self.bound
    }

    pub fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    pub fn render(&self, context: &RenderContext) -> Result<String> {
        self.descriptor.render(&self.bound, context)
    }

    fn to_text(&self, boundaries: &Boundaries) -> String {
        let mut out = String::from(boundaries.start.token());
        out.push_str(&boundaries.escape(&self.name));
        if !self.attributes.is_empty() {
            out.push_str(boundaries.attribute.token());
            out.push_str(&self.attributes.to_query(boundaries));
        }
        out.push_str(boundaries.end.token());
        out
    }
}

#[derive(Debug, Clone)]
pub enum Element {
    Static(StaticElement),
    Dynamic(DynamicElement),
}

impl Element {
    pub fn render(&self, context: &RenderContext) -> Result<String> {
        match self {
            Element::Static(element) => Ok(element.text().to_string()),
            Element::Dynamic(element) => element.render(context),
        }
    }

    pub fn to_text(&self, boundaries: &Boundaries) -> String {
        match self {
            Element::Static(element) => element.to_text(boundaries),
            Element::Dynamic(element) => element.to_text(boundaries),
        }
    }

    pub fn as_static(&self) -> Option<&StaticElement> {
        match self {
            Element::Static(element) => Some(element),
            Element::Dynamic(_) => None,
        }
    }

    pub fn as_dynamic(&self) -> Option<&DynamicElement> {
        match self {
            Element::Dynamic(element) => Some(element),
            Element::Static(_) => None,
        }
    }
}

/// Ordered elements of one parsed template.
///
/// Immutable once parsed and safe to render from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct ElementCollection {
    elements: Vec<Element>,
    boundaries: Boundaries,
}

impl ElementCollection {
    pub fn new(elements: Vec<Element>, boundaries: Boundaries) -> Self {
        Self { elements, boundaries }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Boundaries the collection was parsed with.
    pub fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    /// Renders every element in order and concatenates the results.
    pub fn render(&self, context: &RenderContext) -> Result<String> {
        let mut output = String::new();
        for element in &self.elements {
            output.push_str(&element.render(context)?);
        }
        Ok(output)
    }

    /// Serializes the collection back to delimited template text.
    ///
    /// Escaping may differ from the source, but re-parsing the output yields
    /// elements that render identically.
    pub fn to_text(&self) -> String {
        self.elements.iter().map(|e| e.to_text(&self.boundaries)).collect()
    }
}

impl<'a> IntoIterator for &'a ElementCollection {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl Display for ElementCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
