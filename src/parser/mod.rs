//! Tokenizer turning template text into an element collection.

mod factory;

use crate::boundary::Boundaries;
use crate::config::ParserOptions;
use crate::element::{Element, ElementCollection, StaticElement};
use crate::error::Result;
use crate::registry::ElementRegistry;
use log::{debug, trace};

/// Splits template text into static and dynamic elements.
///
/// A parser only holds its boundaries, so one instance can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    boundaries: Boundaries,
}

impl Parser {
    /// Creates a parser from validated options.
    pub fn new(options: &ParserOptions) -> Result<Self> {
        Ok(Self { boundaries: options.boundaries()? })
    }

    pub fn with_boundaries(boundaries: Boundaries) -> Self {
        Self { boundaries }
    }

    pub fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    /// Parses `text` into elements, resolving keyword names with `registry`.
    ///
    /// Outside markup a doubled start or end boundary stands for one literal
    /// token and a lone end boundary is kept as is. Unterminated markup is
    /// kept as literal text. Unknown keyword names and
    /// attribute conversion failures abort the parse.
    ///
    /// # Arguments
    /// * `text` - Template text
    /// * `registry` - Catalog used to build dynamic elements
    ///
    /// # Returns
    /// * `Result<ElementCollection>` - Elements in template order
    pub fn parse(&self, text: &str, registry: &ElementRegistry) -> Result<ElementCollection> {
        let start = &self.boundaries.start;
        let end = &self.boundaries.end;

        let mut elements = Vec::new();
        let mut literal = String::new();
        let mut pos = 0;

        while pos < text.len() {
            let next_start = start.index_of(text, pos, true);
            if let Some(end_idx) = end
                .index_of(text, pos, true)
                .filter(|&idx| next_start.map_or(true, |start_idx| idx < start_idx))
            {
                literal.push_str(&text[pos..end_idx]);
                literal.push_str(end.token());
                let width = if end.is_doubled(text, end_idx) { end.len() * 2 } else { end.len() };
                pos = end_idx + width;
                continue;
            }

            let Some(start_idx) = next_start else {
                literal.push_str(&text[pos..]);
                break;
            };

            if start_idx > pos {
                literal.push_str(&text[pos..start_idx]);
                pos = start_idx;
                continue;
            }

            if start.is_doubled(text, start_idx) {
                literal.push_str(start.token());
                pos = start_idx + start.len() * 2;
                continue;
            }

            let after_start = start_idx + start.len();
            let Some(end_idx) = self.resolve_end(text, after_start) else {
                debug!("Unterminated markup at position {start_idx}, keeping it as text");
                literal.push_str(&text[start_idx..]);
                break;
            };

            let body = &text[after_start..end_idx];
            trace!("Markup body '{body}' at position {after_start}");
            if !literal.is_empty() {
                elements.push(Element::Static(StaticElement::new(std::mem::take(&mut literal))));
            }
            elements.push(factory::create_element(body, after_start, &self.boundaries, registry)?);
            pos = end_idx + end.len();
        }

        if !literal.is_empty() || elements.is_empty() {
            elements.push(Element::Static(StaticElement::new(literal)));
        }

        debug!("Parsed {} element(s)", elements.len());
        Ok(ElementCollection::new(elements, self.boundaries.clone()))
    }

    /// Finds the end boundary closing markup whose body starts at `from`.
    ///
    /// An end boundary is rejected while nested start boundaries before it are
    /// still open; each nested section is closed by the first end boundary
    /// after it. At the outermost level a doubled end boundary is a literal
    /// end token of the body. Doubled start boundaries never open markup.
    fn resolve_end(&self, text: &str, from: usize) -> Option<usize> {
        let start = &self.boundaries.start;
        let end = &self.boundaries.end;
        let mut depth = 0usize;
        let mut cursor = from;

        loop {
            let end_idx = end.index_of(text, cursor, true)?;

            if let Some(start_idx) =
                start.index_of(text, cursor, true).filter(|&idx| idx < end_idx)
            {
                if start.is_doubled(text, start_idx) {
                    cursor = start_idx + start.len() * 2;
                } else {
                    depth += 1;
                    cursor = start_idx + start.len();
                }
                continue;
            }

            if depth > 0 {
                depth -= 1;
                cursor = end_idx + end.len();
                continue;
            }

            if end.is_doubled(text, end_idx) {
                cursor = end_idx + end.len() * 2;
                continue;
            }

            return Some(end_idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderContext;
    use crate::error::Error;
    use crate::registry::{ElementDescriptor, PropertySpec};
    use serde_json::json;

    fn registry() -> ElementRegistry {
        let mut registry = ElementRegistry::new();
        for name in ["outer", "inner", "echo"] {
            registry
                .register(
                    ElementDescriptor::new(name, |bound, _| {
                        Ok(bound.get_str("x").unwrap_or_default().to_string())
                    })
                    .property(PropertySpec::new("x")),
                )
                .unwrap();
        }
        registry
    }

    fn parse(text: &str) -> ElementCollection {
        Parser::default().parse(text, &registry()).unwrap()
    }

    fn render(text: &str) -> String {
        parse(text).render(&RenderContext::new(json!(null))).unwrap()
    }

    #[test]
    fn plain_text_is_one_static_element() {
        let collection = parse("just text");
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.elements()[0].as_static().unwrap().text(), "just text");
    }

    #[test]
    fn empty_text_is_one_empty_static_element() {
        let collection = parse("");
        assert_eq!(collection.len(), 1);
        assert_eq!(render(""), "");
    }

    #[test]
    fn text_and_markup_alternate() {
        let collection = parse("a{echo?x=1}b{echo?x=2}");
        let kinds: Vec<bool> = collection.iter().map(|e| e.as_static().is_some()).collect();
        assert_eq!(kinds, vec![true, false, true, false]);
        assert_eq!(render("a{echo?x=1}b{echo?x=2}"), "a1b2");
    }

    #[test]
    fn doubled_start_is_literal() {
        assert_eq!(render("{{"), "{");
        assert_eq!(render("a{{b"), "a{b");
        assert_eq!(parse("a{{b").len(), 1);
    }

    #[test]
    fn lone_end_is_literal() {
        assert_eq!(render("a}b"), "a}b");
        assert_eq!(render("}"), "}");
    }

    #[test]
    fn doubled_end_is_literal() {
        assert_eq!(render("a}}b"), "a}b");
        assert_eq!(render("{{x}}"), "{x}");
        assert_eq!(render("}}}"), "}}");
        assert_eq!(render("{echo?x=1} }}"), "1 }");
        assert_eq!(parse("{{x}}").len(), 1);
    }

    #[test]
    fn unterminated_markup_is_literal() {
        assert_eq!(render("x {echo?x=1"), "x {echo?x=1");
        assert_eq!(render("{echo?x=1} then {oops"), "1 then {oops");
    }

    #[test]
    fn nested_markup_resolves_outer_end() {
        let collection = parse("{outer?x={inner}}");
        assert_eq!(collection.len(), 1);
        let element = collection.elements()[0].as_dynamic().unwrap();
        assert_eq!(element.name(), "outer");
        assert_eq!(element.attributes().get("x"), Some("{inner}"));
    }

    #[test]
    fn doubled_end_inside_body_is_literal() {
        assert_eq!(render("{echo?x=a}}b}"), "a}b");
    }

    #[test]
    fn doubled_start_inside_body_is_literal() {
        assert_eq!(render("{echo?x={{b}"), "{b");
    }

    #[test]
    fn unknown_element_reports_body_position() {
        let err = Parser::default().parse("ab{nope}", &registry()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownElement { ref name, position: 3 } if name == "nope"
        ));
    }

    #[test]
    fn multi_character_boundaries() {
        let options = ParserOptions::from_json(r#"{"start": "<%", "end": "%>"}"#).unwrap();
        let parser = Parser::new(&options).unwrap();
        let collection = parser.parse("a <%echo?x=1%> <%<%b%>%>", &registry()).unwrap();
        let out = collection.render(&RenderContext::default()).unwrap();
        assert_eq!(out, "a 1 <%b%>");
    }

    #[test]
    fn multi_character_nested_markup() {
        let options = ParserOptions::from_json(r#"{"start": "<%", "end": "%>"}"#).unwrap();
        let parser = Parser::new(&options).unwrap();
        let collection = parser.parse("<%outer?x=<%inner%>%>", &registry()).unwrap();
        let element = collection.elements()[0].as_dynamic().unwrap();
        assert_eq!(element.attributes().get("x"), Some("<%inner%>"));
    }
}
