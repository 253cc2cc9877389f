use crate::attributes::AttributeMap;
use crate::boundary::Boundaries;
use crate::constants::{keywords, ATTRIBUTE_VALUE_SEPARATOR, SHORTCUT_PARAMETER_MARKER};
use crate::element::Element;
use crate::error::Result;
use crate::registry::ElementRegistry;
use log::trace;

/// Builds the element described by one markup body.
///
/// # Arguments
/// * `body` - Text between the start and end boundaries
/// * `position` - Byte offset of `body` in the template
/// * `boundaries` - Boundaries of the parser
/// * `registry` - Catalog resolving the keyword name
pub(crate) fn create_element(
    body: &str,
    position: usize,
    boundaries: &Boundaries,
    registry: &ElementRegistry,
) -> Result<Element> {
    // The first character is skipped so a leading marker is never mistaken
    // for an attribute boundary.
    let first_len = body.chars().next().map_or(0, char::len_utf8);
    let (head, attributes) = match boundaries.find_outside_markup(
        body,
        first_len,
        boundaries.attribute.token(),
    ) {
        Some(idx) => (
            &body[..idx],
            AttributeMap::parse(&body[idx + boundaries.attribute.len()..], boundaries),
        ),
        None => (body, AttributeMap::new()),
    };

    let (name, attributes) = match head.strip_prefix(SHORTCUT_PARAMETER_MARKER) {
        Some(shortcut) => (
            keywords::PARAMETER.to_string(),
            shortcut_attributes(shortcut, attributes, boundaries),
        ),
        None => (boundaries.unescape(head).trim().to_string(), attributes),
    };

    trace!("Building element '{name}' with {} attribute(s)", attributes.len());
    registry.build(&name, attributes, position).map(Element::Dynamic)
}

/// Expands `@name` and `@name=value` into `name`/`value` attributes placed
/// before any explicitly written attributes.
fn shortcut_attributes(
    shortcut: &str,
    explicit: AttributeMap,
    boundaries: &Boundaries,
) -> AttributeMap {
    let separator = ATTRIBUTE_VALUE_SEPARATOR.to_string();
    let doubled = separator.repeat(2);
    let mut attributes = AttributeMap::new();

    match boundaries.find_outside_markup(shortcut, 0, &separator) {
        Some(idx) => {
            let name = boundaries.unescape(&shortcut[..idx]).replace(&doubled, &separator);
            let value = boundaries.unescape(&shortcut[idx + separator.len()..]);
            attributes.push(keywords::PARAMETER_NAME, name);
            attributes.push(keywords::PARAMETER_VALUE, value);
        }
        None => {
            let name = boundaries.unescape(shortcut).replace(&doubled, &separator);
            attributes.push(keywords::PARAMETER_NAME, name);
        }
    }

    for (key, value) in explicit.iter() {
        attributes.push(key, value);
    }
    attributes
}
