use crate::constants::keywords::{PARAMETER, PARAMETER_NAME, PARAMETER_VALUE, VALUE};
use crate::format::{display, format_composite};
use crate::registry::{ElementDescriptor, PropertySpec};
use serde_json::Value;

/// `{value?path=...&format=...&default=...}`: a value from the render context.
///
/// Without `path` the whole context is used. `format` is a composite format
/// string whose item `{0}` is the value.
pub fn value() -> ElementDescriptor {
    ElementDescriptor::new(VALUE, |bound, ctx| {
        let path = bound.get_str("path").unwrap_or_default();
        let value = match ctx.lookup(path) {
            Some(value) if !value.is_null() => value.clone(),
            _ => match bound.get_str("default") {
                Some(default) => Value::String(default.to_string()),
                None => Value::Null,
            },
        };

        match bound.get_str("format") {
            Some(format) if !format.is_empty() => format_composite(format, &[value]),
            _ => Ok(display(&value)),
        }
    })
    .property(PropertySpec::new("path").alias("key"))
    .property(PropertySpec::new("format").alias("fmt"))
    .property(PropertySpec::new("default"))
}

/// `{parameter?name=...&value=...}`, also written `{@name=value}`.
///
/// Renders the context member called `name`, falling back to `value`.
pub fn parameter() -> ElementDescriptor {
    ElementDescriptor::new(PARAMETER, |bound, ctx| {
        let name = bound.get_str(PARAMETER_NAME).unwrap_or_default();
        if !name.is_empty() {
            if let Some(found) = ctx.lookup(name).filter(|v| !v.is_null()) {
                return Ok(display(found));
            }
        }
        Ok(bound.get_str(PARAMETER_VALUE).unwrap_or_default().to_string())
    })
    .property(PropertySpec::new(PARAMETER_NAME))
    .property(PropertySpec::new(PARAMETER_VALUE))
}
