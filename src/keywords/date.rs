use crate::constants::keywords::{DATE, DEFAULT_DATE_FORMAT, NOW};
use crate::convert::BoolConverter;
use crate::error::{Error, Result};
use crate::registry::{BoundAttributes, ElementDescriptor, PropertySpec};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, Utc};
use std::fmt::Write;

/// `{now?format=%H:%M&utc=true}`: current time as `strftime` text.
pub fn now() -> ElementDescriptor {
    describe(NOW)
}

/// Same as `now`, registered under `date`.
pub fn date() -> ElementDescriptor {
    describe(DATE)
}

fn describe(name: &'static str) -> ElementDescriptor {
    ElementDescriptor::new(name, move |bound, _| render_now(name, bound))
        .property(PropertySpec::new("format").alias("fmt").default_value(DEFAULT_DATE_FORMAT))
        .property(PropertySpec::new("utc").converter(BoolConverter).default_value("false"))
}

fn render_now(name: &str, bound: &BoundAttributes) -> Result<String> {
    let format = bound.get_str("format").unwrap_or(DEFAULT_DATE_FORMAT);
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::RenderError {
            name: name.to_string(),
            message: format!("invalid date format '{format}'"),
        });
    }

    let mut output = String::new();
    let written = if bound.get_bool("utc").unwrap_or(false) {
        write!(output, "{}", Utc::now().format(format))
    } else {
        write!(output, "{}", Local::now().format(format))
    };
    written.map_err(|e| Error::RenderError { name: name.to_string(), message: e.to_string() })?;
    Ok(output)
}
