//! Conversion of raw attribute strings into typed values.

use serde_json::Value;
use std::fmt::Debug;

/// Converts a raw attribute string into the value a property expects.
///
/// Implementations report failure with `None`; the registry turns that into
/// an `Error::AttributeConversion` naming the attribute key.
pub trait ValueConverter: Debug + Send + Sync {
    /// Human-readable name of the target type, used in error messages.
    fn target_type(&self) -> &str;

    /// Converts `raw`, returning `None` if it is not a valid literal.
    fn convert(&self, raw: &str) -> Option<Value>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StringConverter;

impl ValueConverter for StringConverter {
    fn target_type(&self) -> &str {
        "string"
    }

    fn convert(&self, raw: &str) -> Option<Value> {
        Some(Value::String(raw.to_string()))
    }
}

/// Accepts `true/false`, `yes/no`, `on/off` and `1/0`, ignoring case.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolConverter;

impl ValueConverter for BoolConverter {
    fn target_type(&self) -> &str {
        "bool"
    }

    fn convert(&self, raw: &str) -> Option<Value> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(Value::Bool(true)),
            "false" | "no" | "off" | "0" => Some(Value::Bool(false)),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IntConverter;

impl ValueConverter for IntConverter {
    fn target_type(&self) -> &str {
        "int"
    }

    fn convert(&self, raw: &str) -> Option<Value> {
        raw.trim().parse::<i64>().ok().map(Value::from)
    }
}

/// Matches a closed set of literals case-insensitively and yields the
/// canonical spelling.
#[derive(Debug, Clone)]
pub struct EnumConverter {
    type_name: String,
    variants: Vec<&'static str>,
}

impl EnumConverter {
    pub fn new(type_name: impl Into<String>, variants: &[&'static str]) -> Self {
        Self { type_name: type_name.into(), variants: variants.to_vec() }
    }

    pub fn variants(&self) -> &[&'static str] {
        &self.variants
    }
}

impl ValueConverter for EnumConverter {
    fn target_type(&self) -> &str {
        &self.type_name
    }

    fn convert(&self, raw: &str) -> Option<Value> {
        let raw = raw.trim();
        self.variants
            .iter()
            .find(|variant| variant.eq_ignore_ascii_case(raw))
            .map(|variant| Value::String(variant.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bool_literals() {
        let c = BoolConverter;
        assert_eq!(c.convert("TRUE"), Some(json!(true)));
        assert_eq!(c.convert("no"), Some(json!(false)));
        assert_eq!(c.convert(" 1 "), Some(json!(true)));
        assert_eq!(c.convert("maybe"), None);
    }

    #[test]
    fn int_literals() {
        let c = IntConverter;
        assert_eq!(c.convert("42"), Some(json!(42)));
        assert_eq!(c.convert("-7"), Some(json!(-7)));
        assert_eq!(c.convert("4.2"), None);
        assert_eq!(c.convert(""), None);
    }

    #[test]
    fn enum_literals_are_canonicalised() {
        let c = EnumConverter::new("case", &["upper", "lower"]);
        assert_eq!(c.convert("UPPER"), Some(json!("upper")));
        assert_eq!(c.convert("title"), None);
        assert_eq!(c.target_type(), "case");
    }

    #[test]
    fn strings_pass_through() {
        assert_eq!(StringConverter.convert(" x "), Some(json!(" x ")));
    }
}
