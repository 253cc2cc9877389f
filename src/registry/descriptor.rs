use crate::attributes::AttributeMap;
use crate::context::RenderContext;
use crate::convert::{StringConverter, ValueConverter};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// Render behaviour of a keyword: `(bound attributes, context) -> text`.
pub type RenderFn =
    Arc<dyn Fn(&BoundAttributes, &RenderContext) -> Result<String> + Send + Sync>;

/// One bindable property of a keyword.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    primary_key: String,
    aliases: Vec<String>,
    default: Option<String>,
    converter: Option<Arc<dyn ValueConverter>>,
}

impl PropertySpec {
    pub fn new(primary_key: impl Into<String>) -> Self {
        Self { primary_key: primary_key.into(), aliases: Vec::new(), default: None, converter: None }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Raw value used when no attribute matches. It goes through the converter.
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn converter(mut self, converter: impl ValueConverter + 'static) -> Self {
        self.converter = Some(Arc::new(converter));
        self
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Primary key followed by the aliases.
    pub fn keys(&self) -> Vec<&str> {
        std::iter::once(self.primary_key.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .collect()
    }

    /// Resolves this property against parsed attributes.
    ///
    /// # Returns
    /// * `Result<Option<Value>>` - Converted value, `None` when neither an
    ///   attribute nor a default is available
    fn bind(&self, attributes: &AttributeMap) -> Result<Option<Value>> {
        let (key, raw) = match attributes.find_any(&self.keys()) {
            Some((key, raw)) => (key, raw),
            None => match &self.default {
                Some(default) => (self.primary_key.as_str(), default.as_str()),
                None => return Ok(None),
            },
        };

        let converter: &dyn ValueConverter = match &self.converter {
            Some(converter) => converter.as_ref(),
            None => &StringConverter,
        };
        converter.convert(raw).map(Some).ok_or_else(|| Error::AttributeConversion {
            key: key.to_string(),
            target: converter.target_type().to_string(),
            value: raw.to_string(),
        })
    }
}

/// Registry entry: a keyword name, its properties and its render behaviour.
#[derive(Clone)]
pub struct ElementDescriptor {
    name: String,
    properties: Vec<PropertySpec>,
    render: RenderFn,
}

impl ElementDescriptor {
    pub fn new<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&BoundAttributes, &RenderContext) -> Result<String> + Send + Sync + 'static,
    {
        Self { name: name.into(), properties: Vec::new(), render: Arc::new(render) }
    }

    pub fn property(mut self, spec: PropertySpec) -> Self {
        self.properties.push(spec);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    /// True if `key` is the primary key or an alias of some property.
    pub fn accepts_key(&self, key: &str) -> bool {
        self.properties
            .iter()
            .any(|spec| spec.keys().iter().any(|k| k.eq_ignore_ascii_case(key)))
    }

    /// Binds parsed attributes onto the declared properties.
    pub fn bind(&self, attributes: &AttributeMap) -> Result<BoundAttributes> {
        let mut bound = BoundAttributes::default();
        for spec in &self.properties {
            if let Some(value) = spec.bind(attributes)? {
                bound.insert(spec.primary_key(), value);
            }
        }
        Ok(bound)
    }

    pub fn render(&self, bound: &BoundAttributes, context: &RenderContext) -> Result<String> {
        (self.render)(bound, context)
    }
}

impl Debug for ElementDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementDescriptor")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

/// Property values after binding, keyed by primary key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundAttributes {
    values: IndexMap<String, Value>,
}

impl BoundAttributes {
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundaries;
    use crate::convert::{BoolConverter, EnumConverter, IntConverter};
    use serde_json::json;

    fn attrs(body: &str) -> AttributeMap {
        AttributeMap::parse(body, &Boundaries::default())
    }

    fn descriptor() -> ElementDescriptor {
        ElementDescriptor::new("sample", |_, _| Ok(String::new()))
            .property(PropertySpec::new("value").alias("v").alias("text"))
            .property(PropertySpec::new("count").converter(IntConverter).default_value("1"))
            .property(PropertySpec::new("utc").converter(BoolConverter))
            .property(
                PropertySpec::new("case")
                    .converter(EnumConverter::new("case", &["upper", "lower"])),
            )
    }

    #[test]
    fn binds_primary_keys_and_aliases() {
        let bound = descriptor().bind(&attrs("V=hi&count=3")).unwrap();
        assert_eq!(bound.get_str("value"), Some("hi"));
        assert_eq!(bound.get_i64("count"), Some(3));
    }

    #[test]
    fn first_matching_attribute_wins() {
        let bound = descriptor().bind(&attrs("text=a&value=b")).unwrap();
        assert_eq!(bound.get_str("value"), Some("a"));
    }

    #[test]
    fn defaults_fill_unmatched_properties() {
        let bound = descriptor().bind(&AttributeMap::new()).unwrap();
        assert_eq!(bound.get("count"), Some(&json!(1)));
        assert!(!bound.contains("value"));
        assert!(!bound.contains("utc"));
    }

    #[test]
    fn conversion_failure_names_the_written_key() {
        let err = descriptor().bind(&attrs("CASE=sideways")).unwrap_err();
        match err {
            Error::AttributeConversion { key, target, value } => {
                assert_eq!(key, "CASE");
                assert_eq!(target, "case");
                assert_eq!(value, "sideways");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn accepts_key_checks_aliases() {
        let d = descriptor();
        assert!(d.accepts_key("TEXT"));
        assert!(!d.accepts_key("other"));
    }
}
