use crate::constants::keywords::TEXT;
use crate::convert::EnumConverter;
use crate::registry::{ElementDescriptor, PropertySpec};
use cruet::case::{
    camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
    screaming_snake::to_screaming_snake_case, snake::to_snake_case, train::to_train_case,
};

const CASES: &[&str] =
    &["none", "upper", "lower", "camel", "snake", "kebab", "pascal", "screaming", "train"];

/// `{text?value=...&case=...}`: the `value` attribute, optionally re-cased.
pub fn text() -> ElementDescriptor {
    ElementDescriptor::new(TEXT, |bound, _| {
        let value = bound.get_str("value").unwrap_or_default();
        Ok(apply_case(value, bound.get_str("case").unwrap_or("none")))
    })
    .property(PropertySpec::new("value").alias("text").alias("v"))
    .property(
        PropertySpec::new("case")
            .converter(EnumConverter::new("case", CASES))
            .default_value("none"),
    )
}

fn apply_case(value: &str, case: &str) -> String {
    match case {
        "upper" => value.to_uppercase(),
        "lower" => value.to_lowercase(),
        "camel" => to_camel_case(value),
        "snake" => to_snake_case(value),
        "kebab" => to_kebab_case(value),
        "pascal" => to_pascal_case(value),
        "screaming" => to_screaming_snake_case(value),
        "train" => to_train_case(value),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeMap;
    use crate::boundary::Boundaries;
    use crate::context::RenderContext;

    fn render(body: &str) -> String {
        let descriptor = text();
        let bound = descriptor.bind(&AttributeMap::parse(body, &Boundaries::default())).unwrap();
        descriptor.render(&bound, &RenderContext::default()).unwrap()
    }

    #[test]
    fn passes_value_through() {
        assert_eq!(render("value=hello world"), "hello world");
        assert_eq!(render("v=short"), "short");
        assert_eq!(render(""), "");
    }

    #[test]
    fn applies_case() {
        assert_eq!(render("value=hello world&case=upper"), "HELLO WORLD");
        assert_eq!(render("value=hello world&case=Snake"), "hello_world");
        assert_eq!(render("value=hello world&case=kebab"), "hello-world");
        assert_eq!(render("value=hello world&case=pascal"), "HelloWorld");
        assert_eq!(render("value=hello world&case=camel"), "helloWorld");
        assert_eq!(render("value=hello world&case=screaming"), "HELLO_WORLD");
        assert_eq!(render("value=hello world&case=train"), "Hello-World");
    }
}
