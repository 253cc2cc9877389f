#[cfg(test)]
mod tests {
    use placemark::{
        ElementDescriptor, ElementRegistry, Error, Parser, PropertySpec, RenderContext,
    };
    use serde_json::json;
    use test_log::test;

    fn registry() -> ElementRegistry {
        let mut registry = ElementRegistry::with_builtins();
        for name in ["outer", "inner"] {
            registry
                .register(
                    ElementDescriptor::new(name, move |bound, _| {
                        Ok(format!("{name}({})", bound.get_str("x").unwrap_or_default()))
                    })
                    .property(PropertySpec::new("x")),
                )
                .unwrap();
        }
        registry
    }

    fn render(template: &str) -> String {
        Parser::default()
            .parse(template, &registry())
            .unwrap()
            .render(&RenderContext::new(json!(null)))
            .unwrap()
    }

    #[test]
    fn text_without_boundaries_is_identity() {
        for text in ["", "hello", "a } b", "multi\nline\ttext", "unicode: żółw 🐢"] {
            let collection = Parser::default().parse(text, &registry()).unwrap();
            assert_eq!(collection.len(), 1, "input {text:?}");
            assert_eq!(collection.elements()[0].as_static().unwrap().text(), text);
            assert_eq!(collection.render(&RenderContext::default()).unwrap(), text);
        }
    }

    #[test]
    fn doubled_start_renders_single_token() {
        assert_eq!(render("{{"), "{");
        assert_eq!(render("{{{{"), "{{");
        assert_eq!(render("x {{y}"), "x {y}");
    }

    #[test]
    fn doubled_end_renders_single_token() {
        assert_eq!(render("{{x}}"), "{x}");
        assert_eq!(render("a}}b"), "a}b");
        assert_eq!(render("a {{ b }} c"), "a { b } c");
    }

    #[test]
    fn nested_markup_closes_the_outer_element() {
        let collection = Parser::default().parse("{outer?x={inner}}", &registry()).unwrap();
        assert_eq!(collection.len(), 1);
        let element = collection.elements()[0].as_dynamic().unwrap();
        assert_eq!(element.name(), "outer");
        assert_eq!(element.attributes().get("x"), Some("{inner}"));
        assert_eq!(render("{outer?x={inner}}"), "outer({inner})");
    }

    #[test]
    fn nested_markup_followed_by_text() {
        assert_eq!(render("[{outer?x={inner}&y=1}] tail"), "[outer({inner})] tail");
    }

    #[test]
    fn doubled_nested_start_does_not_open_markup() {
        assert_eq!(render("{outer?x={{inner}"), "outer({inner)");
    }

    #[test]
    fn shortcut_parameter_matches_long_form() {
        let context = RenderContext::new(json!({"other": 1}));
        let short = Parser::default().parse("{@id=42}", &registry()).unwrap();
        let long = Parser::default()
            .parse("{parameter?name=id&value=42}", &registry())
            .unwrap();
        assert_eq!(short.render(&context).unwrap(), "42");
        assert_eq!(short.render(&context).unwrap(), long.render(&context).unwrap());

        let element = short.elements()[0].as_dynamic().unwrap();
        assert_eq!(element.descriptor().name(), "parameter");
        assert_eq!(element.bound(), long.elements()[0].as_dynamic().unwrap().bound());
    }

    #[test]
    fn unknown_keyword_is_an_error() {
        let err = Parser::default().parse("{notregistered}", &registry()).unwrap_err();
        match err {
            Error::UnknownElement { name, position } => {
                assert_eq!(name, "notregistered");
                assert_eq!(position, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn conversion_failure_aborts_the_parse() {
        let err = Parser::default().parse("ok {text?case=sideways}", &registry()).unwrap_err();
        match err {
            Error::AttributeConversion { key, target, value } => {
                assert_eq!(key, "case");
                assert_eq!(target, "case");
                assert_eq!(value, "sideways");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unterminated_markup_degrades_to_text() {
        assert_eq!(render("before {text?value=x"), "before {text?value=x");
        assert_eq!(render("{outer?x={inner}"), "{outer?x={inner}");
    }

    #[test]
    fn malformed_pairs_are_tolerated() {
        assert_eq!(render("{outer?x=a=b&&c&flag}"), "outer(a=b&c)");
    }

    #[test]
    fn parser_is_shareable_across_threads() {
        let parser = std::sync::Arc::new(Parser::default());
        let registry = std::sync::Arc::new(registry());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let parser = std::sync::Arc::clone(&parser);
                let registry = std::sync::Arc::clone(&registry);
                std::thread::spawn(move || {
                    let template = format!("{{outer?x={i}}}");
                    parser
                        .parse(&template, &registry)
                        .unwrap()
                        .render(&RenderContext::default())
                        .unwrap()
                })
            })
            .collect();
        let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(outputs, vec!["outer(0)", "outer(1)", "outer(2)", "outer(3)"]);
    }
}
