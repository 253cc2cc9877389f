use crate::constants::keywords::{COUNTER, DEFAULT_COUNTER_NAME};
use crate::convert::IntConverter;
use crate::registry::{ElementDescriptor, PropertySpec};

/// `{counter?name=orders&start=100&step=10}`: next value of a named counter.
///
/// Counters live in the context's counter store, so every render sharing a
/// store continues the same sequence.
pub fn counter() -> ElementDescriptor {
    ElementDescriptor::new(COUNTER, |bound, ctx| {
        let name = bound.get_str("name").unwrap_or(DEFAULT_COUNTER_NAME);
        let start = bound.get_i64("start").unwrap_or(1);
        let step = bound.get_i64("step").unwrap_or(1);
        Ok(ctx.counters().next(name, start, step).to_string())
    })
    .property(PropertySpec::new("name").alias("key").default_value(DEFAULT_COUNTER_NAME))
    .property(PropertySpec::new("start").converter(IntConverter).default_value("1"))
    .property(PropertySpec::new("step").converter(IntConverter).default_value("1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeMap;
    use crate::boundary::Boundaries;
    use crate::context::RenderContext;

    #[test]
    fn counts_per_name_within_a_context() {
        let descriptor = counter();
        let ctx = RenderContext::default();
        let bind = |body: &str| {
            descriptor.bind(&AttributeMap::parse(body, &Boundaries::default())).unwrap()
        };

        let orders = bind("name=orders&start=100&step=10");
        let plain = bind("");
        assert_eq!(descriptor.render(&orders, &ctx).unwrap(), "100");
        assert_eq!(descriptor.render(&orders, &ctx).unwrap(), "110");
        assert_eq!(descriptor.render(&plain, &ctx).unwrap(), "1");
        assert_eq!(descriptor.render(&plain, &ctx).unwrap(), "2");

        let fresh = RenderContext::default();
        assert_eq!(descriptor.render(&orders, &fresh).unwrap(), "100");
    }
}
