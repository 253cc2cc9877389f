use crate::constants::keywords::{ENV, FALLBACK_MACHINE_NAME, MACHINE, THREAD};
use crate::convert::EnumConverter;
use crate::registry::{ElementDescriptor, PropertySpec};

/// `{machine}`: host name from the environment.
pub fn machine() -> ElementDescriptor {
    ElementDescriptor::new(MACHINE, |_, _| {
        Ok(["HOSTNAME", "COMPUTERNAME"]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| FALLBACK_MACHINE_NAME.to_string()))
    })
}

/// `{thread?property=name|id}`: the rendering thread.
pub fn thread() -> ElementDescriptor {
    ElementDescriptor::new(THREAD, |bound, _| {
        let current = std::thread::current();
        Ok(match bound.get_str("property") {
            Some("id") => {
                // `ThreadId` has no stable numeric accessor. Its `Debug` output is
                // `ThreadId(N)` today; any other shape is rendered as printed.
                let id = format!("{:?}", current.id());
                id.strip_prefix("ThreadId(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .map_or_else(|| id.clone(), str::to_string)
            }
            _ => current.name().unwrap_or("unnamed").to_string(),
        })
    })
    .property(
        PropertySpec::new("property")
            .alias("prop")
            .converter(EnumConverter::new("thread property", &["name", "id"]))
            .default_value("name"),
    )
}

/// `{env?name=HOME&default=/}`: an environment variable.
pub fn env() -> ElementDescriptor {
    ElementDescriptor::new(ENV, |bound, _| {
        let fallback = bound.get_str("default").unwrap_or_default();
        Ok(match bound.get_str("name") {
            Some(name) if !name.is_empty() => {
                std::env::var(name).unwrap_or_else(|_| fallback.to_string())
            }
            _ => fallback.to_string(),
        })
    })
    .property(PropertySpec::new("name").alias("variable"))
    .property(PropertySpec::new("default"))
}
