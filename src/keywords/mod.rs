//! Built-in keyword catalog.
//!
//! Each keyword is a plain descriptor: a name, its declared properties and a
//! render function. Hosts add their own through
//! [`ElementRegistry::register`](crate::registry::ElementRegistry::register).

mod counter;
mod date;
mod hash;
mod system;
mod text;
mod value;

use crate::registry::ElementDescriptor;

pub use counter::counter;
pub use date::{date, now};
pub use hash::hash;
pub use system::{env, machine, thread};
pub use text::text;
pub use value::{parameter, value};

/// Every built-in keyword descriptor.
pub fn builtins() -> Vec<ElementDescriptor> {
    vec![
        text(),
        value(),
        parameter(),
        now(),
        date(),
        counter(),
        machine(),
        thread(),
        env(),
        hash(),
    ]
}
