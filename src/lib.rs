/// Command-line argument parsing for the `placemark` binary.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants shared across modules.
pub mod constants;

/// Boundary tokens and escape handling.
pub mod boundary;

/// Attribute body parsing.
pub mod attributes;

/// Attribute value converters.
pub mod convert;

/// Parser configuration.
pub mod config;

/// Keyword name to descriptor catalog.
pub mod registry;

/// Parsed template elements.
pub mod element;

/// Template tokenizer.
pub mod parser;

/// Render-time data and counters.
pub mod context;
pub mod counter;

/// Composite format strings.
pub mod format;

/// Built-in keywords.
pub mod keywords;

/// Template parsing and rendering facade.
pub mod renderer;

pub use config::ParserOptions;
pub use context::RenderContext;
pub use element::{DynamicElement, Element, ElementCollection, StaticElement};
pub use error::{Error, Result};
pub use parser::Parser;
pub use registry::{ElementDescriptor, ElementRegistry, PropertySpec};
pub use renderer::{KeywordRenderer, TemplateRenderer};
