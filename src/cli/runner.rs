use crate::{
    cli::Args,
    config::ParserOptions,
    constants::STDIN_INDICATOR,
    error::Result,
    registry::ElementRegistry,
    renderer::{KeywordRenderer, TemplateRenderer},
};
use log::{debug, info};
use std::io::Read;
use std::sync::Arc;

/// Drives one CLI invocation: read the template, parse it, then render or serialize it.
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the invocation and returns the text to print.
    pub fn run(self) -> Result<String> {
        let template = self.read_template()?;
        let options = self.parser_options()?;
        let renderer =
            KeywordRenderer::with_options(&options, Arc::new(ElementRegistry::with_builtins()))?;

        let collection = renderer.parse(&template)?;
        info!("Parsed template into {} element(s)", collection.len());

        if self.args.to_text {
            return Ok(renderer.to_text(&collection));
        }

        let context = self.context()?;
        renderer.render_collection(&collection, &context)
    }

    fn read_template(&self) -> Result<String> {
        if self.args.template == STDIN_INDICATOR {
            debug!("Reading template from stdin");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        } else {
            Ok(self.args.template.clone())
        }
    }

    /// `--options` JSON first, then individual boundary flags on top.
    fn parser_options(&self) -> Result<ParserOptions> {
        let mut options = match &self.args.options {
            Some(json) => ParserOptions::from_json(json)?,
            None => ParserOptions::default(),
        };
        if let Some(start) = &self.args.start {
            options.start = start.clone();
        }
        if let Some(end) = &self.args.end {
            options.end = end.clone();
        }
        if let Some(attribute) = &self.args.attribute {
            options.attribute = attribute.clone();
        }
        options.validate()?;
        debug!("Parser options: {options:?}");
        Ok(options)
    }

    fn context(&self) -> Result<serde_json::Value> {
        match self.args.context.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(raw)?),
            _ => Ok(serde_json::Value::Null),
        }
    }
}

/// Runs the CLI with parsed arguments.
pub fn run(args: Args) -> Result<String> {
    Runner::new(args).run()
}
