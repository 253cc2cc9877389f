use crate::constants::{exit_codes, verbosity};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for placemark.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Template text, or `-` to read it from stdin.
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Context data as a JSON string.
    #[arg(short, long)]
    pub context: Option<String>,

    /// Parser options as a JSON object, e.g. `{"start": "<%", "end": "%>"}`.
    #[arg(long)]
    pub options: Option<String>,

    /// Token opening a markup section (overrides `--options`).
    #[arg(long)]
    pub start: Option<String>,

    /// Token closing a markup section (overrides `--options`).
    #[arg(long)]
    pub end: Option<String>,

    /// Token separating a keyword from its attributes (overrides `--options`).
    #[arg(long)]
    pub attribute: Option<String>,

    /// Print the parsed template back as template text instead of rendering it.
    #[arg(long = "to-text")]
    pub to_text: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
