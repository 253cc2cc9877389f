use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A markup body names a keyword that is not registered.
    #[error("Unknown element '{name}' at position {position}.")]
    UnknownElement { name: String, position: usize },

    /// An attribute value could not be converted to the type its property expects.
    #[error("Cannot convert attribute '{key}' value '{value}' to {target}.")]
    AttributeConversion { key: String, target: String, value: String },

    #[error("Element '{name}' is already registered.")]
    DuplicateElement { name: String },

    /// Empty or clashing boundary tokens in a parser configuration.
    #[error("Invalid boundary configuration: {0}.")]
    InvalidBoundary(String),

    #[error("Invalid format string: {0}.")]
    Format(String),

    /// A keyword failed while producing its output.
    #[error("Element '{name}' failed to render: {message}")]
    RenderError { name: String, message: String },
}

/// Convenience type alias for Results with placemark's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
