//! Constants used throughout placemark

/// Default token opening a markup section
pub const DEFAULT_START_BOUNDARY: &str = "{";

/// Default token closing a markup section
pub const DEFAULT_END_BOUNDARY: &str = "}";

/// Default token separating the element name from its attributes
pub const DEFAULT_ATTRIBUTE_BOUNDARY: &str = "?";

/// Separates `key=value` pairs inside an attribute body
pub const ATTRIBUTE_PAIR_SEPARATOR: &str = "&";

/// Separates a key from its value inside an attribute pair
pub const ATTRIBUTE_VALUE_SEPARATOR: char = '=';

/// Leading marker of the `{@name=value}` shortcut syntax
pub const SHORTCUT_PARAMETER_MARKER: char = '@';

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Names and attribute keys of the built-in keywords
pub mod keywords {
    pub const PARAMETER: &str = "parameter";
    pub const PARAMETER_NAME: &str = "name";
    pub const PARAMETER_VALUE: &str = "value";

    pub const TEXT: &str = "text";
    pub const VALUE: &str = "value";
    pub const NOW: &str = "now";
    pub const DATE: &str = "date";
    pub const COUNTER: &str = "counter";
    pub const MACHINE: &str = "machine";
    pub const THREAD: &str = "thread";
    pub const ENV: &str = "env";
    pub const HASH: &str = "hash";

    /// Default `strftime` pattern of the date keywords
    pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Counter used when no `name` attribute is given
    pub const DEFAULT_COUNTER_NAME: &str = "default";

    /// Host name reported when the environment does not provide one
    pub const FALLBACK_MACHINE_NAME: &str = "localhost";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
