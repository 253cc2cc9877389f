//! Parser configuration.

use crate::boundary::Boundaries;
use crate::constants::{
    DEFAULT_ATTRIBUTE_BOUNDARY, DEFAULT_END_BOUNDARY, DEFAULT_START_BOUNDARY,
};
use crate::error::Result;
use serde::Deserialize;

/// Boundary tokens of one parser.
///
/// Missing fields fall back to `{`, `}` and `?`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Token opening a markup section
    pub start: String,
    /// Token closing a markup section
    pub end: String,
    /// Token separating the element name from its attributes
    pub attribute: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_BOUNDARY.to_string(),
            end: DEFAULT_END_BOUNDARY.to_string(),
            attribute: DEFAULT_ATTRIBUTE_BOUNDARY.to_string(),
        }
    }
}

impl ParserOptions {
    /// Reads options from a JSON object such as `{"start": "<%", "end": "%>"}`.
    pub fn from_json(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(content)?)
    }

    /// Validates the tokens and builds the boundary set.
    ///
    /// # Returns
    /// * `Result<Boundaries>` - `Error::InvalidBoundary` for empty or clashing tokens
    pub fn boundaries(&self) -> Result<Boundaries> {
        Boundaries::new(&self.start, &self.end, &self.attribute)
    }

    pub fn validate(&self) -> Result<()> {
        self.boundaries().map(|_| ())
    }
}
