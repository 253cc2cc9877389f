//! Delimiter tokens marking markup inside template text.
//!
//! A boundary is escaped by doubling it: with the default start token `{`,
//! the text `{{` stands for a literal `{`.

use crate::constants::{
    DEFAULT_ATTRIBUTE_BOUNDARY, DEFAULT_END_BOUNDARY, DEFAULT_START_BOUNDARY,
};
use crate::error::{Error, Result};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boundary {
    token: String,
    doubled: String,
}

impl Boundary {
    /// Creates a boundary from a non-empty token.
    ///
    /// # Returns
    /// * `Result<Boundary>` - `Error::InvalidBoundary` for an empty token
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::InvalidBoundary("boundary token must not be empty".into()));
        }
        Ok(Self::from_token(token))
    }

    pub(crate) fn from_token(token: String) -> Self {
        let doubled = token.repeat(2);
        Self { token, doubled }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Length of the token in bytes.
    pub fn len(&self) -> usize {
        self.token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    /// Finds the first occurrence of the token at or after `from`.
    ///
    /// # Arguments
    /// * `text` - Text to search
    /// * `from` - Byte offset to start from
    /// * `search_entire_remainder` - When false, only an occurrence exactly at `from` counts
    ///
    /// # Returns
    /// * `Option<usize>` - Byte offset of the occurrence, `None` if absent
    pub fn index_of(
        &self,
        text: &str,
        from: usize,
        search_entire_remainder: bool,
    ) -> Option<usize> {
        let rest = text.get(from..)?;
        if search_entire_remainder {
            rest.find(&self.token).map(|idx| idx + from)
        } else if rest.starts_with(&self.token) {
            Some(from)
        } else {
            None
        }
    }

    /// True if the occurrence at `index` is immediately repeated.
    pub fn is_doubled(&self, text: &str, index: usize) -> bool {
        text.get(index..).is_some_and(|rest| rest.starts_with(&self.doubled))
    }

    /// True if the occurrence at `index` is immediately followed or preceded
    /// by another occurrence of the token.
    pub fn is_escaped(&self, text: &str, index: usize) -> bool {
        if self.is_doubled(text, index) {
            return true;
        }
        index
            .checked_sub(self.len())
            .and_then(|before| text.get(before..index))
            .is_some_and(|prev| prev == self.token)
    }

    /// Returns the offset right after the occurrence at `index`.
    ///
    /// With `through_escape` a doubled occurrence is skipped as a whole.
    ///
    /// # Returns
    /// * `Option<usize>` - Offset after the boundary, `None` once the end of input is reached
    pub fn shift_right(&self, text: &str, index: usize, through_escape: bool) -> Option<usize> {
        let mut next = index + self.len();
        if through_escape && self.is_doubled(text, index) {
            next += self.len();
        }
        (next < text.len()).then_some(next)
    }

    /// Doubles every occurrence of the token.
    pub fn escape(&self, text: &str) -> String {
        text.replace(&self.token, &self.doubled)
    }

    /// Collapses doubled occurrences of the token to a single one.
    pub fn unescape(&self, text: &str) -> String {
        text.replace(&self.doubled, &self.token)
    }
}

impl Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// The three boundaries of one parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundaries {
    pub start: Boundary,
    pub end: Boundary,
    pub attribute: Boundary,
}

impl Boundaries {
    /// Builds a boundary set, rejecting empty or clashing tokens.
    pub fn new(start: &str, end: &str, attribute: &str) -> Result<Self> {
        let start = Boundary::new(start)?;
        let end = Boundary::new(end)?;
        let attribute = Boundary::new(attribute)?;

        for (a, b) in [(&start, &end), (&start, &attribute), (&end, &attribute)] {
            if a == b {
                return Err(Error::InvalidBoundary(format!(
                    "boundary '{a}' is used for more than one role"
                )));
            }
        }
        Ok(Self { start, end, attribute })
    }

    /// Collapses doubled start, end and attribute tokens.
    pub fn unescape(&self, text: &str) -> String {
        let text = self.start.unescape(text);
        let text = self.end.unescape(&text);
        self.attribute.unescape(&text)
    }

    /// Doubles start, end and attribute tokens.
    pub fn escape(&self, text: &str) -> String {
        let text = self.start.escape(text);
        let text = self.end.escape(&text);
        self.attribute.escape(&text)
    }

    /// Finds the first occurrence of `needle` at or after `from` that is
    /// neither doubled nor inside nested markup.
    ///
    /// Doubled start and end tokens count as literal text; an unescaped start
    /// token opens nested markup until its matching end token.
    pub fn find_outside_markup(&self, text: &str, from: usize, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        let mut depth = 0usize;
        let mut idx = from;

        while idx < text.len() {
            let rest = text.get(idx..)?;
            if rest.starts_with(self.start.token()) {
                if self.start.is_doubled(text, idx) {
                    idx += self.start.len() * 2;
                } else {
                    depth += 1;
                    idx += self.start.len();
                }
                continue;
            }
            if rest.starts_with(self.end.token()) {
                if depth > 0 {
                    depth -= 1;
                    idx += self.end.len();
                } else if self.end.is_doubled(text, idx) {
                    idx += self.end.len() * 2;
                } else {
                    idx += self.end.len();
                }
                continue;
            }
            if depth == 0 && rest.starts_with(needle) {
                if rest[needle.len()..].starts_with(needle) {
                    idx += needle.len() * 2;
                    continue;
                }
                return Some(idx);
            }
            idx += rest.chars().next().map_or(1, char::len_utf8);
        }
        None
    }
}

impl Default for Boundaries {
    fn default() -> Self {
        Self {
            start: Boundary::from_token(DEFAULT_START_BOUNDARY.to_string()),
            end: Boundary::from_token(DEFAULT_END_BOUNDARY.to_string()),
            attribute: Boundary::from_token(DEFAULT_ATTRIBUTE_BOUNDARY.to_string()),
        }
    }
}
