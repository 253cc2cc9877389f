//! Query-string-like attribute bodies: `key1=val1&key2=val2`.

use crate::boundary::Boundaries;
use crate::constants::{ATTRIBUTE_PAIR_SEPARATOR, ATTRIBUTE_VALUE_SEPARATOR};

const DOUBLED_PAIR_SEPARATOR: &str = "&&";

/// Ordered multimap of attribute pairs as written in the markup.
///
/// Keys compare case-insensitively and duplicates are retained; lookups
/// return the first matching pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    pairs: Vec<(String, String)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value whose key equals `key`, ignoring ASCII case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// First pair, in attribute order, whose key matches any of `keys`.
    pub fn find_any(&self, keys: &[&str]) -> Option<(&str, &str)> {
        self.pairs
            .iter()
            .find(|(k, _)| keys.iter().any(|candidate| k.eq_ignore_ascii_case(candidate)))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Parses an attribute body.
    ///
    /// Pairs are split on `&` outside nested markup, then on the first `=`.
    /// A pair without `=` yields an empty value; further `=` characters stay in
    /// the value. Empty segments are skipped. Keys and values are unescaped,
    /// `&&` standing for a literal `&`.
    ///
    /// # Arguments
    /// * `body` - Text following the attribute boundary
    /// * `boundaries` - Boundaries used to detect nested markup and escapes
    pub fn parse(body: &str, boundaries: &Boundaries) -> Self {
        split_pairs(body, boundaries)
            .into_iter()
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once(ATTRIBUTE_VALUE_SEPARATOR) {
                Some((key, value)) => (decode(key, boundaries), decode(value, boundaries)),
                None => (decode(pair, boundaries), String::new()),
            })
            .collect()
    }

    /// Serializes the pairs back to `key=value&key=value` with boundaries escaped.
    pub fn to_query(&self, boundaries: &Boundaries) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}{ATTRIBUTE_VALUE_SEPARATOR}{}",
                    encode(k, boundaries),
                    encode(v, boundaries)
                )
            })
            .collect::<Vec<_>>()
            .join(ATTRIBUTE_PAIR_SEPARATOR)
    }
}

impl FromIterator<(String, String)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { pairs: iter.into_iter().collect() }
    }
}

/// Splits on the pair separator, keeping separators inside nested markup.
fn split_pairs<'a>(body: &'a str, boundaries: &Boundaries) -> Vec<&'a str> {
    let separator = ATTRIBUTE_PAIR_SEPARATOR;
    let mut pairs = Vec::new();
    let mut segment_start = 0;

    while let Some(idx) = boundaries.find_outside_markup(body, segment_start, separator) {
        pairs.push(&body[segment_start..idx]);
        segment_start = idx + separator.len();
    }
    pairs.push(&body[segment_start..]);
    pairs
}

fn decode(text: &str, boundaries: &Boundaries) -> String {
    boundaries.unescape(text).replace(DOUBLED_PAIR_SEPARATOR, ATTRIBUTE_PAIR_SEPARATOR)
}

fn encode(text: &str, boundaries: &Boundaries) -> String {
    boundaries.escape(text).replace(ATTRIBUTE_PAIR_SEPARATOR, DOUBLED_PAIR_SEPARATOR)
}
