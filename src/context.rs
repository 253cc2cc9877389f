//! Runtime data handed to elements at render time.

use crate::counter::CounterStore;
use serde_json::Value;
use std::sync::Arc;

/// Data context of one render call.
///
/// Holds the caller's data and the counter store elements may use. The store
/// is injected so callers decide which renders share counters.
#[derive(Debug, Clone)]
pub struct RenderContext {
    data: Value,
    counters: Arc<CounterStore>,
}

impl RenderContext {
    /// Creates a context with its own, empty counter store.
    pub fn new(data: Value) -> Self {
        Self { data, counters: Arc::new(CounterStore::new()) }
    }

    /// Creates a context sharing an existing counter store.
    pub fn with_counters(data: Value, counters: Arc<CounterStore>) -> Self {
        Self { data, counters }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn counters(&self) -> &CounterStore {
        &self.counters
    }

    /// Looks up a value by JSON pointer (`/a/0/b`) or dotted path (`a.0.b`).
    ///
    /// An empty path selects the whole data value. Object keys fall back to a
    /// case-insensitive match.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.data);
        }
        if path.starts_with('/') {
            return self.data.pointer(path);
        }
        path.split('.').try_fold(&self.data, |current, segment| match current {
            Value::Object(map) => map.get(segment).or_else(|| {
                map.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(segment))
                    .map(|(_, value)| value)
            }),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}
