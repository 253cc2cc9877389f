//! Named counters shared by the elements that opt into them.

use log::trace;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Process-wide named counters.
///
/// Each counter has its own lock, held only for the read-modify-write of one
/// increment. The map itself is read-locked on lookup and write-locked only
/// when a counter is first created.
#[derive(Debug, Default)]
pub struct CounterStore {
    counters: RwLock<HashMap<String, Arc<Mutex<Option<i64>>>>>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, name: &str) -> Arc<Mutex<Option<i64>>> {
        let key = name.to_lowercase();
        if let Some(slot) =
            self.counters.read().unwrap_or_else(PoisonError::into_inner).get(&key)
        {
            return Arc::clone(slot);
        }
        let mut counters = self.counters.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(counters.entry(key).or_default())
    }

    /// Returns the next value of counter `name`.
    ///
    /// The first call yields `start`; each later call adds `step`.
    pub fn next(&self, name: &str, start: i64, step: i64) -> i64 {
        let slot = self.slot(name);
        let mut current = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let value = match *current {
            Some(previous) => previous.saturating_add(step),
            None => start,
        };
        *current = Some(value);
        trace!("Counter '{name}' advanced to {value}");
        value
    }

    /// Last value handed out by counter `name`, if any.
    pub fn current(&self, name: &str) -> Option<i64> {
        let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
        let slot = counters.get(&name.to_lowercase())?;
        let value = *slot.lock().unwrap_or_else(PoisonError::into_inner);
        value
    }

    /// Clears counter `name` so the next call starts over.
    ///
    /// The slot is kept and cleared under its own lock, so a concurrent `next`
    /// either lands before the reset or starts the new sequence.
    pub fn reset(&self, name: &str) {
        let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = counters.get(&name.to_lowercase()) {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
            trace!("Counter '{name}' reset");
        }
    }
}
