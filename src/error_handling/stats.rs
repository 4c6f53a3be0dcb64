//! Processing statistics tracking.
//!
//! This module provides thread-safe counters for every pipeline stage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::StageCounter;

/// Thread-safe processing statistics tracker.
///
/// Every [`StageCounter`] is initialized to zero on creation. Counters are
/// atomic so concurrent weather lookups can record into the same instance.
#[derive(Debug)]
pub struct ProcessingStats {
    counters: HashMap<StageCounter, AtomicUsize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut counters = HashMap::new();
        for counter in StageCounter::iter() {
            counters.insert(counter, AtomicUsize::new(0));
        }
        ProcessingStats { counters }
    }

    /// Increment a counter by one.
    pub fn increment(&self, counter: StageCounter) {
        self.add(counter, 1);
    }

    /// Add `amount` to a counter.
    pub fn add(&self, counter: StageCounter, amount: usize) {
        if let Some(value) = self.counters.get(&counter) {
            value.fetch_add(amount, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                counter
            );
        }
    }

    /// Get the current value of a counter.
    ///
    /// Returns 0 if the counter is not in the map (should never happen if properly initialized).
    pub fn get(&self, counter: StageCounter) -> usize {
        self.counters
            .get(&counter)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Snapshot of all counters in declaration order.
    pub fn snapshot(&self) -> Vec<(StageCounter, usize)> {
        StageCounter::iter().map(|c| (c, self.get(c))).collect()
    }
}
