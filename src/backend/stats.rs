//! Backend Statistics Module
//!
//! Tracks hits, misses, and evictions for the in-process backend.

use serde::Serialize;

// == Backend Stats ==
/// Tracks backend access metrics.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BackendStats {
    /// Number of reads that found a live entry
    pub hits: u64,
    /// Number of reads that found nothing (absent or evicted)
    pub misses: u64,
    /// Number of entries dropped because their TTL or idle bound elapsed
    pub evictions: u64,
    /// Current number of stored entries
    pub total_entries: usize,
}

impl BackendStats {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
