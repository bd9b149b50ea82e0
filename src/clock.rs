//! Clock Module
//!
//! Time source used for ticket timestamps and backend eviction, so tests can
//! drive expiration without sleeping.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

/// Provides the current wall-clock time.
pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Time provider backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually controlled time provider for tests.
///
/// Clones share the same current time.
#[derive(Debug, Clone)]
pub struct MockTimeProvider {
    current_time: Arc<RwLock<DateTime<Utc>>>,
}

impl MockTimeProvider {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            current_time: Arc::new(RwLock::new(start_time)),
        }
    }

    /// Moves the clock forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.write();
        *time += duration;
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: i64) {
        self.advance(Duration::seconds(secs));
    }
}

impl Default for MockTimeProvider {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl TimeProvider for MockTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        *self.current_time.read()
    }
}
