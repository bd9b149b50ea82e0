//! Cache Entry Module
//!
//! Defines a single stored value with backend-native TTL and idle bounds.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// Represents a single backend entry with value and expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored (serialized) value
    pub value: Vec<u8>,
    /// Time of the last write
    pub written_at: DateTime<Utc>,
    /// Time of the last write or read
    pub last_access: DateTime<Utc>,
    /// Lifetime from the last write
    pub ttl: Duration,
    /// Allowed gap between accesses
    pub idle: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry written at `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Lifetime of the entry
    /// * `idle` - Maximum inactivity gap
    /// * `now` - Write time
    pub fn new(value: Vec<u8>, ttl: std::time::Duration, idle: std::time::Duration, now: DateTime<Utc>) -> Self {
        Self {
            value,
            written_at: now,
            last_access: now,
            ttl: to_chrono(ttl),
            idle: to_chrono(idle),
        }
    }

    // == Is Evicted ==
    /// Checks whether the backend would have dropped this entry by `now`.
    ///
    /// Boundary condition: the lifetime ends exactly when `ttl` has elapsed,
    /// while the idle window includes its last instant, so an entry accessed
    /// `idle` ago is still live.
    pub fn is_evicted(&self, now: DateTime<Utc>) -> bool {
        now - self.written_at >= self.ttl || now - self.last_access > self.idle
    }

    // == Touch ==
    /// Records an access, restarting the idle window.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_access = now;
    }
}

/// Converts a std duration, saturating at chrono's maximum.
fn to_chrono(duration: std::time::Duration) -> Duration {
    Duration::from_std(duration).unwrap_or(Duration::MAX)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    fn entry(ttl: u64, idle: u64, now: DateTime<Utc>) -> CacheEntry {
        CacheEntry::new(
            b"value".to_vec(),
            StdDuration::from_secs(ttl),
            StdDuration::from_secs(idle),
            now,
        )
    }

    #[test]
    fn test_entry_creation() {
        let now = Utc::now();
        let entry = entry(60, 30, now);

        assert_eq!(entry.value, b"value");
        assert_eq!(entry.written_at, now);
        assert_eq!(entry.last_access, now);
        assert!(!entry.is_evicted(now));
    }

    #[test]
    fn test_ttl_boundary() {
        let now = Utc::now();
        let entry = entry(60, 60, now);

        assert!(!entry.is_evicted(now + Duration::seconds(59)));
        assert!(entry.is_evicted(now + Duration::seconds(60)), "evicted exactly at TTL");
    }

    #[test]
    fn test_idle_boundary_is_inclusive() {
        let now = Utc::now();
        let entry = entry(3600, 30, now);

        assert!(!entry.is_evicted(now + Duration::seconds(30)));
        assert!(entry.is_evicted(now + Duration::seconds(31)));
    }

    #[test]
    fn test_touch_restarts_idle_window() {
        let now = Utc::now();
        let mut entry = entry(3600, 30, now);

        entry.touch(now + Duration::seconds(25));

        assert!(!entry.is_evicted(now + Duration::seconds(55)));
        assert!(entry.is_evicted(now + Duration::seconds(56)));
    }

    #[test]
    fn test_touch_does_not_extend_ttl() {
        let now = Utc::now();
        let mut entry = entry(60, 30, now);

        entry.touch(now + Duration::seconds(50));

        assert!(entry.is_evicted(now + Duration::seconds(60)));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let now = Utc::now();
        let entry = CacheEntry::new(b"v".to_vec(), StdDuration::MAX, StdDuration::MAX, now);

        assert!(!entry.is_evicted(now + Duration::days(365 * 100)));
    }
}
