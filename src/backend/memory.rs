//! In-Memory Backend Module
//!
//! HashMap-backed [`CacheBackend`] with TTL and idle eviction, used for
//! single-node deployments and as the faithful test double for distributed
//! caches.
//!
//! Eviction is lazy: an entry past its bounds is invisible to every read and
//! is dropped on the next `get` of its key or by [`MemoryBackend::purge_expired`],
//! which the cleanup task calls periodically.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::backend::{BackendStats, CacheBackend, CacheEntry};
use crate::clock::{SystemTimeProvider, TimeProvider};
use crate::error::BackendResult;

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, CacheEntry>,
    stats: BackendStats,
}

// == Memory Backend ==
/// In-process cache backend.
///
/// Cheaply cloneable; clones share the same entries.
#[derive(Clone)]
pub struct MemoryBackend {
    state: Arc<RwLock<MemoryState>>,
    clock: Arc<dyn TimeProvider>,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an empty backend driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemTimeProvider::new()))
    }

    /// Creates an empty backend driven by `clock`.
    pub fn with_clock(clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            clock,
        }
    }

    // == Purge Expired ==
    /// Drops every entry whose TTL or idle bound has elapsed.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut state = self.state.write();

        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.is_evicted(now));
        let removed = before - state.entries.len();

        state.stats.record_evictions(removed);
        let total = state.entries.len();
        state.stats.set_total_entries(total);
        removed
    }

    // == Stats ==
    /// Returns current backend statistics.
    pub fn stats(&self) -> BackendStats {
        let state = self.state.read();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        stats
    }

    /// Number of physically stored entries, including evicted ones not yet purged.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    fn live_count(state: &MemoryState, now: chrono::DateTime<chrono::Utc>) -> usize {
        state
            .entries
            .values()
            .filter(|entry| !entry.is_evicted(now))
            .count()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn put(&self, key: String, value: Vec<u8>, ttl: Duration, idle: Duration) -> BackendResult<()> {
        let entry = CacheEntry::new(value, ttl, idle, self.clock.now());

        let mut state = self.state.write();
        state.entries.insert(key, entry);
        let total = state.entries.len();
        state.stats.set_total_entries(total);
        Ok(())
    }

    async fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>> {
        let now = self.clock.now();
        let mut guard = self.state.write();
        let state = &mut *guard;

        match state.entries.get_mut(key) {
            None => {
                state.stats.record_miss();
                Ok(None)
            }
            Some(entry) if !entry.is_evicted(now) => {
                entry.touch(now);
                state.stats.record_hit();
                Ok(Some(entry.value.clone()))
            }
            Some(_) => {
                debug!(key, "Dropping evicted entry on read");
                state.entries.remove(key);
                state.stats.record_evictions(1);
                state.stats.record_miss();
                state.stats.set_total_entries(state.entries.len());
                Ok(None)
            }
        }
    }

    async fn remove(&self, key: &str) -> BackendResult<()> {
        let mut state = self.state.write();
        state.entries.remove(key);
        let total = state.entries.len();
        state.stats.set_total_entries(total);
        Ok(())
    }

    async fn clear(&self) -> BackendResult<usize> {
        let now = self.clock.now();
        let mut state = self.state.write();

        let count = Self::live_count(&state, now);
        state.entries.clear();
        state.stats.set_total_entries(0);
        Ok(count)
    }

    async fn size(&self) -> BackendResult<usize> {
        let now = self.clock.now();
        Ok(Self::live_count(&self.state.read(), now))
    }

    async fn values(&self) -> BackendResult<Vec<Vec<u8>>> {
        let now = self.clock.now();
        let state = self.state.read();

        Ok(state
            .entries
            .values()
            .filter(|entry| !entry.is_evicted(now))
            .map(|entry| entry.value.clone())
            .collect())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockTimeProvider;

    const MINUTE: Duration = Duration::from_secs(60);
    const HOUR: Duration = Duration::from_secs(3600);

    fn backend() -> (MemoryBackend, MockTimeProvider) {
        let clock = MockTimeProvider::default();
        (MemoryBackend::with_clock(Arc::new(clock.clone())), clock)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let (backend, _) = backend();

        backend.put("k".into(), b"v".to_vec(), HOUR, HOUR).await.unwrap();

        assert_eq!(backend.get("k").await.unwrap(), Some(b"v".to_vec()));
        assert_eq!(backend.size().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (backend, _) = backend();
        assert_eq!(backend.get("missing").await.unwrap(), None);
        assert_eq!(backend.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let (backend, _) = backend();

        backend.put("k".into(), b"v1".to_vec(), HOUR, HOUR).await.unwrap();
        backend.put("k".into(), b"v2".to_vec(), HOUR, HOUR).await.unwrap();

        assert_eq!(backend.get("k").await.unwrap(), Some(b"v2".to_vec()));
        assert_eq!(backend.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let (backend, _) = backend();
        assert!(backend.remove("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_ttl_eviction() {
        let (backend, clock) = backend();

        backend.put("k".into(), b"v".to_vec(), MINUTE, HOUR).await.unwrap();

        clock.advance_secs(59);
        assert!(backend.get("k").await.unwrap().is_some());

        clock.advance_secs(1);
        assert!(backend.get("k").await.unwrap().is_none());
        assert!(backend.is_empty(), "evicted entry dropped on read");
        assert_eq!(backend.stats().evictions, 1);
    }

    #[tokio::test]
    async fn test_read_restarts_idle_window() {
        let (backend, clock) = backend();

        backend.put("k".into(), b"v".to_vec(), HOUR, MINUTE).await.unwrap();

        clock.advance_secs(50);
        assert!(backend.get("k").await.unwrap().is_some());

        clock.advance_secs(60);
        assert!(backend.get("k").await.unwrap().is_some());

        clock.advance_secs(61);
        assert!(backend.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_evicted_entries_hidden_from_scans() {
        let (backend, clock) = backend();

        backend.put("short".into(), b"a".to_vec(), MINUTE, MINUTE).await.unwrap();
        backend.put("long".into(), b"b".to_vec(), HOUR, HOUR).await.unwrap();

        clock.advance_secs(120);

        assert_eq!(backend.size().await.unwrap(), 1);
        assert_eq!(backend.values().await.unwrap(), vec![b"b".to_vec()]);
        assert_eq!(backend.len(), 2, "not purged yet");
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let (backend, clock) = backend();

        backend.put("short".into(), b"a".to_vec(), MINUTE, MINUTE).await.unwrap();
        backend.put("long".into(), b"b".to_vec(), HOUR, HOUR).await.unwrap();

        clock.advance_secs(120);

        assert_eq!(backend.purge_expired(), 1);
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.stats().evictions, 1);
        assert_eq!(backend.purge_expired(), 0);
    }

    #[tokio::test]
    async fn test_clear_returns_live_count() {
        let (backend, clock) = backend();

        backend.put("a".into(), b"1".to_vec(), HOUR, HOUR).await.unwrap();
        backend.put("b".into(), b"2".to_vec(), HOUR, HOUR).await.unwrap();
        backend.put("c".into(), b"3".to_vec(), MINUTE, MINUTE).await.unwrap();
        clock.advance_secs(61);

        assert_eq!(backend.clear().await.unwrap(), 2);
        assert!(backend.is_empty());
        assert_eq!(backend.clear().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let (backend, _) = backend();
        let clone = backend.clone();

        backend.put("k".into(), b"v".to_vec(), HOUR, HOUR).await.unwrap();

        assert!(clone.get("k").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let (backend, _) = backend();

        backend.put("k".into(), b"v".to_vec(), HOUR, HOUR).await.unwrap();
        backend.get("k").await.unwrap();
        backend.get("nope").await.unwrap();

        let stats = backend.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
