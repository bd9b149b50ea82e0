//! Cache Backend Module
//!
//! The seam between the registry and a concrete storage technology. The
//! registry is written once against [`CacheBackend`]; each store (in-process
//! map, distributed cache, database) provides one implementation.
//!
//! # Implementing a Backend
//!
//! 1. Implement [`CacheBackend`] over the store's client handle
//! 2. Map client failures to [`BackendError::Unavailable`](crate::error::BackendError)
//! 3. Do not retry inside the adapter; retry belongs to a surrounding layer
//!
//! See [`MemoryBackend`] for a reference implementation.

mod entry;
mod memory;
mod stats;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BackendResult;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryBackend;
pub use stats::BackendStats;

/// Backend-agnostic key/value store with native expiration.
///
/// Keys are encoded ticket ids, values are serialized tickets. Single-key
/// operations are expected to be atomic; multi-key operations are not
/// snapshots.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Upserts `value` under `key`.
    ///
    /// `ttl` bounds the entry's total lifetime and `idle` its inactivity gap.
    /// Both are fixed at write time.
    async fn put(&self, key: String, value: Vec<u8>, ttl: Duration, idle: Duration) -> BackendResult<()>;

    /// Returns the stored value unless the backend has already evicted it.
    async fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>>;

    /// Removes the entry if present. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> BackendResult<()>;

    /// Removes every entry and returns how many were present beforehand.
    ///
    /// The count is taken before clearing and is advisory under concurrent writers.
    async fn clear(&self) -> BackendResult<usize>;

    /// Number of entries currently stored.
    async fn size(&self) -> BackendResult<usize>;

    /// Every stored value.
    ///
    /// Expensive on most stores (full scan or replica fetch); not for hot paths.
    async fn values(&self) -> BackendResult<Vec<Vec<u8>>>;
}
