//! Eviction Sweep Task
//!
//! Background task that periodically purges evicted entries from the
//! in-process backend.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::backend::MemoryBackend;

/// Spawns a background task that periodically purges evicted entries.
///
/// Reads already hide evicted entries; the sweep only reclaims their memory.
///
/// # Arguments
/// * `backend` - Backend to sweep (clones share storage)
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let backend = MemoryBackend::new();
/// let cleanup_handle = spawn_cleanup_task(backend.clone(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(backend: MemoryBackend, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting eviction sweep task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = backend.purge_expired();

            if removed > 0 {
                info!("Eviction sweep: purged {} entries", removed);
            } else {
                debug!("Eviction sweep: nothing to purge");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::backend::CacheBackend;
    use crate::clock::MockTimeProvider;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_cleanup_task_purges_evicted_entries() {
        let clock = MockTimeProvider::default();
        let backend = MemoryBackend::with_clock(Arc::new(clock.clone()));
        backend
            .put("short".into(), b"v".to_vec(), Duration::from_secs(1), Duration::from_secs(1))
            .await
            .unwrap();

        clock.advance_secs(2);
        let handle = spawn_cleanup_task(backend.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(backend.is_empty(), "Evicted entry should have been purged");
        assert_eq!(backend.stats().evictions, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_live_entries() {
        let clock = MockTimeProvider::default();
        let backend = MemoryBackend::with_clock(Arc::new(clock.clone()));
        backend.put("long".into(), b"v".to_vec(), HOUR, HOUR).await.unwrap();

        let handle = spawn_cleanup_task(backend.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(backend.get("long").await.unwrap(), Some(b"v".to_vec()));

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(MemoryBackend::new(), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
