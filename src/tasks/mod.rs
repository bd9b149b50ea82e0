//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Eviction sweep: purges entries the in-process backend has evicted

mod cleanup;

pub use cleanup::spawn_cleanup_task;
