//! Ticket Registry - authoritative store for single-sign-on tickets
//!
//! Login-session and per-service tickets are added, looked up, refreshed and
//! invalidated through [`TicketRegistry`], which derives backend TTL and idle
//! bounds from each ticket's [`ExpirationPolicy`] and stays the same whatever
//! [`CacheBackend`] it runs on.

pub mod api;
pub mod backend;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod tasks;
pub mod ticket;


pub use api::AppState;
pub use backend::{CacheBackend, MemoryBackend};
pub use codec::{DigestCodec, IdentityCodec, TicketIdCodec};
pub use config::Config;
pub use error::{BackendError, RegistryError};
pub use registry::TicketRegistry;
pub use tasks::spawn_cleanup_task;
pub use ticket::{ExpirationPolicy, Ticket, TicketKind};
