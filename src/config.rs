//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::sync::Arc;

use crate::codec::{DigestCodec, IdentityCodec, TicketIdCodec};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// Salt for ticket id digests; ids are stored raw when unset
    pub ticket_id_salt: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `TICKET_ID_SALT` - Enables digest-encoded ticket ids (default: unset)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(1),
            ticket_id_salt: env::var("TICKET_ID_SALT").ok().filter(|s| !s.is_empty()),
        }
    }

    /// Builds the ticket id codec selected by this configuration.
    pub fn codec(&self) -> Arc<dyn TicketIdCodec> {
        match &self.ticket_id_salt {
            Some(salt) => Arc::new(DigestCodec::new(salt.as_bytes())),
            None => Arc::new(IdentityCodec),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval: 1,
            ticket_id_salt: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("cleanup_interval", &self.cleanup_interval)
            .field("ticket_id_salt", &self.ticket_id_salt.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
