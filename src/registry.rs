//! Ticket Registry Module
//!
//! The uniform ticket store contract, written once against [`CacheBackend`].
//!
//! The registry holds no lock of its own: single-key atomicity comes from the
//! backend, concurrent updates of one ticket are last-write-wins, and
//! multi-key operations (`delete_all`, `get_tickets`) are not snapshots.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::backend::CacheBackend;
use crate::codec::{IdentityCodec, TicketIdCodec};
use crate::error::{RegistryError, Result};
use crate::ticket::{Ticket, TicketKind};

// == Ticket Registry ==
/// Stores, looks up, refreshes and invalidates tickets.
///
/// The backend and codec are injected at construction and live as long as
/// the registry.
#[derive(Clone)]
pub struct TicketRegistry {
    backend: Arc<dyn CacheBackend>,
    codec: Arc<dyn TicketIdCodec>,
}

impl TicketRegistry {
    // == Constructor ==
    /// Creates a registry storing raw ids as backend keys.
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self::with_codec(backend, Arc::new(IdentityCodec))
    }

    /// Creates a registry that encodes ids with `codec` before every backend call.
    pub fn with_codec(backend: Arc<dyn CacheBackend>, codec: Arc<dyn TicketIdCodec>) -> Self {
        info!("Setting up ticket registry");
        Self { backend, codec }
    }

    // == Add Ticket ==
    /// Stores a new ticket with backend TTL and idle bounds taken from its policy.
    ///
    /// Fails with `InvalidTicket` before touching the backend when the id is
    /// empty, the time-to-live is zero, or the kind contradicts the id prefix.
    pub async fn add_ticket(&self, ticket: &Ticket) -> Result<()> {
        validate(ticket)?;

        let (ttl, idle) = expiration_params(ticket);
        debug!(
            ticket_id = %ticket.id,
            ttl_secs = ttl.as_secs(),
            idle_secs = idle.as_secs(),
            "Adding ticket to cache store"
        );

        self.put(ticket, ttl, idle).await?;
        info!(ticket_id = %ticket.id, kind = ?ticket.kind, "Added ticket");
        Ok(())
    }

    // == Update Ticket ==
    /// Overwrites a stored ticket, restarting its backend TTL and idle window.
    ///
    /// Returns the ticket unchanged. Rejects the same malformed tickets as
    /// [`add_ticket`](Self::add_ticket), before any backend call.
    pub async fn update_ticket(&self, ticket: Ticket) -> Result<Ticket> {
        validate(&ticket)?;

        let (ttl, idle) = expiration_params(&ticket);
        debug!(ticket_id = %ticket.id, "Updating ticket");

        self.put(&ticket, ttl, idle).await?;
        Ok(ticket)
    }

    // == Get Ticket ==
    /// Looks up a ticket by raw id.
    ///
    /// An empty id yields `None` without a backend call. The result is not
    /// filtered for logical expiration; callers check
    /// [`Ticket::is_expired`] before trusting it.
    pub async fn get_ticket(&self, ticket_id: &str) -> Result<Option<Ticket>> {
        if ticket_id.is_empty() {
            return Ok(None);
        }

        let key = self.codec.encode(ticket_id);
        match self.backend.get(&key).await? {
            Some(bytes) => decode(&key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    // == Delete Single Ticket ==
    /// Removes a ticket, then re-reads to confirm it is gone.
    ///
    /// Returns true when the confirming read finds nothing, including when
    /// the ticket never existed. The remove and the read are separate backend
    /// calls: a concurrent add of the same id in between makes this return false.
    pub async fn delete_single_ticket(&self, ticket_id: &str) -> Result<bool> {
        let key = self.codec.encode(ticket_id);
        self.backend.remove(&key).await?;

        let deleted = self.backend.get(&key).await?.is_none();
        if deleted {
            info!(ticket_id, "Removed ticket");
        } else {
            warn!(ticket_id, "Ticket still present after removal");
        }
        Ok(deleted)
    }

    // == Delete All ==
    /// Removes every ticket in the backend namespace, regardless of type or owner.
    ///
    /// Returns the count observed before clearing. Must not be exposed to
    /// untrusted callers.
    pub async fn delete_all(&self) -> Result<usize> {
        let removed = self.backend.clear().await?;
        info!(removed, "Removed all tickets");
        Ok(removed)
    }

    // == Get Tickets ==
    /// Returns every ticket the backend can enumerate.
    ///
    /// Diagnostic only: this scans the whole store and may include tickets
    /// that are already logically expired.
    pub async fn get_tickets(&self) -> Result<Vec<Ticket>> {
        self.backend
            .values()
            .await?
            .iter()
            .enumerate()
            .map(|(index, bytes)| decode_scanned(index, bytes))
            .collect()
    }

    // == Counts ==
    /// Number of stored login sessions. Diagnostic, scans the store.
    pub async fn session_count(&self) -> Result<usize> {
        self.count_where(|kind| kind.is_session()).await
    }

    /// Number of stored per-service grants. Diagnostic, scans the store.
    pub async fn service_ticket_count(&self) -> Result<usize> {
        self.count_where(|kind| kind.is_service()).await
    }

    async fn count_where(&self, predicate: impl Fn(TicketKind) -> bool) -> Result<usize> {
        let tickets = self.get_tickets().await?;
        Ok(tickets.iter().filter(|t| predicate(t.kind)).count())
    }

    async fn put(&self, ticket: &Ticket, ttl: Duration, idle: Duration) -> Result<()> {
        let key = self.codec.encode(&ticket.id);
        let value = serde_json::to_vec(ticket).map_err(|source| RegistryError::Encode {
            id: ticket.id.clone(),
            source,
        })?;

        self.backend.put(key, value, ttl, idle).await?;
        Ok(())
    }
}

impl std::fmt::Debug for TicketRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketRegistry").finish_non_exhaustive()
    }
}

fn validate(ticket: &Ticket) -> Result<()> {
    if ticket.id.is_empty() {
        return Err(RegistryError::InvalidTicket("ticket id cannot be empty".to_string()));
    }
    if let Some(msg) = ticket.expiration_policy.validate() {
        return Err(RegistryError::InvalidTicket(format!("{}: {}", ticket.id, msg)));
    }
    let expected = TicketKind::from_id(&ticket.id);
    if ticket.kind != expected {
        return Err(RegistryError::InvalidTicket(format!(
            "{}: tagged {:?} but the id denotes {:?}",
            ticket.id, ticket.kind, expected
        )));
    }
    Ok(())
}

/// Backend TTL and idle bounds for a ticket, recomputed on every write.
fn expiration_params(ticket: &Ticket) -> (Duration, Duration) {
    let policy = &ticket.expiration_policy;
    (
        Duration::from_secs(policy.time_to_live),
        Duration::from_secs(policy.effective_idle()),
    )
}

fn decode(key: &str, bytes: &[u8]) -> Result<Ticket> {
    serde_json::from_slice(bytes).map_err(|source| RegistryError::Decode {
        key: key.to_string(),
        source,
    })
}

/// Decodes a value found by a scan, where the backend key is unknown.
///
/// Errors name the stored `id` when the bytes are JSON carrying one, and the
/// scan position otherwise.
fn decode_scanned(index: usize, bytes: &[u8]) -> Result<Ticket> {
    serde_json::from_slice(bytes).map_err(|source| {
        let key = serde_json::from_slice::<serde_json::Value>(bytes)
            .ok()
            .and_then(|value| value.get("id")?.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("scan entry #{}", index));
        RegistryError::Decode { key, source }
    })
}
