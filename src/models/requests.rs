//! Request DTOs for the registry API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::ticket::{ExpirationPolicy, Ticket};

/// Request body for issuing a ticket (POST /tickets)
///
/// # Fields
/// - `id`: The ticket id, conventionally prefixed with its type (`TGT-`, `ST-`, ...)
/// - `time_to_live`: Maximum lifetime in seconds
/// - `time_to_idle`: Maximum inactivity gap in seconds, 0 or absent for none
#[derive(Debug, Clone, Deserialize)]
pub struct IssueTicketRequest {
    pub id: String,
    pub time_to_live: u64,
    #[serde(default)]
    pub time_to_idle: u64,
}

impl IssueTicketRequest {
    /// Builds the ticket this request describes, issued at `now`.
    pub fn into_ticket(self, now: DateTime<Utc>) -> Ticket {
        Ticket::new(
            self.id,
            ExpirationPolicy::timeout(self.time_to_live, self.time_to_idle),
            now,
        )
    }
}
