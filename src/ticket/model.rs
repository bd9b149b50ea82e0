//! Ticket Model
//!
//! Defines the ticket value stored in the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ticket::{ExpirationPolicy, TicketKind};

// == Ticket ==
/// A time-bounded authentication token.
///
/// Deserialization rejects a `type` tag that disagrees with the id prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTicket")]
pub struct Ticket {
    /// Raw ticket identifier
    pub id: String,
    /// Ticket type, tagged into the stored form
    #[serde(rename = "type")]
    pub kind: TicketKind,
    /// Lifetime bounds, fixed at issuance
    pub expiration_policy: ExpirationPolicy,
    /// Issuance timestamp
    pub creation_time: DateTime<Utc>,
    /// Last time the ticket was used
    pub last_used_time: DateTime<Utc>,
    /// Number of times the ticket was used
    pub count_of_uses: u32,
}

impl Ticket {
    // == Constructor ==
    /// Creates a fresh ticket issued at `now`.
    ///
    /// The kind is derived from the id prefix.
    pub fn new(id: impl Into<String>, expiration_policy: ExpirationPolicy, now: DateTime<Utc>) -> Self {
        let id = id.into();
        Self {
            kind: TicketKind::from_id(&id),
            id,
            expiration_policy,
            creation_time: now,
            last_used_time: now,
            count_of_uses: 0,
        }
    }

    // == Is Expired ==
    /// Checks logical expiration against this ticket's own policy.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_policy
            .is_expired(self.creation_time, self.last_used_time, now)
    }

    // == Mark Used ==
    /// Records a use at `now`.
    ///
    /// The change only reaches the backend once the ticket is passed to
    /// `update_ticket`.
    pub fn mark_used(&mut self, now: DateTime<Utc>) {
        self.last_used_time = now;
        self.count_of_uses = self.count_of_uses.saturating_add(1);
    }
}

/// Wire shape of a ticket before its `type` tag is checked.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredTicket {
    id: String,
    #[serde(rename = "type")]
    kind: TicketKind,
    expiration_policy: ExpirationPolicy,
    creation_time: DateTime<Utc>,
    last_used_time: DateTime<Utc>,
    #[serde(default)]
    count_of_uses: u32,
}

impl TryFrom<StoredTicket> for Ticket {
    type Error = String;

    fn try_from(stored: StoredTicket) -> Result<Self, Self::Error> {
        let expected = TicketKind::from_id(&stored.id);
        if stored.kind != expected {
            return Err(format!(
                "ticket '{}' tagged {:?} but its id denotes {:?}",
                stored.id, stored.kind, expected
            ));
        }

        Ok(Self {
            id: stored.id,
            kind: stored.kind,
            expiration_policy: stored.expiration_policy,
            creation_time: stored.creation_time,
            last_used_time: stored.last_used_time,
            count_of_uses: stored.count_of_uses,
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_ticket_derives_kind() {
        let now = Utc::now();
        let ticket = Ticket::new("TGT-1", ExpirationPolicy::timeout(7200, 1800), now);

        assert_eq!(ticket.kind, TicketKind::TicketGranting);
        assert_eq!(ticket.creation_time, now);
        assert_eq!(ticket.last_used_time, now);
        assert_eq!(ticket.count_of_uses, 0);
    }

    #[test]
    fn test_mark_used_resets_idle() {
        let start = Utc::now();
        let mut ticket = Ticket::new("ST-1", ExpirationPolicy::timeout(100, 10), start);

        ticket.mark_used(start + Duration::seconds(9));

        assert!(!ticket.is_expired(start + Duration::seconds(18)));
        assert!(ticket.is_expired(start + Duration::seconds(19)));
        assert_eq!(ticket.count_of_uses, 1);
    }

    #[test]
    fn test_serialized_form_is_tagged() {
        let ticket = Ticket::new("PT-3", ExpirationPolicy::hard_timeout(10), Utc::now());
        let json = serde_json::to_value(&ticket).unwrap();

        assert_eq!(json["type"], "proxy");
        assert_eq!(json["id"], "PT-3");
    }

    #[test]
    fn test_deserialize_rejects_unknown_type() {
        let json = r#"{
            "id": "X-1",
            "type": "refresh",
            "expiration_policy": {"time_to_live": 10, "time_to_idle": 0},
            "creation_time": "2024-01-01T00:00:00Z",
            "last_used_time": "2024-01-01T00:00:00Z"
        }"#;

        assert!(serde_json::from_str::<Ticket>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_type_contradicting_id() {
        let json = r#"{
            "id": "TGT-1",
            "type": "service",
            "expiration_policy": {"time_to_live": 10, "time_to_idle": 0},
            "creation_time": "2024-01-01T00:00:00Z",
            "last_used_time": "2024-01-01T00:00:00Z"
        }"#;

        let err = serde_json::from_str::<Ticket>(json).unwrap_err();
        assert!(err.to_string().contains("TGT-1"));
    }

    #[test]
    fn test_deserialize_rejects_unknown_field() {
        let mut json = serde_json::to_value(Ticket::new("ST-1", ExpirationPolicy::hard_timeout(10), Utc::now())).unwrap();
        json["owner"] = serde_json::Value::from("alice");

        assert!(serde_json::from_value::<Ticket>(json).is_err());
    }

    #[test]
    fn test_deserialize_roundtrip() {
        let ticket = Ticket::new("PGT-2", ExpirationPolicy::timeout(60, 30), Utc::now());
        let bytes = serde_json::to_vec(&ticket).unwrap();

        assert_eq!(serde_json::from_slice::<Ticket>(&bytes).unwrap(), ticket);
    }
}
