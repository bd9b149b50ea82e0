//! Ticket Kind Module

use serde::{Deserialize, Serialize};

// == Ticket Kind ==
/// Ticket type, recognised from the conventional id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketKind {
    /// Login session (`TGT-`)
    TicketGranting,
    /// Per-service grant (`ST-`)
    Service,
    /// Proxy login session (`PGT-`)
    ProxyGranting,
    /// Per-service grant issued to a proxy (`PT-`)
    Proxy,
    /// Anything without a known prefix
    Other,
}

impl TicketKind {
    const PREFIXES: [(&'static str, TicketKind); 4] = [
        ("TGT-", TicketKind::TicketGranting),
        ("PGT-", TicketKind::ProxyGranting),
        ("ST-", TicketKind::Service),
        ("PT-", TicketKind::Proxy),
    ];

    /// Classifies a raw ticket id by its prefix.
    pub fn from_id(id: &str) -> Self {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| id.starts_with(prefix))
            .map(|(_, kind)| *kind)
            .unwrap_or(TicketKind::Other)
    }

    /// Login sessions, proxied or not.
    pub fn is_session(&self) -> bool {
        matches!(self, TicketKind::TicketGranting | TicketKind::ProxyGranting)
    }

    /// Per-service grants, proxied or not.
    pub fn is_service(&self) -> bool {
        matches!(self, TicketKind::Service | TicketKind::Proxy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_prefixes() {
        assert_eq!(TicketKind::from_id("TGT-1-abc"), TicketKind::TicketGranting);
        assert_eq!(TicketKind::from_id("PGT-9"), TicketKind::ProxyGranting);
        assert_eq!(TicketKind::from_id("ST-42"), TicketKind::Service);
        assert_eq!(TicketKind::from_id("PT-7"), TicketKind::Proxy);
        assert_eq!(TicketKind::from_id("session-1"), TicketKind::Other);
    }

    #[test]
    fn test_session_and_service_groups() {
        assert!(TicketKind::TicketGranting.is_session());
        assert!(TicketKind::ProxyGranting.is_session());
        assert!(TicketKind::Service.is_service());
        assert!(TicketKind::Proxy.is_service());
        assert!(!TicketKind::Other.is_session() && !TicketKind::Other.is_service());
    }
}
