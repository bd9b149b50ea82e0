//! Ticket Module
//!
//! Ticket values, their types, and the expiration policies attached to them.

mod kind;
mod model;
mod policy;

// Re-export public types
pub use kind::TicketKind;
pub use model::Ticket;
pub use policy::ExpirationPolicy;
