//! Request and Response models for the registry API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies. Tickets
//! themselves are exchanged in their stored JSON form.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::IssueTicketRequest;
pub use responses::{
    DeleteAllResponse, DeleteResponse, ErrorResponse, HealthResponse, StatsResponse,
};
