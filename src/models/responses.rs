//! Response DTOs for the registry API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::backend::BackendStats;

/// Response body for DELETE /tickets/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// The ticket id that was deleted
    pub id: String,
    /// Whether the confirming read found the ticket gone
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn new(id: impl Into<String>, deleted: bool) -> Self {
        Self {
            id: id.into(),
            deleted,
        }
    }
}

/// Response body for DELETE /tickets
#[derive(Debug, Clone, Serialize)]
pub struct DeleteAllResponse {
    /// Number of tickets present before the clear
    pub removed: usize,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Stored login sessions
    pub sessions: usize,
    /// Stored per-service grants
    pub service_tickets: usize,
    /// All stored tickets
    pub total: usize,
    /// Access metrics, when the in-process backend is in use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendStats>,
    /// Backend hit rate (0.0 - 1.0), alongside `backend`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_rate: Option<f64>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
