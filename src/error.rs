//! Error types for the ticket registry
//!
//! Provides unified error handling using thiserror, one enum per layer:
//! backend adapters, the registry itself, and the HTTP shell.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Boxed source error, kept cloneable for adapters that share failures.
pub type BoxError = Arc<dyn std::error::Error + Send + Sync>;

// == Backend Error ==
/// Failure raised by a cache backend adapter.
///
/// Adapters never retry; whatever the underlying store reports is surfaced
/// here and passed through the registry untouched.
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    /// The store could not serve the call (connection loss, partition, timeout)
    #[error("Backend unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl BackendError {
    /// Creates an `Unavailable` error without an underlying cause.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an `Unavailable` error wrapping the store's own error.
    pub fn unavailable_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }
}

// == Registry Error ==
/// Errors surfaced by [`TicketRegistry`](crate::TicketRegistry) operations.
///
/// Absence is never an error: lookups return `Ok(None)`.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Malformed ticket rejected before any backend call
    #[error("Invalid ticket: {0}")]
    InvalidTicket(String),

    /// Backend call failed; propagated unchanged
    #[error(transparent)]
    BackendUnavailable(#[from] BackendError),

    /// Stored bytes did not deserialize into a ticket
    #[error("Failed to decode ticket stored under '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Ticket could not be serialized for storage
    #[error("Failed to encode ticket '{id}': {source}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Convenience Result type for backend adapters.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

// == API Error ==
/// Error returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No ticket stored under the requested id
    #[error("Ticket not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Registry(RegistryError::InvalidTicket(_)) => StatusCode::BAD_REQUEST,
            ApiError::Registry(RegistryError::BackendUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Registry(RegistryError::Decode { .. })
            | ApiError::Registry(RegistryError::Encode { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}
