//! API Handlers
//!
//! HTTP request handlers mapping each endpoint onto one registry operation.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::backend::{BackendStats, MemoryBackend};
use crate::clock::{SystemTimeProvider, TimeProvider};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    DeleteAllResponse, DeleteResponse, HealthResponse, IssueTicketRequest, StatsResponse,
};
use crate::registry::TicketRegistry;
use crate::ticket::Ticket;

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The registry every handler goes through
    pub registry: TicketRegistry,
    /// Time source for newly issued tickets
    pub clock: Arc<dyn TimeProvider>,
    /// The in-process backend, when the registry runs on one
    pub memory: Option<MemoryBackend>,
}

impl AppState {
    /// Creates a new AppState around an existing registry.
    pub fn new(registry: TicketRegistry, clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            registry,
            clock,
            memory: None,
        }
    }

    /// Creates an AppState backed by an in-process backend.
    pub fn with_memory_backend(backend: MemoryBackend, clock: Arc<dyn TimeProvider>, config: &Config) -> Self {
        let registry = TicketRegistry::with_codec(Arc::new(backend.clone()), config.codec());
        Self {
            registry,
            clock,
            memory: Some(backend),
        }
    }

    /// Creates a new AppState from configuration, using the system clock.
    pub fn from_config(config: &Config) -> Self {
        let clock: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider::new());
        let backend = MemoryBackend::with_clock(clock.clone());
        Self::with_memory_backend(backend, clock, config)
    }
}

/// Handler for POST /tickets
///
/// Issues a ticket from the request and adds it to the registry.
pub async fn add_ticket_handler(
    State(state): State<AppState>,
    Json(req): Json<IssueTicketRequest>,
) -> ApiResult<(StatusCode, Json<Ticket>)> {
    let ticket = req.into_ticket(state.clock.now());
    state.registry.add_ticket(&ticket).await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Handler for PUT /tickets
///
/// Overwrites a ticket, restarting its backend expiration window.
pub async fn update_ticket_handler(
    State(state): State<AppState>,
    Json(ticket): Json<Ticket>,
) -> ApiResult<Json<Ticket>> {
    let ticket = state.registry.update_ticket(ticket).await?;
    Ok(Json(ticket))
}

/// Handler for GET /tickets/:id
pub async fn get_ticket_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Ticket>> {
    match state.registry.get_ticket(&id).await? {
        Some(ticket) => Ok(Json(ticket)),
        None => Err(ApiError::NotFound(id)),
    }
}

/// Handler for GET /tickets
///
/// Diagnostic listing of every stored ticket.
pub async fn list_tickets_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<Ticket>>> {
    Ok(Json(state.registry.get_tickets().await?))
}

/// Handler for DELETE /tickets/:id
pub async fn delete_ticket_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = state.registry.delete_single_ticket(&id).await?;
    Ok(Json(DeleteResponse::new(id, deleted)))
}

/// Handler for DELETE /tickets
pub async fn delete_all_handler(State(state): State<AppState>) -> ApiResult<Json<DeleteAllResponse>> {
    let removed = state.registry.delete_all().await?;
    Ok(Json(DeleteAllResponse { removed }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let sessions = state.registry.session_count().await?;
    let service_tickets = state.registry.service_ticket_count().await?;
    let total = state.registry.get_tickets().await?.len();
    let backend = state.memory.as_ref().map(MemoryBackend::stats);

    Ok(Json(StatsResponse {
        sessions,
        service_tickets,
        total,
        hit_rate: backend.as_ref().map(BackendStats::hit_rate),
        backend,
    }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
