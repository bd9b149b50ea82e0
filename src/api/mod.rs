//! API Module
//!
//! HTTP handlers and routing for the registry administration API.
//!
//! # Endpoints
//! - `POST /tickets` - Issue and add a ticket
//! - `PUT /tickets` - Update a ticket
//! - `GET /tickets` - List every ticket (diagnostic)
//! - `DELETE /tickets` - Remove every ticket
//! - `GET /tickets/:id` - Look up a ticket
//! - `DELETE /tickets/:id` - Remove a ticket
//! - `GET /stats` - Ticket counts
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
