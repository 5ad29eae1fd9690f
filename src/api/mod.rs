//! API Module
//!
//! HTTP handlers and routing for the TTL map server REST API.
//!
//! # Endpoints
//! - `PUT /entries/:key` - Store a JSON value with optional TTL
//! - `GET /entries/:key` - Retrieve a value by key
//! - `DELETE /entries/:key` - Delete a key
//! - `GET /entries` - Snapshot of all stored entries
//! - `GET /stats` - Map statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
