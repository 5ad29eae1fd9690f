//! Error types for the TTL map and its HTTP front-end
//!
//! Map lookups never fail; absence is reported as `None`. The variants here
//! cover map construction and the request errors of the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == TtlMap Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum TtlMapError {
    /// The sweep task could not be spawned
    #[error("TtlMap requires a Tokio runtime; create it inside #[tokio::main], #[tokio::test] or a runtime context")]
    NoRuntime,

    /// Key absent or expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for TtlMapError {
    fn into_response(self) -> Response {
        let status = match &self {
            TtlMapError::NotFound(_) => StatusCode::NOT_FOUND,
            TtlMapError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            TtlMapError::NoRuntime | TtlMapError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, TtlMapError>;
