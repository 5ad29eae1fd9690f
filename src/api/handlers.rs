//! API Handlers
//!
//! HTTP request handlers for each TTL map server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, TtlMapError};
use crate::models::{
    validate_key, DeleteResponse, GetResponse, HealthResponse, PutRequest, PutResponse,
    SnapshotResponse, StatsResponse,
};
use crate::ttlmap::TtlMap;

/// Application state shared across all handlers.
///
/// The map is internally synchronized, so handlers share it through a plain
/// `Arc` without an outer lock.
#[derive(Clone)]
pub struct AppState {
    /// Shared TTL map holding arbitrary JSON values
    pub map: Arc<TtlMap<Value>>,
}

impl AppState {
    /// Creates a new AppState around the given map.
    pub fn new(map: TtlMap<Value>) -> Self {
        Self { map: Arc::new(map) }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Must be called inside a Tokio runtime, which runs the map's sweep task.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TtlMap::from_config(&config.map_config()))
    }
}

/// Handler for PUT /entries/:key
///
/// Stores a JSON value under the key with an optional TTL.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(TtlMapError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    state.map.put(key.clone(), ttl, req.value);
    debug!(%key, ?ttl, "Stored entry");

    Ok(Json(PutResponse::new(key)))
}

/// Handler for GET /entries/:key
///
/// Retrieves a live value by key; expired entries are reported as missing.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .map
        .get(&key)
        .ok_or_else(|| TtlMapError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /entries/:key
///
/// Deletes a key. Deleting a missing key succeeds.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.map.delete(&key);
    Json(DeleteResponse::new(key))
}

/// Handler for GET /entries
///
/// Returns a copy of every stored entry.
pub async fn snapshot_handler(State(state): State<AppState>) -> Json<SnapshotResponse> {
    Json(SnapshotResponse::new(state.map.snapshot()))
}

/// Handler for GET /stats
///
/// Returns current map statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let map = &state.map;

    Json(StatsResponse::new(
        &map.stats(),
        map.default_ttl(),
        map.sweep_interval(),
        map.is_running(),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn test_state() -> AppState {
        AppState::new(TtlMap::new(Duration::from_secs(300), Duration::from_secs(3600)))
    }

    fn put_request(value: Value, ttl_ms: Option<u64>) -> Json<PutRequest> {
        Json(PutRequest { value, ttl_ms })
    }

    #[tokio::test]
    async fn test_put_and_get_handler() {
        let state = test_state();

        let result = put_handler(
            State(state.clone()),
            Path("test_key".to_string()),
            put_request(json!("test_value"), None),
        )
        .await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!("test_value"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(TtlMapError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_expired_key() {
        let state = test_state();

        put_handler(
            State(state.clone()),
            Path("short".to_string()),
            put_request(json!(1), Some(10)),
        )
        .await
        .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        let result = get_handler(State(state.clone()), Path("short".to_string())).await;
        assert!(matches!(result, Err(TtlMapError::NotFound(_))));
        assert!(state.map.is_empty());
    }

    #[tokio::test]
    async fn test_delete_handler_is_idempotent() {
        let state = test_state();

        put_handler(
            State(state.clone()),
            Path("to_delete".to_string()),
            put_request(json!("value"), None),
        )
        .await
        .unwrap();

        delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        let response = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert_eq!(response.key, "to_delete");

        let result = get_handler(State(state), Path("to_delete".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_handler() {
        let state = test_state();
        state.map.put("a", Duration::ZERO, json!(1));
        state.map.put("b", Duration::ZERO, json!({"nested": true}));

        let response = snapshot_handler(State(state)).await;
        assert_eq!(response.count, 2);
        assert_eq!(response.entries["b"]["nested"], true);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        state.map.put("a", Duration::ZERO, json!(1));
        state.map.get("a");
        state.map.get("missing");

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 1);
        assert_eq!(response.misses, 1);
        assert_eq!(response.total_entries, 1);
        assert_eq!(response.default_ttl_ms, 300_000);
        assert!(response.sweep_running);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_put_invalid_key() {
        let state = test_state();

        let result = put_handler(
            State(state),
            Path("k".repeat(300)),
            put_request(json!("value"), None),
        )
        .await;
        assert!(matches!(result, Err(TtlMapError::InvalidRequest(_))));
    }
}
