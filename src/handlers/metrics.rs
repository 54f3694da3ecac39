// Metrics endpoint

use crate::core::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

/// Returns JSON with service statistics including:
/// - User actions with succeeded/failed counts and success rate
/// - Product status updates and simulated store failures
/// - Captured requests, both total and currently stored
/// - Registry size and uptime
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.metrics.get_snapshot(
        &state.registry,
        &state.request_log,
        &state.product_store,
    );

    (StatusCode::OK, Json(snapshot)).into_response()
}
