use crate::core::state::AppState;
use crate::utils::time::current_timestamp;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Registry and viewer state as seen by a load balancer or a bench operator
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` once the registry has no ids left to hand out
    pub status: String,
    pub version: String,
    pub timestamp: i64,
    pub registered_users: usize,
    pub next_user_id: u32,
    pub stored_requests: usize,
    pub request_capacity: usize,
}

/// GET /health
///
/// A degraded registry still answers lists, updates and deletes, so the
/// endpoint keeps returning 200.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let registry = &state.registry;
    let status = if registry.can_assign_ids() { "ok" } else { "degraded" };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: current_timestamp(),
            registered_users: registry.len(),
            next_user_id: registry.next_id(),
            stored_requests: state.request_log.len(),
            request_capacity: state.request_log.capacity(),
        }),
    )
}
