use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

use crate::core::config::Config;
use crate::core::routes::build_router;
use crate::core::state::AppState;

/// Build shared state and the fully layered router
pub fn bootstrap(config: Config) -> Result<(Arc<AppState>, Router)> {
    let state = Arc::new(AppState::new(config));

    let users = state.registry.list();
    info!(
        users = users.len(),
        next_user_id = state.registry.next_id(),
        "User registry seeded"
    );
    for user in &users {
        info!(
            user_id = user.id,
            name = %user.name,
            status = %user.status,
            device_model = %user.device_model,
            "Seeded user"
        );
    }

    info!(
        max_requests = state.config.viewer.max_requests,
        failure_rate = state.config.product.failure_rate,
        distinct_error_status = state.config.api.distinct_error_status,
        "Service state initialized"
    );

    let app = build_router(Arc::clone(&state))?.layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        ),
    );

    Ok((state, app))
}
