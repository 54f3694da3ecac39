// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::fallback::{method_not_allowed, preflight_no_content, preflight_ok};
use anyhow::Result;
use axum::{
    http::Method,
    response::Response,
    routing::{any, get, post, MethodRouter},
    Router,
};
use std::future::{ready, Ready};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;

const USERS_METHODS: &[&str] = &["GET", "POST", "OPTIONS"];
const PRODUCT_METHODS: &[&str] = &["POST", "OPTIONS"];
const VIEWER_METHODS: &[&str] = &["GET", "POST", "OPTIONS"];
const CLEAR_METHODS: &[&str] = &["POST", "OPTIONS"];
const READ_ONLY_METHODS: &[&str] = &["GET"];

/// Method-level fallback answering with the JSON 405 envelope
fn reject_other_methods(
    allowed: &'static [&'static str],
) -> impl Fn(Method) -> Ready<Response> + Clone + Send + Sync + 'static {
    move |method: Method| ready(method_not_allowed(method, allowed))
}

fn users_routes() -> MethodRouter<Arc<AppState>> {
    get(crate::handlers::users::list_users_handler)
        .post(crate::handlers::users::apply_user_action_handler)
        .options(preflight_ok)
        .fallback(reject_other_methods(USERS_METHODS))
}

pub fn build_router(state: Arc<AppState>) -> Result<Router> {
    let cors_headers = state.config.cors.headers()?;

    let mut router = Router::new()
        // User registry, mounted under every path the devices have used
        .route("/users", users_routes())
        .route("/api/users", users_routes())
        .route("/api/user", users_routes())

        .route(
            "/api/product",
            post(crate::handlers::product::product_status_handler)
                .options(preflight_ok)
                .fallback(reject_other_methods(PRODUCT_METHODS)),
        )

        // Request capture and inspection
        .route(
            "/api/post-viewer",
            get(crate::handlers::viewer::viewer_page_handler)
                .post(crate::handlers::viewer::capture_request_handler)
                .options(preflight_no_content)
                .fallback(reject_other_methods(VIEWER_METHODS)),
        )
        .route(
            "/api/clear",
            post(crate::handlers::viewer::clear_requests_handler)
                .options(preflight_no_content)
                .fallback(reject_other_methods(CLEAR_METHODS)),
        )
        .route("/api/handler", any(crate::handlers::echo::echo_handler))
        .route("/api/test", any(crate::handlers::echo::ping_handler))

        .route(
            "/health",
            get(crate::handlers::health::health_handler)
                .fallback(reject_other_methods(READ_ONLY_METHODS)),
        )
        .route(
            "/metrics",
            get(crate::handlers::metrics::metrics_handler)
                .fallback(reject_other_methods(READ_ONLY_METHODS)),
        )

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state);

    for (name, value) in cors_headers {
        router = router.layer(SetResponseHeaderLayer::overriding(name, value));
    }

    Ok(router)
}
