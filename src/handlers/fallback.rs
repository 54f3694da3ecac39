use crate::models::api::{ErrorResponse, MethodNotAllowedResponse};
use axum::{
    http::{HeaderMap, Method, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};

const VALID_ENDPOINTS: &str =
    "/users, /api/product, /api/post-viewer, /api/clear, /api/handler, /api/test, /health, /metrics";

pub async fn fallback_handler(headers: HeaderMap) -> Response {
    // Check if this is a browser request
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let is_browser = user_agent.contains("Mozilla")
        || user_agent.contains("Chrome")
        || user_agent.contains("Safari")
        || user_agent.contains("Firefox")
        || user_agent.contains("Edge");

    if is_browser {
        let html = format!(
            "<!doctype html><html><body><h1>Not found</h1><p>Try one of: {}</p></body></html>",
            VALID_ENDPOINTS
        );

        return (StatusCode::NOT_FOUND, Html(html)).into_response();
    }

    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            error: "Not found".to_string(),
            message: format!("Invalid endpoint. Valid endpoints: {}", VALID_ENDPOINTS),
            timestamp: None,
        }),
    )
        .into_response()
}

/// JSON 405 for a method the route does not serve
pub fn method_not_allowed(method: Method, allowed: &[&str]) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MethodNotAllowedResponse {
            error: "Method not allowed".to_string(),
            method: method.to_string(),
            allowed_methods: allowed.iter().map(|m| m.to_string()).collect(),
        }),
    )
        .into_response()
}

/// Preflight for the JSON APIs
pub async fn preflight_ok() -> StatusCode {
    StatusCode::OK
}

/// Preflight for the viewer and echo pages
pub async fn preflight_no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
