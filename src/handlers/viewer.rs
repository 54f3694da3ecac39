use crate::core::state::AppState;
use crate::html::pages::render_viewer_page;
use crate::models::api::{CaptureResponse, SuccessResponse};
use crate::utils::body::{header_map, parse_body, parse_query};
use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Capture a POST request for later viewing
///
/// POST /api/post-viewer
pub async fn capture_request_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
    body: Bytes,
) -> Response {
    let parsed = parse_body(&headers, &body);

    let request_id = state.request_log.capture(
        method.to_string(),
        header_map(&headers),
        parsed,
        parse_query(raw_query.as_deref()),
    );
    state.metrics.increment_captured();

    let total_requests = state.request_log.len();
    debug!(request_id, total_requests, bytes = body.len(), "Captured POST request");

    (
        StatusCode::OK,
        Json(CaptureResponse {
            success: true,
            message: "POST request received!".to_string(),
            request_id,
            total_requests,
        }),
    )
        .into_response()
}

/// HTML listing of captured requests, newest first
///
/// GET /api/post-viewer
pub async fn viewer_page_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_viewer_page(&state.request_log.newest_first()))
}

/// Drop all captured requests
///
/// POST /api/clear
pub async fn clear_requests_handler(State(state): State<Arc<AppState>>) -> Json<SuccessResponse> {
    let removed = state.request_log.clear();
    info!(removed, "Cleared captured requests");

    Json(SuccessResponse {
        success: true,
        message: "All requests cleared".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use http_body_util::BodyExt;
    use serde_json::json;

    fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::new(Config::default()))
    }

    async fn capture(state: &Arc<AppState>, body: &str, query: Option<&str>) -> CaptureResponse {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("user-agent", HeaderValue::from_static("QUECTEL_MODULE"));

        let response = capture_request_handler(
            State(Arc::clone(state)),
            Method::POST,
            headers,
            RawQuery(query.map(str::to_string)),
            Bytes::from(body.to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_capture_stores_request() {
        let state = create_test_state();

        let first = capture(&state, r#"{"rssi":-71}"#, Some("imei=861")).await;
        assert!(first.success);
        assert_eq!(first.message, "POST request received!");
        assert_eq!(first.request_id, 1);
        assert_eq!(first.total_requests, 1);

        let second = capture(&state, "plain", None).await;
        assert_eq!(second.request_id, 2);
        assert_eq!(second.total_requests, 2);

        let stored = state.request_log.newest_first();
        assert_eq!(stored[1].body, json!({"rssi": -71}));
        assert_eq!(stored[1].query["imei"], "861");
        assert_eq!(stored[1].headers["user-agent"], "QUECTEL_MODULE");
        assert_eq!(stored[0].body, json!("plain"));
    }

    #[tokio::test]
    async fn test_viewer_page_lists_captures() {
        let state = create_test_state();
        capture(&state, r#"{"n":1}"#, None).await;
        capture(&state, r#"{"n":2}"#, None).await;

        let Html(page) = viewer_page_handler(State(Arc::clone(&state))).await;

        assert!(page.contains("Total Requests: 2"));
        assert!(page.find("Request #2").unwrap() < page.find("Request #1").unwrap());
    }

    #[tokio::test]
    async fn test_clear_empties_log() {
        let state = create_test_state();
        capture(&state, "{}", None).await;

        let Json(response) = clear_requests_handler(State(Arc::clone(&state))).await;
        assert!(response.success);
        assert_eq!(response.message, "All requests cleared");
        assert!(state.request_log.is_empty());

        let Html(page) = viewer_page_handler(State(state)).await;
        assert!(page.contains("No POST requests yet"));
    }
}
