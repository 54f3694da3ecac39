use crate::html::pages::render_request_page;
use crate::models::api::PingResponse;
use crate::utils::body::{header_map, parse_body, parse_query};
use crate::utils::time::iso_timestamp;
use axum::{
    body::Bytes,
    extract::{OriginalUri, RawQuery},
    http::{HeaderMap, Method, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::Value;

/// Render the incoming request as an HTML page
///
/// ANY /api/handler
///
/// The body is only shown for methods that carry one (POST, PUT, PATCH).
pub async fn echo_handler(
    method: Method,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }

    let body = if matches!(method, Method::POST | Method::PUT | Method::PATCH) {
        parse_body(&headers, &body)
    } else {
        Value::Null
    };

    let page = render_request_page(
        method.as_str(),
        &parse_query(raw_query.as_deref()),
        &header_map(&headers),
        &body,
    );

    Html(page).into_response()
}

/// Deployment smoke test
///
/// ANY /api/test
pub async fn ping_handler(method: Method, OriginalUri(uri): OriginalUri) -> Json<PingResponse> {
    Json(PingResponse {
        message: format!("Hello from {}!", env!("CARGO_PKG_NAME")),
        method: method.to_string(),
        url: uri.to_string(),
        timestamp: iso_timestamp(),
    })
}
