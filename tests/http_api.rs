use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bg95_hub::core::config::Config;
use bg95_hub::core::startup::bootstrap;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let mut config = Config::default();
    config.product.failure_rate = 0.0;

    let (_state, router) = bootstrap(config).expect("bootstrap");
    router
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body")
        .to_bytes();

    (status, headers, bytes.to_vec())
}

async fn request_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, bytes) = send(app, request).await;
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

#[tokio::test]
async fn add_then_delete_round_trip() {
    let app = app();

    let (status, listed) = request_json(&app, get("/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 4);
    assert_eq!(listed["message"], "Found 4 users");
    assert_eq!(listed["data"][0]["deviceModel"], "iPhone 15 Pro");

    let (status, added) = request_json(
        &app,
        post_json(
            "/users",
            json!({"action": "add", "user": {"name": "Ann", "deviceModel": "Pixel"}}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["success"], true);
    assert_eq!(added["data"]["id"], 5);
    assert_eq!(added["data"]["status"], "active");
    assert_eq!(added["count"], 5);
    assert_eq!(added["allUsers"].as_array().map(Vec::len), Some(5));

    let (status, deleted) = request_json(
        &app,
        post_json("/users", json!({"action": "delete", "user": {"id": 5}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "User 'Ann' deleted successfully");
    assert_eq!(deleted["count"], 4);

    let (_, listed) = request_json(&app, get("/users")).await;
    assert_eq!(listed["count"], 4);
    assert!(listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|u| u["id"] != 5));
}

#[tokio::test]
async fn user_aliases_share_one_registry() {
    let app = app();

    let (status, _) = request_json(
        &app,
        post_json(
            "/api/user",
            json!({"action": "update", "user": {"id": 2, "status": "active"}}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = request_json(&app, get("/api/users?all=true")).await;
    assert_eq!(listed["data"][1]["status"], "active");

    let (status, found) = request_json(&app, get("/users?username=jane_smith")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["data"]["id"], 2);
}

#[tokio::test]
async fn failures_use_500_envelope() {
    let app = app();

    let (status, body) = request_json(
        &app,
        post_json("/users", json!({"action": "update", "user": {"id": 9999}})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["message"], "User with ID 9999 not found");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn cors_headers_on_every_response() {
    let app = app();

    let requests = vec![
        get("/users"),
        get("/nowhere"),
        post_json("/users", json!({"action": "bogus"})),
        Request::builder()
            .method("DELETE")
            .uri("/users")
            .body(Body::empty())
            .unwrap(),
    ];

    for request in requests {
        let (_, headers, _) = send(&app, request).await;

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
    }
}

#[tokio::test]
async fn preflight_statuses() {
    let app = app();

    for (uri, expected) in [
        ("/users", StatusCode::OK),
        ("/api/product", StatusCode::OK),
        ("/api/post-viewer", StatusCode::NO_CONTENT),
        ("/api/handler", StatusCode::NO_CONTENT),
    ] {
        let request = Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let (status, headers, body) = send(&app, request).await;
        assert_eq!(status, expected, "preflight for {uri}");
        assert!(body.is_empty());
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}

#[tokio::test]
async fn unsupported_method_gets_405_envelope() {
    let app = app();

    let request = Request::builder()
        .method("PUT")
        .uri("/users")
        .body(Body::empty())
        .unwrap();

    let (status, body) = request_json(&app, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["allowedMethods"], json!(["GET", "POST", "OPTIONS"]));
}

#[tokio::test]
async fn viewer_capture_list_and_clear() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/post-viewer?imei=861234")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("rssi=-71&band=B20"))
        .unwrap();
    let (status, captured) = request_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(captured["requestId"], 1);
    assert_eq!(captured["totalRequests"], 1);

    let (status, _, page) = send(&app, get("/api/post-viewer")).await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(page).unwrap();
    assert!(page.contains("Total Requests: 1"));
    assert!(page.contains("&quot;band&quot;: &quot;B20&quot;"));

    let request = Request::builder()
        .method("POST")
        .uri("/api/clear")
        .body(Body::empty())
        .unwrap();
    let (status, cleared) = request_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["message"], "All requests cleared");

    let (_, _, page) = send(&app, get("/api/post-viewer")).await;
    assert!(String::from_utf8(page).unwrap().contains("Total Requests: 0"));
}

#[tokio::test]
async fn echo_and_ping() {
    let app = app();

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/handler?x=%3C1%3E")
        .header("content-type", "text/plain")
        .body(Body::from("AT+CSQ"))
        .unwrap();
    let (status, headers, page) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let page = String::from_utf8(page).unwrap();
    assert!(page.contains("<strong>Method:</strong> PATCH"));
    assert!(page.contains("&lt;1&gt;"));
    assert!(page.contains("AT+CSQ"));

    let (status, ping) = request_json(&app, get("/api/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ping["message"], "Hello from bg95-hub!");
    assert_eq!(ping["method"], "GET");
    assert_eq!(ping["url"], "/api/test");
}

#[tokio::test]
async fn product_update_and_metrics() {
    let app = app();

    let (status, updated) = request_json(
        &app,
        post_json(
            "/api/product",
            json!({"username": "ann", "productId": "SKU-1", "status": "pending"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["productId"], "SKU-1");
    assert_eq!(updated["data"]["updatedBy"], "ann");

    let (status, metrics) = request_json(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["product_updates"], 1);
    assert_eq!(metrics["registered_users"], 4);

    let (status, health) = request_json(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
}
