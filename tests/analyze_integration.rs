//! End-to-end tests for the analyze endpoint against a mock upstream site.

use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use site_insight::{api::routes::create_router, config::Config, AppState};

const MOCK_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Mock Company</title>
    <meta name="description" content="We mock things">
</head>
<body>
    <main><p>Mock Company builds test doubles for everyone.</p></main>
    <a href="/docs">Docs</a>
</body>
</html>"#;

fn test_app() -> Router {
    let config = Config {
        server_addr: "127.0.0.1:0".parse().unwrap(),
        request_timeout_secs: 5,
        user_agent: "site-insight-test/0.1".to_string(),
    };
    let state = AppState::new(Arc::new(config)).expect("app state");
    create_router(state)
}

async fn post_analyze(app: Router, url: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::post("/analyze")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!("url={}", url)))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).expect("json");

    (status, json)
}

#[tokio::test]
async fn analyze_returns_page_report() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_PAGE))
        .mount(&mock_server)
        .await;

    let (status, json) = post_analyze(test_app(), &mock_server.uri()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");

    let data = &json["data"];
    assert_eq!(data["meta_info"]["title"], "Mock Company");
    assert_eq!(data["meta_info"]["description"], "We mock things");
    assert_eq!(
        data["content_summary"],
        "Mock Company builds test doubles for everyone."
    );
    assert_eq!(data["links"][0], "/docs");
    assert!(data["word_count"].as_u64().unwrap() > 0);
    assert_eq!(data["status"]["status_code"], 200);
}

#[tokio::test]
async fn upstream_failure_is_reported_as_tagged_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (status, json) = post_analyze(test_app(), &mock_server.uri()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    assert!(json["message"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn unreachable_host_is_reported_as_tagged_error() {
    // Nothing listens on port 1
    let (status, json) = post_analyze(test_app(), "http://127.0.0.1:1/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    assert!(json["message"].as_str().unwrap().contains("Failed to fetch"));
}

#[tokio::test]
async fn two_rapid_submissions_both_resolve() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_PAGE))
        .mount(&mock_server)
        .await;

    let app = test_app();
    let uri = mock_server.uri();
    let first = post_analyze(app.clone(), &uri);
    let second = post_analyze(app, &uri);
    let ((status_a, json_a), (status_b, json_b)) = tokio::join!(first, second);

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(json_a["status"], "success");
    assert_eq!(json_b["status"], "success");
}
