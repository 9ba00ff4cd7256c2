use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::client::PostsClientConfig;

fn test_client(base_url: &str) -> PostsClient {
    PostsClient::new(PostsClientConfig {
        api_key: "test-key".to_owned(),
        api_url: base_url.to_owned(),
        api_host: "posts.test".to_owned(),
        backoff_base_ms: 0,
        backoff_cap_ms: 0,
        page_delay_ms: 0,
        rate_limit_cooldown_ms: 0,
        ..PostsClientConfig::default()
    })
    .expect("client construction should not fail")
}

fn post_node(code: &str) -> serde_json::Value {
    serde_json::json!({
        "node": {
            "code": code,
            "pk": code,
            "user": { "pk": 1, "username": "acme" },
            "like_count": 10
        }
    })
}

fn page(edges: &[serde_json::Value], has_next: bool, end_cursor: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "result": {
            "edges": edges,
            "page_info": { "has_next_page": has_next, "end_cursor": end_cursor }
        }
    })
}

/// Mounts a page response for a specific `maxId` request value.
async fn mount_page(server: &MockServer, max_id: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({ "maxId": max_id })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn single_page_history_fully_drains() {
    let server = MockServer::start().await;
    mount_page(&server, "", page(&[post_node("A1"), post_node("A2")], false, None)).await;

    let client = test_client(&server.uri());
    let result = client.fetch_posts("acme", 100, 20, None).await.unwrap();
    assert_eq!(result.posts.len(), 2);
    assert!(result.last_cursor.is_none(), "drained history must not be resumable");
}

#[tokio::test]
async fn walks_pages_until_has_next_page_is_false() {
    let server = MockServer::start().await;
    mount_page(&server, "", page(&[post_node("A1")], true, Some("CURSOR_1"))).await;
    mount_page(&server, "CURSOR_1", page(&[post_node("B1")], false, None)).await;

    let client = test_client(&server.uri());
    let result = client.fetch_posts("acme", 100, 20, None).await.unwrap();
    assert_eq!(result.posts.len(), 2);
    assert_eq!(result.posts[0].code.as_deref(), Some("A1"));
    assert_eq!(result.posts[1].code.as_deref(), Some("B1"));
    // The cursor the final request was made with is the resume point.
    assert_eq!(result.last_cursor.as_deref(), Some("CURSOR_1"));
}

#[tokio::test]
async fn server_error_mid_walk_returns_partial_results() {
    let server = MockServer::start().await;
    mount_page(&server, "", page(&[post_node("A1")], true, Some("CURSOR_1"))).await;
    mount_page(&server, "CURSOR_1", page(&[post_node("B1")], true, Some("CURSOR_2"))).await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({ "maxId": "CURSOR_2" })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_posts("acme", 100, 20, None).await.unwrap();
    assert_eq!(result.posts.len(), 2, "pages 1-2 must be kept");
    assert_eq!(result.last_cursor.as_deref(), Some("CURSOR_2"));

    // Two successful pages plus four attempts (initial + 3 retries) at page 3.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 6);
}

#[tokio::test]
async fn server_error_on_first_call_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_posts("acme", 100, 20, None).await.unwrap_err();
    assert!(matches!(err, ScraperError::Server { status: 500, .. }));
}

#[tokio::test]
async fn rate_limit_stops_with_partial_results() {
    let server = MockServer::start().await;
    mount_page(&server, "", page(&[post_node("A1")], true, Some("CURSOR_1"))).await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({ "maxId": "CURSOR_1" })))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_posts("acme", 100, 20, None).await.unwrap();
    assert_eq!(result.posts.len(), 1);
    assert_eq!(result.last_cursor.as_deref(), Some("CURSOR_1"));
}

#[tokio::test]
async fn client_error_stops_cleanly_even_with_nothing_collected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_posts("acme", 100, 20, None).await.unwrap();
    assert!(result.posts.is_empty());
    assert!(result.last_cursor.is_none());
}

#[tokio::test]
async fn missing_result_envelope_stops() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": null })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_posts("acme", 100, 20, None).await.unwrap();
    assert!(result.posts.is_empty());
}

#[tokio::test]
async fn empty_edges_stop_without_error() {
    let server = MockServer::start().await;
    mount_page(&server, "", page(&[], true, Some("CURSOR_1"))).await;

    let client = test_client(&server.uri());
    let result = client.fetch_posts("acme", 100, 20, None).await.unwrap();
    assert!(result.posts.is_empty());
    assert!(result.last_cursor.is_none());
}

#[tokio::test]
async fn blank_end_cursor_clears_resume_point() {
    let server = MockServer::start().await;
    mount_page(&server, "", page(&[post_node("A1")], true, Some("  "))).await;

    let client = test_client(&server.uri());
    let result = client.fetch_posts("acme", 100, 20, None).await.unwrap();
    assert_eq!(result.posts.len(), 1);
    assert!(result.last_cursor.is_none(), "blank end_cursor signals a drained history");
}

#[tokio::test]
async fn truncates_to_max_posts() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "",
        page(&[post_node("A1"), post_node("A2"), post_node("A3")], true, Some("CURSOR_1")),
    )
    .await;

    let client = test_client(&server.uri());
    let result = client.fetch_posts("acme", 2, 20, None).await.unwrap();
    assert_eq!(result.posts.len(), 2);
    assert_eq!(result.last_cursor.as_deref(), Some("CURSOR_1"));
}

#[tokio::test]
async fn respects_max_api_calls_budget() {
    let server = MockServer::start().await;
    mount_page(&server, "", page(&[post_node("A1")], true, Some("CURSOR_1"))).await;
    mount_page(&server, "CURSOR_1", page(&[post_node("B1")], true, Some("CURSOR_2"))).await;
    mount_page(&server, "CURSOR_2", page(&[post_node("C1")], true, Some("CURSOR_3"))).await;

    let client = test_client(&server.uri());
    let result = client.fetch_posts("acme", 100, 2, None).await.unwrap();
    assert_eq!(result.posts.len(), 2, "budget of 2 calls collects 2 pages");
    assert_eq!(result.last_cursor.as_deref(), Some("CURSOR_2"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn resumes_from_supplied_cursor() {
    let server = MockServer::start().await;
    mount_page(&server, "CURSOR_7", page(&[post_node("H1")], false, None)).await;

    let client = test_client(&server.uri());
    let result = client
        .fetch_posts("acme", 100, 20, Some("CURSOR_7"))
        .await
        .unwrap();
    assert_eq!(result.posts.len(), 1);
    assert_eq!(result.posts[0].code.as_deref(), Some("H1"));
    // Stopped on has_next_page=false, so the request cursor remains the
    // resume point reported back.
    assert_eq!(result.last_cursor.as_deref(), Some("CURSOR_7"));
}
