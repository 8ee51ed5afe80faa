//! Integration tests for the navigation list and the paginated listing
//!
//! These tests use wiremock to stand in for the backend.

use serde_json::json;
use sumi_lens::output::{format_sidebar, NO_PAGES_MESSAGE};
use sumi_lens::state::FetchState;
use sumi_lens::{ApiClient, ClientError, ListFeed};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(&server.uri()).expect("Failed to build client")
}

#[tokio::test]
async fn test_empty_list_shows_no_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pages/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let mut feed = ListFeed::mount(&client);
    assert!(feed.is_loading());

    let state = feed.settle().await;
    assert_eq!(state, &FetchState::Ready(Vec::new()));
    assert!(format_sidebar(state).contains(NO_PAGES_MESSAGE));
}

#[tokio::test]
async fn test_list_preserves_backend_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pages/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 9, "title": "Newest"},
            {"id": "3", "title": "Middle"},
            {"id": 12, "title": "Oldest"}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let mut feed = ListFeed::mount(&client);
    feed.settle().await;

    let ids: Vec<&str> = feed.pages().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["9", "3", "12"]);

    let text = format_sidebar(feed.state());
    assert!(text.contains("[9] Newest"));
    assert!(text.find("Newest").unwrap() < text.find("Oldest").unwrap());
}

#[tokio::test]
async fn test_null_title_row_keeps_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pages/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Home"},
            {"id": 2, "title": null}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let mut feed = ListFeed::mount(&client);
    feed.settle().await;

    assert_eq!(feed.pages().len(), 2);
    assert!(!format_sidebar(feed.state()).contains(NO_PAGES_MESSAGE));
}

#[tokio::test]
async fn test_server_error_collapses_to_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pages/list"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let mut feed = ListFeed::mount(&client);

    assert_eq!(feed.settle().await, &FetchState::Ready(Vec::new()));
    assert!(!feed.is_loading());
}

#[tokio::test]
async fn test_malformed_list_collapses_to_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pages/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pages": "nope"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let mut feed = ListFeed::mount(&client);

    assert!(feed.settle().await.ready().map_or(false, Vec::is_empty));
}

#[tokio::test]
async fn test_paginated_window_normalizes_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pages"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pages": [
                {
                    "id": 5,
                    "url": "https://example.com/a",
                    "title": "A",
                    "crawled_at": "2025-04-01T12:00:00Z",
                    "insights": "[\"one\"]",
                    "links": "{\"internal\": [], \"external\": [{\"href\": \"https://other.org/\", \"text\": \"Other\"}]}",
                    "metadata": "{\"author\": \"someone\"}"
                },
                {
                    "id": 6,
                    "title": "B",
                    "insights": 17
                }
            ],
            "total": 6
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let batch = client.list_pages_window(2, 4).await.unwrap();

    assert_eq!(batch.total, 6);
    assert_eq!(batch.pages.len(), 2);

    let first = &batch.pages[0];
    assert_eq!(first.insights, vec!["one"]);
    assert_eq!(first.links.as_ref().map(|l| l.external.len()), Some(1));
    assert_eq!(first.metadata.as_ref().map(|m| m.len()), Some(1));
    assert!(first.anomalies.is_empty());

    let second = &batch.pages[1];
    assert!(second.insights.is_empty());
    assert!(second.has_anomalies());
}

#[tokio::test]
async fn test_window_limit_validated_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;

    assert!(matches!(
        client.list_pages_window(0, 0).await,
        Err(ClientError::Validation(_))
    ));
    assert!(matches!(
        client.list_pages_window(101, 0).await,
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let health = client.health().await.unwrap();

    assert!(health.is_healthy());
}

#[tokio::test]
async fn test_health_check_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let error = client.health().await.unwrap_err();

    assert_eq!(
        error,
        ClientError::Http {
            status: 503,
            message: None
        }
    );
}
