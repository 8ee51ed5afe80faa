//! Integration tests for the record fetcher
//!
//! These tests use wiremock to stand in for the crawl/analysis backend and
//! drive full request lifecycles end-to-end.

use serde_json::json;
use std::time::Duration;
use sumi_lens::state::FetchState;
use sumi_lens::{ApiClient, ClientError, RecordFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_body(id: u64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "url": format!("https://example.com/{}", id),
        "title": title,
        "crawled_at": "2025-04-01T12:00:00",
        "content": "Body",
        "summary": "Summary",
        "category": "technology",
        "sentiment": "neutral",
        "insights": "[]",
        "links": null,
        "metadata": null
    })
}

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(&server.uri()).expect("Failed to build client")
}

#[tokio::test]
async fn test_encoded_insights_and_absent_sections() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/page/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "url": "https://example.com/",
            "title": "Example",
            "crawled_at": "2025-04-01T12:00:00",
            "content": "# Example",
            "summary": "An example page",
            "category": "technology",
            "sentiment": "positive",
            "insights": "[\"a\",\"b\"]",
            "links": null,
            "metadata": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut fetcher = RecordFetcher::new(client_for(&mock_server).await);
    assert!(fetcher.select(Some("42")));

    let state = fetcher.settle().await.expect("Fetcher has a subject");
    let view = state.ready().expect("Record should be ready");

    assert_eq!(view.id.as_str(), "42");
    assert_eq!(view.insights, vec!["a", "b"]);
    assert!(view.links.is_none());
    assert!(view.metadata.is_none());
    assert!(view.anomalies.is_empty());
}

#[tokio::test]
async fn test_malformed_insights_keep_record() {
    let mock_server = MockServer::start().await;

    let mut body = page_body(7, "Broken insights");
    body["insights"] = json!("[\"never closed");
    body["metadata"] = json!({"description": "still here"});

    Mock::given(method("GET"))
        .and(path("/api/page/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let mut fetcher = RecordFetcher::new(client_for(&mock_server).await);
    fetcher.select(Some("7"));

    let view = fetcher
        .settle()
        .await
        .and_then(FetchState::ready)
        .expect("Record should be ready");

    assert!(view.insights.is_empty());
    assert_eq!(view.anomalies.len(), 1);
    assert_eq!(view.title, "Broken insights");
    assert_eq!(view.summary, "Summary");
    assert_eq!(view.metadata.as_ref().map(|m| m.len()), Some(1));
}

#[tokio::test]
async fn test_stale_response_is_suppressed() {
    let mock_server = MockServer::start().await;

    // The first subject answers slowly, the second immediately
    Mock::given(method("GET"))
        .and(path("/api/page/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(1, "Slow"))
                .set_delay(Duration::from_millis(400)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/page/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(2, "Fast")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut fetcher = RecordFetcher::new(client_for(&mock_server).await);
    fetcher.select(Some("1"));
    fetcher.select(Some("2"));

    let view = fetcher
        .settle()
        .await
        .and_then(FetchState::ready)
        .expect("Record should be ready");
    assert_eq!(view.title, "Fast");

    // Let the slow response arrive, then make sure it is ignored
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(!fetcher.poll_resolutions());
    assert_eq!(fetcher.view().map(|v| v.title.as_str()), Some("Fast"));
    assert_eq!(fetcher.subject().map(|id| id.as_str()), Some("2"));
}

#[tokio::test]
async fn test_http_error_fails_with_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/page/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Page not found"})))
        .mount(&mock_server)
        .await;

    let mut fetcher = RecordFetcher::new(client_for(&mock_server).await);
    fetcher.select(Some("999"));

    let error = fetcher
        .settle()
        .await
        .and_then(FetchState::error)
        .expect("Fetch should fail")
        .clone();

    assert_eq!(
        error,
        ClientError::Http {
            status: 404,
            message: Some("Page not found".to_string())
        }
    );
    assert_eq!(error.to_string(), "Error: 404");
}

#[tokio::test]
async fn test_malformed_payload_fails_with_decode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/page/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let mut fetcher = RecordFetcher::new(client_for(&mock_server).await);
    fetcher.select(Some("3"));

    let state = fetcher.settle().await.expect("Fetcher has a subject");
    assert!(matches!(state, FetchState::Failed(ClientError::Decode(_))));
}

#[tokio::test]
async fn test_invalid_timestamp_does_not_fail() {
    let mock_server = MockServer::start().await;

    let mut body = page_body(4, "Odd date");
    body["crawled_at"] = json!("not-a-date");

    Mock::given(method("GET"))
        .and(path("/api/page/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let mut fetcher = RecordFetcher::new(client_for(&mock_server).await);
    fetcher.select(Some("4"));

    let view = fetcher
        .settle()
        .await
        .and_then(FetchState::ready)
        .expect("Record should be ready");
    assert_eq!(view.crawled_at.to_string(), "Invalid Date");
}

#[tokio::test]
async fn test_reload_issues_new_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/page/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(5, "Again")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut fetcher = RecordFetcher::new(client_for(&mock_server).await);
    fetcher.select(Some("5"));
    fetcher.settle().await;

    assert!(fetcher.reload());
    assert!(fetcher.state().map_or(false, FetchState::is_pending));
    fetcher.settle().await;
    assert!(fetcher.view().is_some());
}

#[tokio::test]
async fn test_empty_identifier_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut fetcher = RecordFetcher::new(client_for(&mock_server).await);
    assert!(!fetcher.select(Some("")));
    assert!(!fetcher.select(None));
    assert!(fetcher.settle().await.is_none());
}

#[tokio::test]
async fn test_opaque_identifier_is_single_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/page/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a/b", "title": "Slashed"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut fetcher = RecordFetcher::new(client_for(&mock_server).await);
    fetcher.select(Some("a/b"));

    let view = fetcher
        .settle()
        .await
        .and_then(FetchState::ready)
        .expect("Record should be ready");
    assert_eq!(view.id.as_str(), "a/b");
}
