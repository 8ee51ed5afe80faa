//! Integration tests for crawl submission and view invalidation
//!
//! These tests use wiremock to stand in for the backend.

use serde_json::json;
use sumi_lens::components::{success_message, GENERIC_FAILURE_MESSAGE};
use sumi_lens::state::FetchState;
use sumi_lens::{ApiClient, PageShell, SubmissionController, SubmissionState};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(&server.uri()).expect("Failed to build client")
}

#[tokio::test]
async fn test_bare_domain_is_submitted_with_https() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .and(body_json(json!({
            "query": "https://example.com",
            "query_type": "domain"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "abc123",
            "page_count": 5,
            "message": "Crawl completed"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = SubmissionController::new(client_for(&mock_server).await);
    assert!(controller.submit_input("example.com"));
    assert!(controller.state().is_submitting());
    assert!(!controller.is_input_enabled());

    let state = controller.settle().await.clone();

    assert_eq!(state, SubmissionState::SuccessNotice(success_message(5)));
    assert!(success_message(5).contains("5 pages processed"));
    assert_eq!(controller.input(), "");
    assert!(controller.is_input_enabled());
}

#[tokio::test]
async fn test_explicit_scheme_is_kept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .and(body_json(json!({
            "query": "http://example.com/docs",
            "query_type": "domain"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page_count": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = SubmissionController::new(client_for(&mock_server).await);
    controller.submit_input("http://example.com/docs");

    assert!(matches!(
        controller.settle().await,
        SubmissionState::SuccessNotice(_)
    ));
}

#[tokio::test]
async fn test_empty_input_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut controller = SubmissionController::new(client_for(&mock_server).await);

    assert!(!controller.submit_input("   "));
    assert!(matches!(controller.state(), SubmissionState::ErrorNotice(_)));

    // Nothing is pending, so settling returns the notice unchanged
    assert!(matches!(
        controller.settle().await,
        SubmissionState::ErrorNotice(_)
    ));
}

#[tokio::test]
async fn test_backend_message_is_shown_on_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "timeout"})))
        .mount(&mock_server)
        .await;

    let mut controller = SubmissionController::new(client_for(&mock_server).await);
    controller.submit_input("example.com");

    assert_eq!(
        controller.settle().await,
        &SubmissionState::ErrorNotice("timeout".to_string())
    );
    // Input is kept so the user can retry
    assert_eq!(controller.input(), "example.com");
}

#[tokio::test]
async fn test_failure_without_message_is_generic() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let mut controller = SubmissionController::new(client_for(&mock_server).await);
    controller.submit_input("example.com");

    assert_eq!(
        controller.settle().await,
        &SubmissionState::ErrorNotice(GENERIC_FAILURE_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn test_success_without_page_count_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"job_id": "abc"})))
        .mount(&mock_server)
        .await;

    let mut controller = SubmissionController::new(client_for(&mock_server).await);
    let mut reloads = controller.subscribe_reloads();
    controller.submit_input("example.com");

    assert_eq!(
        controller.settle().await,
        &SubmissionState::ErrorNotice(GENERIC_FAILURE_MESSAGE.to_string())
    );
    assert!(!reloads.has_changed().unwrap());
}

#[tokio::test]
async fn test_successful_crawl_reloads_views() {
    let mock_server = MockServer::start().await;

    // Fetched once on mount and once more after the crawl completes
    Mock::given(method("GET"))
        .and(path("/api/pages/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Home"}
        ])))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/page/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "title": "Home",
            "insights": []
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page_count": 3})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut shell = PageShell::mount(client_for(&mock_server).await, Some("1"));
    shell.settle().await;
    assert_eq!(shell.sidebar().pages().len(), 1);
    assert!(!shell.apply_invalidation());

    assert!(shell.submission_mut().submit_input("example.com"));
    assert!(shell.settle_submission().await);

    // Both views were restarted
    assert!(shell.sidebar().is_loading());
    assert!(shell.record().state().map_or(false, FetchState::is_pending));

    shell.settle().await;
    assert_eq!(shell.sidebar().pages().len(), 1);
    assert_eq!(shell.record().view().map(|v| v.title.as_str()), Some("Home"));
    assert_eq!(
        shell.submission().state(),
        &SubmissionState::SuccessNotice(success_message(3))
    );

    // The epoch was consumed; nothing more to reload
    assert!(!shell.apply_invalidation());
}

#[tokio::test]
async fn test_failed_crawl_does_not_reload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pages/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Crawl failed"})))
        .mount(&mock_server)
        .await;

    let mut shell = PageShell::mount(client_for(&mock_server).await, None);
    shell.settle().await;

    shell.submission_mut().submit_input("example.com");
    assert!(!shell.settle_submission().await);
    assert!(!shell.sidebar().is_loading());
}
