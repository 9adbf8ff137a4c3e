//! End-to-end tests for the request pipeline over real adapters.
//!
//! Requests go through reqwest to a wiremock backend; credentials and log
//! snapshots land in a file-backed store inside a temp directory.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::tempdir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use janitor_application::{
    AppConfig, ApiClient, AuthError, Authenticator, CredentialStore, KeyValueStore,
    LOG_STORAGE_KEY, Logger, SessionMonitor,
};
use janitor_domain::{ApiErrorKind, ListQuery, LogContext, LogEntry, PageResponse, SessionState};
use janitor_infrastructure::{FileKeyValueStore, HttpLogCollector, ReqwestTransport, SystemClock};

struct Harness {
    client: ApiClient<ReqwestTransport>,
    auth: Authenticator<ReqwestTransport>,
    logger: Logger,
    session: SessionMonitor,
}

fn config(api_url: &str, mode: &str, log_endpoint: Option<&str>) -> AppConfig {
    let api_url = api_url.to_string();
    let mode = mode.to_string();
    let log_endpoint = log_endpoint.map(str::to_string);
    AppConfig::from_lookup(move |key| match key {
        "JANITOR_API_URL" => Some(api_url.clone()),
        "JANITOR_MODE" => Some(mode.clone()),
        "JANITOR_LOG_ENDPOINT" => log_endpoint.clone(),
        _ => None,
    })
    .expect("valid config")
}

fn harness(config: &AppConfig, dir: &Path) -> Harness {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::open(dir).unwrap());
    let settings = config.logger_settings();
    let mut builder = Logger::builder(settings.clone(), Arc::new(SystemClock::new()))
        .store(Arc::clone(&store));
    if let Some(endpoint) = &settings.collector_endpoint {
        builder = builder.collector(Arc::new(HttpLogCollector::from_endpoint(endpoint).unwrap()));
    }
    let logger = builder.build();
    let session = SessionMonitor::default();
    let client = ApiClient::new(
        Arc::new(ReqwestTransport::new().unwrap()),
        CredentialStore::new(store),
        logger.clone(),
        session.clone(),
        config.client_config(),
    );
    Harness {
        auth: Authenticator::new(client.clone()),
        client,
        logger,
        session,
    }
}

fn reopened_credentials(dir: &Path) -> CredentialStore {
    CredentialStore::new(Arc::new(FileKeyValueStore::open(dir).unwrap()))
}

#[tokio::test]
async fn test_login_persists_credential_across_runs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("X-API-Key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();
    let config = config(&server.uri(), "development", None);

    let first = harness(&config, dir.path());
    first.auth.login("  secret-key  ").await.unwrap();
    assert_eq!(first.session.state(), SessionState::Authenticated);

    let stored = reopened_credentials(dir.path()).get().unwrap();
    assert_eq!(stored.expose(), "secret-key");

    let second = harness(&config, dir.path());
    assert_eq!(second.auth.restore().await, SessionState::Authenticated);
}

#[tokio::test]
async fn test_rejected_login_leaves_no_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();
    let h = harness(&config(&server.uri(), "development", None), dir.path());

    let error = h.auth.login("wrong").await.unwrap_err();

    assert!(matches!(error, AuthError::Rejected(_)));
    assert!(!reopened_credentials(dir.path()).exists());
    assert_eq!(h.session.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_unauthorized_response_clears_stored_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/project/7"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "expired"})))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();
    let h = harness(&config(&server.uri(), "development", None), dir.path());
    h.client.credentials().set("stale").unwrap();

    let outcome = h.client.get::<Value>("/project/7").await;

    assert_eq!(outcome.error().map(|e| e.kind), Some(ApiErrorKind::Unauthorized));
    assert_eq!(outcome.error_message(), Some("Invalid or missing API key"));
    assert_eq!(h.session.invalidations(), 1);
    assert!(!reopened_credentials(dir.path()).exists());
}

#[tokio::test]
async fn test_paged_listing_sends_query_and_decodes_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/project"))
        .and(query_param("page", "1"))
        .and(query_param("size", "10"))
        .and(query_param("search", "alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"id": 11}, {"id": 12}],
            "currentPage": 1,
            "totalPages": 5,
            "totalElements": 45,
            "size": 10
        })))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();
    let h = harness(&config(&server.uri(), "development", None), dir.path());

    let page: PageResponse<Value> = h
        .client
        .list("/project", &ListQuery::page(1, 10).with_search("alpha"))
        .await
        .into_result()
        .unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.range().to_string(), "Showing 11 - 20 of 45");
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_failure() {
    let dir = tempdir().unwrap();
    // Port 9 (discard) is closed on test hosts.
    let h = harness(&config("http://127.0.0.1:9", "development", None), dir.path());

    let outcome = h.client.get::<Value>("/project").await;

    assert_eq!(outcome.error().map(|e| e.kind), Some(ApiErrorKind::Network));
    let messages: Vec<_> = h.logger.get_logs().into_iter().map(|e| e.message).collect();
    assert!(messages.iter().any(|m| m == "Network error - no response received"));
}

#[tokio::test]
async fn test_production_snapshot_is_capped_and_reloaded() {
    let dir = tempdir().unwrap();
    let config = config("http://127.0.0.1:9", "production", None);
    let h = harness(&config, dir.path());

    for i in 0..120 {
        h.logger.info(format!("entry {i}"), LogContext::new());
    }
    assert_eq!(h.logger.get_logs().len(), 120);

    let raw = FileKeyValueStore::open(dir.path())
        .unwrap()
        .get(LOG_STORAGE_KEY)
        .unwrap()
        .unwrap();
    let persisted: Vec<LogEntry> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.len(), 100);
    assert_eq!(persisted[0].message, "entry 20");

    let restarted = harness(&config, dir.path());
    let reloaded = restarted.logger.get_logs();
    assert_eq!(reloaded.len(), 100);
    assert_eq!(reloaded[99].message, "entry 119");
}

#[tokio::test]
async fn test_production_errors_reach_the_collector() {
    let collector = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&collector)
        .await;
    let dir = tempdir().unwrap();
    let endpoint = format!("{}/logs", collector.uri());
    let h = harness(
        &config("http://127.0.0.1:9", "production", Some(&endpoint)),
        dir.path(),
    );

    h.logger.info("not delivered", LogContext::new());
    h.logger.error("delivered", LogContext::new().with("code", 42));

    let mut received = Vec::new();
    for _ in 0..50 {
        received = collector.received_requests().await.unwrap_or_default();
        if !received.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(received.len(), 1);
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["message"], "delivered");
    assert_eq!(body["level"], "ERROR");
    assert_eq!(body["context"]["code"], 42);
}
