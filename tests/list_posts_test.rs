//! Classification of post listing outcomes

mod common;

use std::time::Duration;

use blogfront::client::RestClientFactory;
use blogfront::config::ServiceConfig;
use blogfront::posts::{list_posts, POSTS_COLLECTION, RETRIEVAL_FAILED};
use blogfront::types::ServiceError;
use blogfront::Error;
use common::{article_row, CapturedLogs, FakeFactory, FakeService, Outcome};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn service() -> ServiceConfig {
    ServiceConfig::new("https://db.example.com", "anon-key")
}

fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(logs.clone()));
    (logs, guard)
}

#[tokio::test]
async fn test_returns_rows_as_articles() {
    let fake = FakeService::rows(vec![article_row("1", "First"), article_row("2", "Second")]);
    let factory = FakeFactory(fake.clone());

    let posts = list_posts(&service(), &factory).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "1");
    assert_eq!(posts[1].title, "Second");
    assert_eq!(posts[0].created_at, "2024-03-20T12:34:56Z");
    assert_eq!(posts[0].author.as_deref(), Some("editor"));
    assert_eq!(posts[0].thumbnail, None);
    assert_eq!(fake.queries(), vec![POSTS_COLLECTION.to_string()]);
}

#[tokio::test]
async fn test_empty_result_set_is_success() {
    let factory = FakeFactory(FakeService::rows(vec![]));

    let posts = list_posts(&service(), &factory).await.unwrap();

    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_service_error_is_upstream_query_error() {
    let (logs, _guard) = capture_logs();
    let upstream = ServiceError::new("permission denied for table posts").with_code("42501");
    let factory = FakeFactory(FakeService::failing(upstream.clone()));

    let err = list_posts(&service(), &factory).await.unwrap_err();

    match err {
        Error::UpstreamQuery(reported) => assert_eq!(reported, upstream),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(logs.at(Level::ERROR).is_empty());
}

#[tokio::test]
async fn test_missing_result_set_is_not_found() {
    let (logs, _guard) = capture_logs();
    let factory = FakeFactory(FakeService::empty());

    let err = list_posts(&service(), &factory).await.unwrap_err();

    assert!(matches!(err, Error::NotFound(_)), "unexpected error: {err:?}");
    assert!(logs.at(Level::ERROR).is_empty());
}

#[tokio::test]
async fn test_missing_configuration_is_logged_once_and_flattened() {
    let (logs, _guard) = capture_logs();
    let factory = RestClientFactory::new();

    let err = list_posts(&ServiceConfig::default(), &factory).await.unwrap_err();

    match err {
        Error::Internal(message) => assert_eq!(message, RETRIEVAL_FAILED),
        other => panic!("unexpected error: {other:?}"),
    }

    let errors = logs.at(Level::ERROR);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains("post retrieval error"));
    assert!(errors[0].contains("Configuration error"));
}

#[tokio::test]
async fn test_client_is_not_created_without_key() {
    let (_logs, _guard) = capture_logs();
    let fake = FakeService::rows(vec![]);
    let factory = FakeFactory(fake.clone());

    let err = list_posts(&ServiceConfig::new("https://db.example.com", ""), &factory)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Internal(_)));
    assert_eq!(fake.clients_created(), 0);
    assert!(fake.queries().is_empty());
}

#[tokio::test]
async fn test_malformed_row_is_internal_error() {
    let (logs, _guard) = capture_logs();
    let factory = FakeFactory(FakeService::rows(vec![json!({ "id": "1", "title": "no body" })]));

    let err = list_posts(&service(), &factory).await.unwrap_err();

    assert!(matches!(err, Error::Internal(_)));
    let errors = logs.at(Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Serialization error"));
}

#[tokio::test]
async fn test_bounded_wait_turns_hang_into_internal_error() {
    let (logs, _guard) = capture_logs();
    let factory = FakeFactory(FakeService::new(Outcome::Hang));
    let config = service().with_timeout(Duration::from_millis(20));

    let err = list_posts(&config, &factory).await.unwrap_err();

    assert!(matches!(err, Error::Internal(_)));
    let errors = logs.at(Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("timed out"));
}
