//! Cancellation through a client-bound token.

use std::time::Duration;

use listmonk_api::{Get, ListmonkClient, ListmonkError, Subscriber};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_cancelled_token_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/subscribers/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"id": 1, "email": "a@b.com"}
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let token = CancellationToken::new();
    token.cancel();
    let client = ListmonkClient::new(&mock_server.uri(), "api-user", "secret")
        .unwrap()
        .with_cancellation(token);

    let err = Subscriber::get(&client, 1).await.unwrap_err();
    assert!(matches!(err, ListmonkError::Cancelled));
}

#[tokio::test]
async fn test_cancel_during_slow_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/subscribers/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": {"id": 1, "email": "a@b.com"}}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let token = CancellationToken::new();
    let client = ListmonkClient::new(&mock_server.uri(), "api-user", "secret")
        .unwrap()
        .with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let err = Subscriber::get(&client, 1).await.unwrap_err();
    assert!(matches!(err, ListmonkError::Cancelled));
    canceller.await.unwrap();
}

#[tokio::test]
async fn test_other_handles_are_unaffected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/subscribers/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"id": 1, "email": "a@b.com"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = ListmonkClient::new(&mock_server.uri(), "api-user", "secret").unwrap();
    let token = CancellationToken::new();
    token.cancel();
    let _cancelled = base.with_cancellation(token);

    let subscriber = Subscriber::get(&base, 1).await.unwrap();
    assert_eq!(subscriber.email, "a@b.com");
}
