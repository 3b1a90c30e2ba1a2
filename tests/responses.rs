//! Status handling and body shapes: error envelopes, raw text previews,
//! unwrapped bodies and decode failures.

use std::time::Duration;

use listmonk_api::{
    get_campaign_preview, get_public_lists, get_template_preview, routes, Create, Get,
    ListmonkClient, ListmonkError, MailingList, Subscriber, SubscriberParams, Template,
    TemplateParams, TemplateType,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ListmonkClient {
    ListmonkClient::new(&server.uri(), "api-user", "secret").unwrap()
}

#[tokio::test]
async fn test_error_envelope_message_is_the_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/subscribers"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({"message": "invalid email"})),
        )
        .mount(&mock_server)
        .await;

    let params = SubscriberParams {
        email: "nope".to_string(),
        ..Default::default()
    };
    let err = Subscriber::create(&client(&mock_server), params)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "invalid email");
    assert_eq!(err.status_code(), Some(400));
    assert!(matches!(err, ListmonkError::Api { .. }));
}

#[tokio::test]
async fn test_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lists/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "List not found"})),
        )
        .mount(&mock_server)
        .await;

    let err = MailingList::get(&client(&mock_server), 99).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "List not found");
}

#[tokio::test]
async fn test_non_envelope_error_body_keeps_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lists/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let err = MailingList::get(&client(&mock_server), 1).await.unwrap_err();
    match err {
        ListmonkError::MalformedError {
            status_code, body, ..
        } => {
            assert_eq!(status_code, 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("Expected MalformedError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/subscribers/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&mock_server)
        .await;

    let err = Subscriber::get(&client(&mock_server), 1).await.unwrap_err();
    assert!(matches!(err, ListmonkError::Decode(_)));
}

#[tokio::test]
async fn test_other_2xx_is_not_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/subscribers/1"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"message": "unexpected"})),
        )
        .mount(&mock_server)
        .await;

    let err = Subscriber::get(&client(&mock_server), 1).await.unwrap_err();
    assert_eq!(err.status_code(), Some(201));
}

#[tokio::test]
async fn test_previews_are_raw_text() {
    let mock_server = MockServer::start().await;
    let html = "<html><body><h1>Hello {{ .Subscriber.Name }}</h1></body></html>";

    Mock::given(method("GET"))
        .and(path("/api/campaigns/3/preview"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/templates/4/preview"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "Template not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    assert_eq!(get_campaign_preview(&client, 3).await.unwrap(), html);

    let err = get_template_preview(&client, 4).await.unwrap_err();
    assert_eq!(err.to_string(), "Template not found");
}

#[tokio::test]
async fn test_public_lists_are_not_enveloped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"uuid": "55e243af-80c6-4169-8d7f-bc571e0269e9", "name": "Opt-in list"}
        ])))
        .mount(&mock_server)
        .await;

    let lists = get_public_lists(&client(&mock_server)).await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name, "Opt-in list");
}

#[tokio::test]
async fn test_template_create_takes_first_of_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": 6, "name": "Receipt", "type": "tx", "subject": "Order"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = TemplateParams {
        name: "Receipt".to_string(),
        template_type: TemplateType::Tx,
        subject: Some("Order".to_string()),
        body: "{{ .Tx.Data.id }}".to_string(),
        body_source: None,
    };
    let template = Template::create(&client(&mock_server), params).await.unwrap();
    assert_eq!(template.id, 6);
    assert_eq!(template.template_type, TemplateType::Tx);
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    // Bind and release a port so nothing is listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = ListmonkClient::new(&format!("http://127.0.0.1:{port}"), "api-user", "secret")
        .unwrap();

    let err = MailingList::get(&client, 1).await.unwrap_err();
    assert!(matches!(err, ListmonkError::Http(ref e) if e.is_connect()));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_unencodable_query_fails_before_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let params = serde_json::json!({"query": {"nested": 1}});
    let err = routes::GET_LISTS
        .call_with(&client(&mock_server), &[], &params)
        .await
        .unwrap_err();
    assert!(matches!(err, ListmonkError::QueryEncode(_)));
}

#[tokio::test]
async fn test_default_client_has_no_request_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lists/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "data": {"id": 1, "name": "Slow", "type": "public", "optin": "single"}
                }))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&mock_server)
        .await;

    let list = MailingList::get(&client(&mock_server), 1).await.unwrap();
    assert_eq!(list.name, "Slow");
}

#[tokio::test]
async fn test_configured_timeout_is_a_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lists/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "data": {"id": 1, "name": "Slow", "type": "public", "optin": "single"}
                }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = ListmonkClient::builder(mock_server.uri(), "api-user", "secret")
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = MailingList::get(&client, 1).await.unwrap_err();
    assert!(matches!(err, ListmonkError::Http(ref e) if e.is_timeout()));
}
