use std::time::Duration;

use dusseldorf::client::USER_AGENT_VALUE;
use dusseldorf::{
    ApiError, ClientConfig, ErrorKind, OdpDusseldorf, Request, SessionOwnership,
    COMMUNICATION_MESSAGE, TIMEOUT_MESSAGE,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DISABLED_PARKINGS: &str = include_str!("fixtures/disabled_parkings.json");

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_base_url("http", &server.address().to_string())
}

async fn mount_json(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/api/action/datastore/test"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn json_request_sends_headers() {
    init_logger();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/action/datastore/test"))
        .and(header("accept", "application/json"))
        .and(header("user-agent", USER_AGENT_VALUE))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(DISABLED_PARKINGS, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = OdpDusseldorf::new(config(&server));
    let value = client.request(Request::get("test")).await.unwrap();
    assert_eq!(value["features"].as_array().unwrap().len(), 3);
    client.close().await;
}

#[tokio::test]
async fn content_type_with_charset_is_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/action/datastore/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"success": true}"#, "application/json; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let client = OdpDusseldorf::new(config(&server));
    let value = client.request(Request::get("test")).await.unwrap();
    assert_eq!(value["success"], true);
}

#[tokio::test]
async fn internal_session_is_owned_and_closed() {
    let server = MockServer::start().await;
    mount_json(&server, DISABLED_PARKINGS).await;

    let client = OdpDusseldorf::new(config(&server));
    assert_eq!(client.session_ownership().await, None);

    client.request(Request::get("test")).await.unwrap();
    assert_eq!(client.session_ownership().await, Some(SessionOwnership::Owned));

    client.close().await;
    assert_eq!(client.session_ownership().await, None);
}

#[tokio::test]
async fn borrowed_session_stays_usable_after_close() {
    let server = MockServer::start().await;
    mount_json(&server, DISABLED_PARKINGS).await;

    let session = reqwest::Client::new();
    let client = OdpDusseldorf::with_session(config(&server), session.clone());
    client.request(Request::get("test")).await.unwrap();
    client.close().await;
    assert_eq!(client.session_ownership().await, Some(SessionOwnership::Borrowed));

    let response = session
        .get(format!("{}/api/action/datastore/test", server.uri()))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn timeout() {
    init_logger();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/action/datastore/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(DISABLED_PARKINGS, "application/json")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = OdpDusseldorf::with_session(
        config(&server).with_request_timeout(Duration::from_millis(100)),
        reqwest::Client::new(),
    );
    let why = client.request(Request::get("test")).await.unwrap_err();
    assert_eq!(why.kind(), ErrorKind::Connection);
    match why {
        ApiError::Connection { message, .. } => assert_eq!(message, TIMEOUT_MESSAGE),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/action/datastore/test"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("Goodmorning!", "text/plain"))
        .mount(&server)
        .await;

    let client = OdpDusseldorf::new(config(&server));
    let why = client.request(Request::get("test")).await.unwrap_err();
    assert_eq!(why.kind(), ErrorKind::Api);
    match why {
        ApiError::UnexpectedContentType {
            content_type,
            response,
        } => {
            assert!(content_type.starts_with("text/plain"), "{content_type}");
            assert_eq!(response, "Goodmorning!");
        }
        other => panic!("expected content type error, got {other:?}"),
    }
}

#[tokio::test]
async fn network_failure() {
    init_logger();
    /* nothing listens on the port once the listener is dropped */
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    let config = ClientConfig::default().with_base_url("http", &address.to_string());

    let client = OdpDusseldorf::new(config);
    let why = client.request(Request::get("test")).await.unwrap_err();
    assert!(why.is_connection_error());
    match why {
        ApiError::Connection { message, source } => {
            assert_eq!(message, COMMUNICATION_MESSAGE);
            assert!(source.is_some());
        }
        other => panic!("expected connection error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_is_not_processed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/action/datastore/test"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_raw(r#"{"success": false}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = OdpDusseldorf::new(config(&server));
    let why = client.request(Request::get("test")).await.unwrap_err();
    assert!(why.is_connection_error());
    match why {
        ApiError::InvalidResponse {
            status_code,
            response,
            ..
        } => {
            assert_eq!(status_code, reqwest::StatusCode::NOT_FOUND);
            assert_eq!(response.as_deref(), Some(r#"{"success": false}"#));
        }
        other => panic!("expected invalid response, got {other:?}"),
    }
}

#[tokio::test]
async fn broken_json_body() {
    let server = MockServer::start().await;
    mount_json(&server, "{\"result\": ").await;

    let client = OdpDusseldorf::new(config(&server));
    let why = client.request(Request::get("test")).await.unwrap_err();
    assert!(matches!(why, ApiError::JsonError(_)), "{why:?}");
}
