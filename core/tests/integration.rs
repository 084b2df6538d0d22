//! `NetworkService` over `UreqTransport` against the live echo server.
//!
//! # Design
//! Starts the mock server on a random port and sends real HTTP through the
//! production transport. The server echoes what it received, so each test
//! checks the request that actually went over the wire.

use std::collections::HashMap;

use mock_server::Echo;
use networking::{ApiEndpoint, HttpMethod, NetworkError, NetworkService, QueryItem};

async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn get_with_query_reaches_server() {
    let base = spawn_server().await;
    let endpoint = ApiEndpoint::new(&base, "/my-path", HttpMethod::Get)
        .with_query_items(vec![QueryItem::new("key", "value"), QueryItem::new("q", "a b")]);

    let (body, response) = NetworkService::new().request(&endpoint).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.url.as_str(), format!("{base}/my-path?key=value&q=a%20b"));
    assert_eq!(response.header("content-type"), Some("application/json"));

    let echo: Echo = serde_json::from_slice(&body).unwrap();
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/my-path");
    assert_eq!(echo.query.as_deref(), Some("key=value&q=a%20b"));
    assert_eq!(echo.headers["content-type"], "application/json");
}

#[tokio::test(flavor = "multi_thread")]
async fn post_sends_body_and_custom_headers() {
    let base = spawn_server().await;
    let headers = HashMap::from([
        ("Content-Type".to_string(), "text/plain".to_string()),
        ("X-Trace".to_string(), "abc".to_string()),
    ]);
    let endpoint = ApiEndpoint::new(&base, "/todos", HttpMethod::Post)
        .with_headers(headers)
        .with_body("hello");

    let echo: Echo = NetworkService::new().request_json(&endpoint).await.unwrap();

    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, "hello");
    assert_eq!(echo.headers["content-type"], "text/plain");
    assert_eq!(echo.headers["x-trace"], "abc");
}

#[tokio::test(flavor = "multi_thread")]
async fn every_method_is_sent_as_is() {
    let base = spawn_server().await;
    let service = NetworkService::new();

    for method in [HttpMethod::Put, HttpMethod::Patch, HttpMethod::Delete] {
        let endpoint = ApiEndpoint::new(&base, "/items/1", method);
        let echo: Echo = service.request_json(&endpoint).await.unwrap();
        assert_eq!(echo.method, method.as_str());
        assert_eq!(echo.path, "/items/1");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn error_status_is_returned_as_data() {
    let base = spawn_server().await;
    let endpoint = ApiEndpoint::new(&base, "/status/503", HttpMethod::Get);
    let service = NetworkService::new();

    let (body, response) = service.request(&endpoint).await.unwrap();
    assert_eq!(response.status, 503);
    assert_eq!(&body[..], b"status 503");

    let err = service
        .request_json::<Echo, _>(&endpoint)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        NetworkError::ServerError {
            status: 503,
            body: None
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_refused_is_request_failed() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = ApiEndpoint::new(format!("http://{addr}"), "/", HttpMethod::Get);
    let err = NetworkService::new().request(&endpoint).await.unwrap_err();

    match err {
        NetworkError::RequestFailed(cause) => {
            assert!(cause.downcast_ref::<ureq::Error>().is_some(), "{cause}")
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_url_never_touches_network() {
    let endpoint = ApiEndpoint::new("https://example].com/", "/my path", HttpMethod::Get);
    let err = NetworkService::new().request(&endpoint).await.unwrap_err();
    assert_eq!(err, NetworkError::InvalidUrl);
}
