//! Integration tests for the HTTP long-poll transport.
//!
//! Runs the real router on a loopback listener and drives it with an HTTP
//! client, checking the status codes and bodies each outcome maps to.

#![allow(
    clippy::expect_used,
    clippy::panic,
    clippy::unwrap_used,
    missing_docs,
    unreachable_pub
)]

use std::{net::SocketAddr, sync::OnceLock, time::Duration};

use lpoll_core::Event;
use lpoll_http_long_poll::{HttpServerBuilder, HttpServerState, error::ErrorBody, serve};
use reqwest::StatusCode;
use testresult::TestResult;
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;

const POLL_TIMEOUT: Duration = Duration::from_secs(1);

fn init_tracing() {
    static ONCE: OnceLock<()> = OnceLock::new();
    ONCE.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

// ─── Test Server Harness ─────────────────────────────────────────────────────

struct TestServer {
    address: SocketAddr,
    state: HttpServerState,
    shutdown: CancellationToken,
    handle: JoinHandle<std::io::Result<()>>,
    http: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        init_tracing();

        let shutdown = CancellationToken::new();
        let state = HttpServerBuilder::new()
            .poll_timeout(POLL_TIMEOUT)
            .build(shutdown.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let address = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(serve(listener, state.clone()));

        Self {
            address,
            state,
            shutdown,
            handle,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.address)
    }

    async fn poll(&self, client_id: &str) -> reqwest::Response {
        self.http
            .get(self.url(&format!("/poll/{client_id}")))
            .send()
            .await
            .expect("poll request")
    }

    async fn publish(&self, client_id: &str, message: &str) -> reqwest::Response {
        self.http
            .post(self.url(&format!("/publish/{client_id}")))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .expect("publish request")
    }

    async fn stop(self) -> TestResult {
        self.shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(5), self.handle).await???;
        Ok(())
    }
}

// ─── Poll ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn poll_times_out_with_no_content() -> TestResult {
    let server = TestServer::start().await;

    let response = server.poll("c1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await?.is_empty());
    assert_eq!(server.state.hub().active_clients().await, 1);

    server.stop().await
}

#[tokio::test]
async fn publish_during_poll_is_delivered() -> TestResult {
    let server = TestServer::start().await;

    let poll = {
        let http = server.http.clone();
        let url = server.url("/poll/c1");
        tokio::spawn(async move { http.get(url).send().await })
    };

    // Wait for the poll to register the client.
    let mut outcome = server.publish("c1", "hi").await.status();
    for _ in 0..50 {
        if outcome != StatusCode::NOT_FOUND {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        outcome = server.publish("c1", "hi").await.status();
    }
    assert_eq!(outcome, StatusCode::OK);

    let response = poll.await??;
    assert_eq!(response.status(), StatusCode::OK);
    let event: Event = response.json().await?;
    assert_eq!(event.message, "hi");

    server.stop().await
}

#[tokio::test]
async fn delivered_body_has_message_and_time() -> TestResult {
    let server = TestServer::start().await;
    server.poll("c1").await;
    server.publish("c1", "payload").await;

    let body: serde_json::Value = server.poll("c1").await.json().await?;
    assert_eq!(body["message"], "payload");
    assert!(body["time"].is_string());
    assert_eq!(body.as_object().map(serde_json::Map::len), Some(2));

    server.stop().await
}

// ─── Publish ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn publish_to_unknown_client_is_not_found() -> TestResult {
    let server = TestServer::start().await;

    let response = server.publish("nobody", "hi").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = response.json().await?;
    assert_eq!(body.error, "Client not found");
    assert_eq!(server.state.hub().active_clients().await, 0);

    server.stop().await
}

#[tokio::test]
async fn second_publish_is_service_unavailable() -> TestResult {
    let server = TestServer::start().await;
    server.poll("c1").await;

    let first = server.publish("c1", "hi").await;
    assert_eq!(first.status(), StatusCode::OK);
    let body: serde_json::Value = first.json().await?;
    assert_eq!(body["message"], "Event published.");

    let second = server.publish("c1", "bye").await;
    assert_eq!(second.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: ErrorBody = second.json().await?;
    assert_eq!(body.error, "Client channel is full, skipping event.");

    let event: Event = server.poll("c1").await.json().await?;
    assert_eq!(event.message, "hi");

    server.stop().await
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_client_id_is_bad_request() -> TestResult {
    let server = TestServer::start().await;

    for path in ["/poll", "/poll/"] {
        let response = server.http.get(server.url(path)).send().await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "GET {path}");
        let body: ErrorBody = response.json().await?;
        assert_eq!(body.error, "clientId is required");
    }

    for path in ["/publish", "/publish/"] {
        let response = server
            .http
            .post(server.url(path))
            .json(&serde_json::json!({ "message": "hi" }))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "POST {path}");
    }

    server.stop().await
}

#[tokio::test]
async fn malformed_publish_body_is_bad_request() -> TestResult {
    let server = TestServer::start().await;
    server.poll("c1").await;

    let not_json = server
        .http
        .post(server.url("/publish/c1"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);

    let no_message = server
        .http
        .post(server.url("/publish/c1"))
        .json(&serde_json::json!({ "text": "hi" }))
        .send()
        .await?;
    assert_eq!(no_message.status(), StatusCode::BAD_REQUEST);

    let empty_message = server.publish("c1", "").await;
    assert_eq!(empty_message.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = empty_message.json().await?;
    assert_eq!(body.error, "message is required");

    // Nothing was deposited by the rejected requests.
    assert_eq!(server.publish("c1", "ok").await.status(), StatusCode::OK);

    server.stop().await
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn evicted_client_poll_returns_no_content() -> TestResult {
    let server = TestServer::start().await;

    let poll = {
        let http = server.http.clone();
        let url = server.url("/poll/c1");
        tokio::spawn(async move { http.get(url).send().await })
    };

    let client = lpoll_core::ClientId::new("c1")?;
    let mut evicted = false;
    for _ in 0..50 {
        if server.state.hub().registry().evict(&client).await {
            evicted = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(evicted);

    let response = poll.await??;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(server.publish("c1", "late").await.status(), StatusCode::NOT_FOUND);

    server.stop().await
}

#[tokio::test]
async fn shutdown_releases_waiting_polls() -> TestResult {
    init_tracing();

    let shutdown = CancellationToken::new();
    let state = HttpServerBuilder::new()
        .poll_timeout(Duration::from_secs(60))
        .build(shutdown.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let server = tokio::spawn(serve(listener, state.clone()));

    let poll = tokio::spawn(async move {
        reqwest::get(format!("http://{address}/poll/c1")).await
    });

    let client = lpoll_core::ClientId::new("c1")?;
    for _ in 0..50 {
        if state.hub().registry().lookup(&client).await.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    shutdown.cancel();

    let response = tokio::time::timeout(Duration::from_secs(5), poll).await???;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    tokio::time::timeout(Duration::from_secs(5), server).await???;

    Ok(())
}
