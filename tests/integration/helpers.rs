//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tower::ServiceExt;

use echo_api::{AppState, build_app};
use echo_core::config::AppConfig;
use echo_realtime::RealtimeEngine;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for driving the engine directly
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        let config = AppConfig::default();
        let realtime = Arc::new(RealtimeEngine::new(config.realtime.clone()));
        let state = AppState::new(config, realtime);
        let router = build_app(state.clone());
        Self { router, state }
    }

    /// Make an HTTP request against the router
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Serve the app on an ephemeral port
    pub async fn spawn(self) -> RunningApp {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server failed");
        });
        RunningApp {
            addr,
            state: self.state,
        }
    }
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body as JSON
    pub body: Value,
}

/// A server listening on a real socket
pub struct RunningApp {
    /// Bound address
    pub addr: SocketAddr,
    /// Shared state
    pub state: AppState,
}

/// Client side of a WebSocket connection
pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

impl RunningApp {
    /// Open a WebSocket to `/ws`
    pub async fn connect(&self) -> WsClient {
        let url = format!("ws://{}/ws", self.addr);
        let (ws, _) = connect_async(url).await.expect("WebSocket handshake failed");
        ws
    }
}

/// Send a JSON frame
pub async fn send(ws: &mut WsClient, frame: Value) {
    ws.send(Message::Text(frame.to_string().into()))
        .await
        .expect("Failed to send frame");
}

/// Send a raw text frame
pub async fn send_raw(ws: &mut WsClient, text: &str) {
    ws.send(Message::Text(text.into()))
        .await
        .expect("Failed to send frame");
}

/// Next JSON event, skipping control frames
pub async fn next_event(ws: &mut WsClient) -> Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("Timed out waiting for event")
            .expect("Socket closed")
            .expect("Socket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("Invalid JSON event");
        }
    }
}

/// Asserts nothing arrives within a short window
pub async fn assert_silent(ws: &mut WsClient) {
    let next = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(next.is_err(), "unexpected frame: {next:?}");
}

/// Join as `user_id` and wait for the presence broadcast
pub async fn join(ws: &mut WsClient, user_id: &str, is_admin: bool) -> Value {
    send(
        ws,
        serde_json::json!({ "event": "join", "data": { "userId": user_id, "isAdmin": is_admin } }),
    )
    .await;
    let event = next_event(ws).await;
    assert_eq!(event["event"], "onlineUsers");
    event
}
