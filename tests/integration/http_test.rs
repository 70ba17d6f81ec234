//! Integration tests for the HTTP surface.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_healthcheck() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/healthcheck").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["connections"], 0);
    assert_eq!(response.body["data"]["onlineUsers"], 0);
}

#[tokio::test]
async fn test_presence_reflects_registry() {
    let app = helpers::TestApp::new();
    let engine = app.state.realtime.clone();
    let (handle, _rx) = engine.open_connection();
    engine
        .handle_frame(handle.id, r#"{"event":"join","data":"u42"}"#)
        .unwrap();

    let response = app.request("GET", "/api/admin/presence").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["onlineUsers"], serde_json::json!(["u42"]));
    assert_eq!(response.body["data"]["count"], 1);

    let response = app.request("GET", "/api/admin/presence/u42").await;
    assert_eq!(response.body["data"]["isOnline"], true);
    assert_eq!(response.body["data"]["session"]["role"], "user");
    assert_eq!(response.body["data"]["session"]["userId"], "u42");

    engine.close_connection(handle.id);
    let response = app.request("GET", "/api/admin/presence/u42").await;
    assert_eq!(response.body["data"]["isOnline"], false);
    assert!(response.body["data"].get("session").is_none());
}

#[tokio::test]
async fn test_blank_user_id_is_rejected() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/admin/presence/%20").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_ws_route_requires_upgrade() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/ws").await;

    assert!(
        response.status.is_client_error(),
        "Expected a 4xx, got {}",
        response.status
    );
}
