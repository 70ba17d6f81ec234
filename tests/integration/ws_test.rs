//! Integration tests for WebSocket presence and moderation fan-out.

mod helpers;

use chrono::Utc;
use futures::SinkExt;
use serde_json::json;

use echo_core::entity::{ActorSummary, UserStatus};
use echo_core::events::{ModerationEvent, UserStatusChange};
use echo_core::types::UserId;

use helpers::{assert_silent, join, next_event, send, send_raw};

#[tokio::test]
async fn test_join_broadcasts_online_users() {
    let app = helpers::TestApp::new().spawn().await;
    let mut alice = app.connect().await;

    let event = join(&mut alice, "alice", false).await;
    assert_eq!(event["data"], json!(["alice"]));

    let mut bob = app.connect().await;
    send(&mut bob, json!({ "event": "join", "data": "bob" })).await;

    assert_eq!(next_event(&mut bob).await["data"], json!(["alice", "bob"]));
    assert_eq!(next_event(&mut alice).await["data"], json!(["alice", "bob"]));
}

#[tokio::test]
async fn test_disconnect_updates_presence() {
    let app = helpers::TestApp::new().spawn().await;
    let mut alice = app.connect().await;
    let mut bob = app.connect().await;
    join(&mut alice, "alice", false).await;
    join(&mut bob, "bob", false).await;
    next_event(&mut alice).await;

    bob.close(None).await.expect("close failed");

    let event = next_event(&mut alice).await;
    assert_eq!(event["event"], "onlineUsers");
    assert_eq!(event["data"], json!(["alice"]));
    assert!(!app.state.realtime.registry.is_online(&UserId::parse("bob").unwrap()));
}

#[tokio::test]
async fn test_admin_dashboard_receives_counts() {
    let app = helpers::TestApp::new().spawn().await;
    let mut admin = app.connect().await;
    join(&mut admin, "admin", true).await;

    send(&mut admin, json!({ "event": "joinAdminDashboard" })).await;
    let event = next_event(&mut admin).await;
    assert_eq!(event, json!({ "event": "onlineUsersCount", "data": 1 }));

    let mut bob = app.connect().await;
    join(&mut bob, "bob", false).await;

    assert_eq!(next_event(&mut admin).await["event"], "onlineUsers");
    assert_eq!(
        next_event(&mut admin).await,
        json!({ "event": "onlineUsersCount", "data": 2 })
    );
    assert_silent(&mut bob).await;
}

#[tokio::test]
async fn test_dashboard_refused_for_regular_user() {
    let app = helpers::TestApp::new().spawn().await;
    let mut bob = app.connect().await;
    join(&mut bob, "bob", false).await;

    send(&mut bob, json!({ "event": "joinAdminDashboard" })).await;

    assert_silent(&mut bob).await;
}

#[tokio::test]
async fn test_ban_forces_logout_and_updates_dashboard() {
    let app = helpers::TestApp::new().spawn().await;
    let mut bob = app.connect().await;
    let mut admin = app.connect().await;
    join(&mut bob, "bob", false).await;
    join(&mut admin, "admin", true).await;
    next_event(&mut bob).await;
    send(&mut admin, json!({ "event": "joinAdminDashboard" })).await;
    assert_eq!(next_event(&mut admin).await["event"], "onlineUsersCount");

    app.state
        .realtime
        .emitter
        .apply(&ModerationEvent::UserStatusChanged(UserStatusChange {
            user_id: UserId::parse("bob").unwrap(),
            username: "bob".into(),
            previous_status: UserStatus::Active,
            new_status: UserStatus::Banned,
            changed_by: ActorSummary {
                id: UserId::parse("admin").unwrap(),
                username: "modo".into(),
                avatar: String::new(),
            },
            changed_at: Utc::now(),
        }));

    let notification = next_event(&mut bob).await;
    assert_eq!(notification["event"], "notification");
    assert_eq!(notification["data"]["type"], "ban");
    assert_eq!(notification["data"]["fromUser"]["username"], "modo");
    assert_eq!(next_event(&mut bob).await, json!({ "event": "forceLogout" }));
    assert_silent(&mut bob).await;

    let change = next_event(&mut admin).await;
    assert_eq!(change["event"], "userStatusChanged");
    assert_eq!(change["data"]["userId"], "bob");
    assert_eq!(change["data"]["newStatus"], "banned");
}

#[tokio::test]
async fn test_garbage_frames_keep_connection_open() {
    let app = helpers::TestApp::new().spawn().await;
    let mut alice = app.connect().await;

    send_raw(&mut alice, "not json at all").await;
    send_raw(&mut alice, r#"{"event":"teleport","data":1}"#).await;

    let event = join(&mut alice, "alice", false).await;
    assert_eq!(event["data"], json!(["alice"]));
}

#[tokio::test]
async fn test_rejoin_on_new_socket_survives_stale_close() {
    let app = helpers::TestApp::new().spawn().await;
    let mut first = app.connect().await;
    join(&mut first, "alice", false).await;

    let mut second = app.connect().await;
    send(&mut second, json!({ "event": "join", "data": "alice" })).await;
    assert_eq!(next_event(&mut second).await["data"], json!(["alice"]));

    first.close(None).await.expect("close failed");
    assert_silent(&mut second).await;
    assert!(app.state.realtime.registry.is_online(&UserId::parse("alice").unwrap()));
}
