//! Inbound and outbound WebSocket message type definitions.
//!
//! Frames are JSON objects of the form `{ "event": <name>, "data": <payload> }`
//! in both directions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use echo_core::entity::{
    ActorSummary, AdminStats, NotificationKind, PostStats, ReportStats, ReportSummary,
};
use echo_core::events::{UserRoleChange, UserStatusChange};
use echo_core::types::{NotificationId, PostId, ReportId, Role, UserId};

/// Messages sent by the client to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum InboundMessage {
    /// Bind the connection to a user identity.
    Join(JoinPayload),
    /// Start receiving admin-dashboard broadcasts.
    JoinAdminDashboard,
    /// Stop receiving admin-dashboard broadcasts.
    LeaveAdminDashboard,
}

/// Payload of a `join` frame.
///
/// Older clients send the bare user id string; newer ones send an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JoinPayload {
    /// `"data": "<userId>"`
    Bare(String),
    /// `"data": { "userId": "...", "isAdmin": true }`
    Detailed {
        /// User id; missing or blank ids leave the connection anonymous.
        #[serde(rename = "userId", default)]
        user_id: Option<String>,
        /// Administrator flag; defaults to `false`.
        #[serde(rename = "isAdmin", default)]
        is_admin: Option<bool>,
    },
}

impl JoinPayload {
    /// Parsed user id, `None` when missing or blank.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Bare(raw) => UserId::parse(raw),
            Self::Detailed { user_id, .. } => user_id.as_deref().and_then(UserId::parse),
        }
    }

    /// Role requested by the payload.
    pub fn role(&self) -> Role {
        match self {
            Self::Bare(_) => Role::User,
            Self::Detailed { is_admin, .. } => Role::from_admin_flag(is_admin.unwrap_or(false)),
        }
    }
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum OutboundEvent {
    /// Full online-user snapshot (`allUsers` room).
    OnlineUsers(Vec<UserId>),
    /// Online-user count (`adminDashboard` room).
    OnlineUsersCount(usize),
    /// Notification for the target user (personal room).
    Notification(NotificationPayload),
    /// The client must drop its session (personal room).
    ForceLogout,
    /// Dashboard counters.
    AdminStats(AdminStats),
    /// Report counters.
    ReportStatsUpdate(ReportStats),
    /// A report changed status.
    ReportStatusChanged(ReportSummary),
    /// A report was deleted.
    ReportDeleted {
        /// Deleted report.
        #[serde(rename = "reportId")]
        report_id: ReportId,
    },
    /// A user's moderation status changed.
    UserStatusChanged(UserStatusChange),
    /// A user's role changed.
    UserRoleChanged(UserRoleChange),
    /// Post counters.
    PostStatsUpdate(PostStats),
}

impl OutboundEvent {
    /// Wire name of the event, used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OnlineUsers(_) => "onlineUsers",
            Self::OnlineUsersCount(_) => "onlineUsersCount",
            Self::Notification(_) => "notification",
            Self::ForceLogout => "forceLogout",
            Self::AdminStats(_) => "adminStats",
            Self::ReportStatsUpdate(_) => "reportStatsUpdate",
            Self::ReportStatusChanged(_) => "reportStatusChanged",
            Self::ReportDeleted { .. } => "reportDeleted",
            Self::UserStatusChanged(_) => "userStatusChanged",
            Self::UserRoleChanged(_) => "userRoleChanged",
            Self::PostStatsUpdate(_) => "postStatsUpdate",
        }
    }
}

/// Body of a `notification` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// Id of the durable record, when one backs this delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<NotificationId>,
    /// Kind.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Rendered message.
    pub message: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Read flag.
    pub read: bool,
    /// Who caused the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_user: Option<ActorSummary>,
    /// Related post.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_accepts_bare_user_id() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"event":"join","data":"64f1c2ab"}"#).unwrap();
        let InboundMessage::Join(payload) = msg else {
            panic!("expected join");
        };
        assert_eq!(payload.user_id().unwrap().as_str(), "64f1c2ab");
        assert_eq!(payload.role(), Role::User);
    }

    #[test]
    fn test_join_accepts_object_with_admin_flag() {
        let msg: InboundMessage = serde_json::from_str(
            r#"{"event":"join","data":{"userId":"a1","isAdmin":true}}"#,
        )
        .unwrap();
        let InboundMessage::Join(payload) = msg else {
            panic!("expected join");
        };
        assert_eq!(payload.user_id().unwrap().as_str(), "a1");
        assert_eq!(payload.role(), Role::Admin);
    }

    #[test]
    fn test_join_without_user_id_has_no_identity() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"event":"join","data":{"isAdmin":true}}"#).unwrap();
        let InboundMessage::Join(payload) = msg else {
            panic!("expected join");
        };
        assert!(payload.user_id().is_none());

        let blank = JoinPayload::Bare("   ".into());
        assert!(blank.user_id().is_none());
    }

    #[test]
    fn test_dashboard_frames_need_no_data() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"event":"joinAdminDashboard"}"#).unwrap();
        assert_eq!(msg, InboundMessage::JoinAdminDashboard);
        let msg: InboundMessage =
            serde_json::from_str(r#"{"event":"leaveAdminDashboard"}"#).unwrap();
        assert_eq!(msg, InboundMessage::LeaveAdminDashboard);
    }

    #[test]
    fn test_outbound_wire_shape() {
        let json = serde_json::to_value(OutboundEvent::ForceLogout).unwrap();
        assert_eq!(json, serde_json::json!({ "event": "forceLogout" }));

        let json = serde_json::to_value(OutboundEvent::OnlineUsersCount(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "event": "onlineUsersCount", "data": 3 }));

        let json = serde_json::to_value(OutboundEvent::ReportDeleted {
            report_id: ReportId::parse("r9").unwrap(),
        })
        .unwrap();
        assert_eq!(json["data"]["reportId"], "r9");
        assert_eq!(json["event"], "reportDeleted");
    }

    #[test]
    fn test_notification_payload_omits_empty_optionals() {
        let payload = NotificationPayload {
            id: None,
            kind: NotificationKind::Ban,
            message: "banni".into(),
            timestamp: Utc::now(),
            read: false,
            from_user: None,
            post_id: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "ban");
        assert!(json.get("id").is_none());
        assert!(json.get("fromUser").is_none());
        assert!(json.get("postId").is_none());
    }
}
