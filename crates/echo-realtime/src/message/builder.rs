//! Builder for `notification` payloads.

use chrono::Utc;

use echo_core::entity::{ActorSummary, NotificationKind, NotificationRecord};

use super::types::NotificationPayload;

/// Fluent builder for [`NotificationPayload`].
#[derive(Debug, Clone)]
pub struct NotificationBuilder {
    payload: NotificationPayload,
}

impl NotificationBuilder {
    /// Start a payload of the given kind, stamped now and unread.
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            payload: NotificationPayload {
                id: None,
                kind,
                message: message.into(),
                timestamp: Utc::now(),
                read: false,
                from_user: None,
                post_id: None,
            },
        }
    }

    /// Start from a persisted record so the client sees the durable id.
    pub fn from_record(record: &NotificationRecord) -> Self {
        Self {
            payload: NotificationPayload {
                id: Some(record.id.clone()),
                kind: record.kind,
                message: record.message.clone(),
                timestamp: record.created_at,
                read: record.read,
                from_user: None,
                post_id: record.post.clone(),
            },
        }
    }

    /// Attach the actor identity.
    pub fn from_user(mut self, actor: Option<ActorSummary>) -> Self {
        self.payload.from_user = actor;
        self
    }

    /// Finish as a bare payload.
    pub fn build(self) -> NotificationPayload {
        self.payload
    }
}
