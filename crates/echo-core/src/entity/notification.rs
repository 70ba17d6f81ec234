//! Notification records persisted by the notification store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{NotificationId, PostId, UserId};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// Someone liked a post.
    Like,
    /// Someone commented on a post.
    Comment,
    /// Someone started following the user.
    Follow,
    /// The user was mentioned.
    Mention,
    /// An administrator warned the user.
    Warning,
    /// An administrator banned the user.
    Ban,
    /// A report filed by the user was resolved or dismissed.
    ReportResolved,
    /// One of the user's posts was removed after a report.
    PostRemoved,
}

impl NotificationKind {
    /// Return the wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Follow => "follow",
            Self::Mention => "mention",
            Self::Warning => "warning",
            Self::Ban => "ban",
            Self::ReportResolved => "report-resolved",
            Self::PostRemoved => "post-removed",
        }
    }
}

/// A notification about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    /// Recipient.
    pub user: UserId,
    /// Who caused it, if anyone.
    pub from_user: Option<UserId>,
    /// Kind.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Rendered message text.
    pub message: String,
    /// Related post, if any.
    pub post: Option<PostId>,
}

/// A notification as stored by the notification store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Store-assigned id.
    pub id: NotificationId,
    /// Recipient.
    pub user: UserId,
    /// Who caused it, if anyone.
    pub from_user: Option<UserId>,
    /// Kind.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Rendered message text.
    pub message: String,
    /// Related post, if any.
    pub post: Option<PostId>,
    /// Read flag.
    pub read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names_match_serde() {
        for kind in [
            NotificationKind::Follow,
            NotificationKind::Ban,
            NotificationKind::ReportResolved,
            NotificationKind::PostRemoved,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }
}
