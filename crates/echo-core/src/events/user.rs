//! User moderation outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::user::{ActorSummary, UserStatus};
use crate::types::{Role, UserId};

/// A user's moderation status changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusChange {
    /// Affected user.
    pub user_id: UserId,
    /// Affected user's display name.
    pub username: String,
    /// Status before the change.
    pub previous_status: UserStatus,
    /// Status after the change.
    pub new_status: UserStatus,
    /// Administrator who made the change.
    pub changed_by: ActorSummary,
    /// When the change was committed.
    pub changed_at: DateTime<Utc>,
}

/// A user's role changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleChange {
    /// Affected user.
    pub user_id: UserId,
    /// Affected user's display name.
    pub username: String,
    /// Role before the change.
    pub previous_role: Role,
    /// Role after the change.
    pub new_role: Role,
    /// Administrator who made the change.
    pub changed_by: ActorSummary,
    /// When the change was committed.
    pub changed_at: DateTime<Utc>,
}
