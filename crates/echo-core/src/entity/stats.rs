//! Live statistics pushed to the admin dashboard.

use serde::{Deserialize, Serialize};

/// Overall dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Registered accounts.
    pub total_users: u64,
    /// Accounts with `active` status.
    pub active_users: u64,
    /// Posts.
    pub total_posts: u64,
    /// Reports, all statuses.
    pub total_reports: u64,
    /// Reports awaiting an administrator.
    pub pending_reports: u64,
    /// Upheld reports.
    pub resolved_reports: u64,
    /// Rejected reports.
    pub dismissed_reports: u64,
    /// Mean time from report to decision, in hours.
    pub average_response_time_hours: f64,
    /// Users currently online. Overwritten from the presence registry when
    /// pushed through the real-time engine.
    pub online_users: u64,
}

/// Report counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    /// Reports, all statuses.
    pub total: u64,
    /// Pending reports.
    pub pending: u64,
    /// Resolved reports.
    pub resolved: u64,
    /// Dismissed reports.
    pub dismissed: u64,
}

/// Post counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    /// Posts.
    pub total_posts: u64,
    /// Likes across all posts.
    pub total_likes: u64,
    /// Comments across all posts.
    pub total_comments: u64,
}
