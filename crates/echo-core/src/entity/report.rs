//! Moderation report summary mirrored to the admin dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::types::{PostId, ReportId, UserId};

/// Lifecycle state of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Awaiting an administrator.
    #[default]
    Pending,
    /// Upheld; the reported post is removed.
    Resolved,
    /// Rejected.
    Dismissed,
}

impl ReportStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "resolved" => Ok(Self::Resolved),
            "dismissed" => Ok(Self::Dismissed),
            _ => Err(AppError::validation("Statut invalide")),
        }
    }
}

/// Compact view of a report after a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Report id.
    pub id: ReportId,
    /// Status before the change.
    pub previous_status: ReportStatus,
    /// Status after the change.
    pub status: ReportStatus,
    /// Reason chosen by the reporter.
    pub reason: String,
    /// Reported post, if it still exists.
    pub post_id: Option<PostId>,
    /// Administrator who handled the report.
    pub resolved_by: Option<UserId>,
    /// When the change happened.
    pub updated_at: DateTime<Utc>,
}

impl ReportSummary {
    /// Whether the status actually changed.
    pub fn status_changed(&self) -> bool {
        self.previous_status != self.status
    }
}
