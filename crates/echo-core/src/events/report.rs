//! Report moderation outcomes.

use serde::{Deserialize, Serialize};

use crate::entity::report::{ReportStatus, ReportSummary};
use crate::types::UserId;

/// A report's status changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResolution {
    /// The report after the change.
    pub report: ReportSummary,
    /// Who filed the report, if the account still exists.
    pub reporter: Option<UserId>,
    /// Author of the reported post, if any.
    pub post_author: Option<UserId>,
}

impl ReportResolution {
    /// Whether the reported post is removed by this change.
    pub fn removes_post(&self) -> bool {
        self.report.status_changed()
            && self.report.status == ReportStatus::Resolved
            && self.post_author.is_some()
    }
}
