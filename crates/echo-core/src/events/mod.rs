//! Outcomes of moderation workflows.
//!
//! REST handlers build one of these after their persistence writes commit
//! and hand it to the real-time engine, which turns it into targeted
//! notifications and admin-dashboard pushes.

pub mod report;
pub mod user;

use serde::{Deserialize, Serialize};

use crate::types::ReportId;

pub use report::ReportResolution;
pub use user::{UserRoleChange, UserStatusChange};

/// Union of all moderation outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "event", rename_all = "snake_case")]
pub enum ModerationEvent {
    /// An administrator changed a user's status.
    UserStatusChanged(UserStatusChange),
    /// An administrator granted or revoked the admin role.
    UserRoleChanged(UserRoleChange),
    /// An administrator changed a report's status.
    ReportStatusChanged(ReportResolution),
    /// An administrator deleted a report.
    ReportDeleted {
        /// The deleted report.
        report_id: ReportId,
    },
}
