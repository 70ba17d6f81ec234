//! Domain records exchanged between the REST layer, the collaborator
//! stores, and the real-time engine.

pub mod notification;
pub mod report;
pub mod stats;
pub mod user;

pub use notification::{NewNotification, NotificationKind, NotificationRecord};
pub use report::{ReportStatus, ReportSummary};
pub use stats::{AdminStats, PostStats, ReportStats};
pub use user::{ActorSummary, UserProfile, UserStatus};
