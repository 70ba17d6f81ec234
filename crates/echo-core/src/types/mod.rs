//! Shared types: typed identifiers and the connection role tag.

pub mod id;
pub mod role;

pub use id::{ConnectionId, NotificationId, PostId, ReportId, UserId};
pub use role::Role;
