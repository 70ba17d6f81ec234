//! Notification message formatting.
//!
//! Texts match what the web and mobile clients already render.

use echo_core::entity::{NewNotification, NotificationKind, ReportStatus, UserStatus};
use echo_core::events::ModerationEvent;

use crate::message::builder::NotificationBuilder;

/// Warning issued by an administrator.
pub const WARNING_MESSAGE: &str = "Vous avez reçu un avertissement de la part des administrateurs";
/// Account banned.
pub const BAN_MESSAGE: &str = "Votre compte a été banni par les administrateurs";
/// Report resolved.
pub const REPORT_RESOLVED_MESSAGE: &str = "Votre signalement a été résolu";
/// Report dismissed.
pub const REPORT_DISMISSED_MESSAGE: &str = "Votre signalement a été ignoré";
/// Post removed after a report.
pub const POST_REMOVED_MESSAGE: &str = "Votre publication a été supprimée suite à un signalement";

/// Formats notification payloads for common events.
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// Default message for a kind.
    pub fn message_for(kind: NotificationKind) -> &'static str {
        match kind {
            NotificationKind::Like => "a aimé votre publication",
            NotificationKind::Comment => "a commenté votre publication",
            NotificationKind::Follow => "a commencé à vous suivre",
            NotificationKind::Mention => "vous a mentionné",
            NotificationKind::Warning => WARNING_MESSAGE,
            NotificationKind::Ban => BAN_MESSAGE,
            NotificationKind::ReportResolved => REPORT_RESOLVED_MESSAGE,
            NotificationKind::PostRemoved => POST_REMOVED_MESSAGE,
        }
    }

    /// Formats a warning notification.
    pub fn warning() -> NotificationBuilder {
        NotificationBuilder::new(NotificationKind::Warning, WARNING_MESSAGE)
    }

    /// Formats a ban notification.
    pub fn ban() -> NotificationBuilder {
        NotificationBuilder::new(NotificationKind::Ban, BAN_MESSAGE)
    }

    /// Formats the outcome of a report for the reporter.
    pub fn report_outcome(resolved: bool) -> NotificationBuilder {
        let message = if resolved {
            REPORT_RESOLVED_MESSAGE
        } else {
            REPORT_DISMISSED_MESSAGE
        };
        NotificationBuilder::new(NotificationKind::ReportResolved, message)
    }

    /// Formats a post-removed notification for the post author.
    pub fn post_removed() -> NotificationBuilder {
        NotificationBuilder::new(NotificationKind::PostRemoved, POST_REMOVED_MESSAGE)
    }

    /// Durable notification records a moderation outcome produces. Mirrors
    /// the real-time fan-out of the moderation emitter.
    pub fn records_for(event: &ModerationEvent) -> Vec<NewNotification> {
        match event {
            ModerationEvent::UserStatusChanged(change) => {
                let kind = match change.new_status {
                    UserStatus::Warning => NotificationKind::Warning,
                    UserStatus::Banned => NotificationKind::Ban,
                    UserStatus::Active => return Vec::new(),
                };
                vec![NewNotification {
                    user: change.user_id.clone(),
                    from_user: Some(change.changed_by.id.clone()),
                    kind,
                    message: Self::message_for(kind).to_string(),
                    post: None,
                }]
            }
            ModerationEvent::ReportStatusChanged(resolution) => {
                let report = &resolution.report;
                if !report.status_changed() || report.status == ReportStatus::Pending {
                    return Vec::new();
                }
                let resolved = report.status == ReportStatus::Resolved;
                let mut records = Vec::new();
                if let Some(reporter) = &resolution.reporter {
                    records.push(NewNotification {
                        user: reporter.clone(),
                        from_user: report.resolved_by.clone(),
                        kind: NotificationKind::ReportResolved,
                        message: Self::report_outcome(resolved).build().message,
                        post: report.post_id.clone(),
                    });
                }
                if let (true, Some(author)) = (resolution.removes_post(), &resolution.post_author) {
                    records.push(NewNotification {
                        user: author.clone(),
                        from_user: report.resolved_by.clone(),
                        kind: NotificationKind::PostRemoved,
                        message: POST_REMOVED_MESSAGE.to_string(),
                        post: None,
                    });
                }
                records
            }
            ModerationEvent::UserRoleChanged(_) | ModerationEvent::ReportDeleted { .. } => {
                Vec::new()
            }
        }
    }
}
