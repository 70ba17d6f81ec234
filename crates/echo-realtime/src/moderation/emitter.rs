//! Moderation event emitter.
//!
//! Called by the admin REST handlers after their writes commit. Turns
//! workflow outcomes into personal notifications, forced logouts, and
//! admin-dashboard pushes. Delivery is best-effort: offline users get
//! nothing in real time.

use std::sync::Arc;

use tracing::{debug, info};

use echo_core::entity::{
    ActorSummary, AdminStats, PostStats, ReportStats, ReportStatus, ReportSummary, UserStatus,
};
use echo_core::events::{ModerationEvent, ReportResolution, UserRoleChange, UserStatusChange};
use echo_core::types::{ReportId, UserId};

use crate::message::types::{NotificationPayload, OutboundEvent};
use crate::metrics::EngineMetrics;
use crate::notification::formatter::NotificationFormatter;
use crate::presence::PresenceRegistry;
use crate::room::{EventBus, Room};

/// Fans moderation outcomes out to users and dashboard viewers.
#[derive(Debug, Clone)]
pub struct ModerationEventEmitter {
    registry: Arc<PresenceRegistry>,
    bus: Arc<dyn EventBus>,
    metrics: Arc<EngineMetrics>,
}

impl ModerationEventEmitter {
    /// Creates an emitter. The registry is only read.
    pub fn new(
        registry: Arc<PresenceRegistry>,
        bus: Arc<dyn EventBus>,
        metrics: Arc<EngineMetrics>,
    ) -> Self {
        Self {
            registry,
            bus,
            metrics,
        }
    }

    // ── Personal notifications ───────────────────────────────────────

    /// Tells a user they received a warning.
    pub fn notify_warning(&self, user_id: &UserId, from_user: &ActorSummary) -> bool {
        let payload = NotificationFormatter::warning()
            .from_user(Some(from_user.clone()))
            .build();
        self.deliver_notification(user_id, payload)
    }

    /// Tells a user they are banned, then forces their client to log out.
    pub fn notify_ban(&self, user_id: &UserId, from_user: &ActorSummary) -> bool {
        let payload = NotificationFormatter::ban()
            .from_user(Some(from_user.clone()))
            .build();
        if !self.deliver_notification(user_id, payload) {
            return false;
        }
        self.force_logout(user_id)
    }

    /// Tells an online user's clients to drop their session.
    pub fn force_logout(&self, user_id: &UserId) -> bool {
        if self.registry.connection_id_for(user_id).is_none() {
            return false;
        }
        let room = Room::Personal(user_id.clone());
        self.bus.emit_to_room(&room, &OutboundEvent::ForceLogout);
        info!(user_id = %user_id, "Forced logout sent");
        true
    }

    /// Tells a reporter their report was resolved or dismissed.
    pub fn notify_report_outcome(&self, user_id: &UserId, resolved: bool) -> bool {
        let payload = NotificationFormatter::report_outcome(resolved).build();
        self.deliver_notification(user_id, payload)
    }

    /// Tells an author their post was removed after a report.
    pub fn notify_post_removed(&self, user_id: &UserId) -> bool {
        let payload = NotificationFormatter::post_removed().build();
        self.deliver_notification(user_id, payload)
    }

    /// Sends a `notification` event to the user's personal room when they
    /// are online. Returns whether a route existed.
    pub fn deliver_notification(&self, user_id: &UserId, payload: NotificationPayload) -> bool {
        let Some(conn_id) = self.registry.connection_id_for(user_id) else {
            debug!(
                user_id = %user_id,
                kind = payload.kind.as_str(),
                "User offline, real-time notification dropped"
            );
            self.metrics.notification_dropped();
            return false;
        };

        let kind = payload.kind;
        let sent = self.bus.emit_to_room(
            &Room::Personal(user_id.clone()),
            &OutboundEvent::Notification(payload),
        );
        self.metrics.notification_delivered();
        debug!(
            user_id = %user_id,
            conn_id = %conn_id,
            kind = kind.as_str(),
            sent,
            "Notification delivered"
        );
        true
    }

    // ── Admin dashboard pushes ───────────────────────────────────────

    /// Pushes dashboard counters. The online count comes from the registry.
    pub fn push_admin_stats(&self, mut stats: AdminStats) -> usize {
        stats.online_users = self.registry.online_count() as u64;
        self.push_dashboard(OutboundEvent::AdminStats(stats))
    }

    /// Pushes report counters.
    pub fn push_report_stats(&self, stats: ReportStats) -> usize {
        self.push_dashboard(OutboundEvent::ReportStatsUpdate(stats))
    }

    /// Pushes post counters.
    pub fn push_post_stats(&self, stats: PostStats) -> usize {
        self.push_dashboard(OutboundEvent::PostStatsUpdate(stats))
    }

    /// Mirrors a report status change to other admins.
    pub fn push_report_status_changed(&self, report: ReportSummary) -> usize {
        self.push_dashboard(OutboundEvent::ReportStatusChanged(report))
    }

    /// Mirrors a report deletion to other admins.
    pub fn push_report_deleted(&self, report_id: ReportId) -> usize {
        self.push_dashboard(OutboundEvent::ReportDeleted { report_id })
    }

    /// Mirrors a user status change to other admins.
    pub fn push_user_status_changed(&self, change: UserStatusChange) -> usize {
        self.push_dashboard(OutboundEvent::UserStatusChanged(change))
    }

    /// Mirrors a user role change to other admins.
    pub fn push_user_role_changed(&self, change: UserRoleChange) -> usize {
        self.push_dashboard(OutboundEvent::UserRoleChanged(change))
    }

    fn push_dashboard(&self, event: OutboundEvent) -> usize {
        let sent = self.bus.emit_to_room(&Room::AdminDashboard, &event);
        self.metrics.dashboard_push();
        debug!(event = event.name(), sent, "Dashboard push");
        sent
    }

    // ── Workflow outcomes ────────────────────────────────────────────

    /// Applies one moderation workflow outcome.
    pub fn apply(&self, event: &ModerationEvent) {
        match event {
            ModerationEvent::UserStatusChanged(change) => self.apply_user_status_change(change),
            ModerationEvent::UserRoleChanged(change) => self.apply_role_change(change),
            ModerationEvent::ReportStatusChanged(resolution) => {
                self.apply_report_resolution(resolution)
            }
            ModerationEvent::ReportDeleted { report_id } => {
                self.push_report_deleted(report_id.clone());
            }
        }
    }

    /// Runs the parts of an outcome that no notification record backs:
    /// forced logout and dashboard pushes. Personal notifications are left
    /// to the caller, which delivers them from stored records.
    pub fn apply_side_effects(&self, event: &ModerationEvent) {
        match event {
            ModerationEvent::UserStatusChanged(change) => self.finish_status_change(change),
            ModerationEvent::UserRoleChanged(change) => self.apply_role_change(change),
            ModerationEvent::ReportStatusChanged(resolution) => {
                self.push_report_status_changed(resolution.report.clone());
            }
            ModerationEvent::ReportDeleted { report_id } => {
                self.push_report_deleted(report_id.clone());
            }
        }
    }

    /// A user's status was set: warn or ban them, and tell the dashboard.
    pub fn apply_user_status_change(&self, change: &UserStatusChange) {
        match change.new_status {
            UserStatus::Warning => {
                self.notify_warning(&change.user_id, &change.changed_by);
            }
            UserStatus::Banned => {
                let payload = NotificationFormatter::ban()
                    .from_user(Some(change.changed_by.clone()))
                    .build();
                self.deliver_notification(&change.user_id, payload);
            }
            UserStatus::Active => {}
        }
        self.finish_status_change(change);
    }

    fn finish_status_change(&self, change: &UserStatusChange) {
        if change.new_status == UserStatus::Banned {
            self.force_logout(&change.user_id);
        }
        info!(
            user_id = %change.user_id,
            previous = %change.previous_status,
            new = %change.new_status,
            "User status changed"
        );
        self.push_user_status_changed(change.clone());
    }

    /// A report changed status: notify the reporter and, when a post was
    /// removed, its author. The dashboard always gets the new status.
    pub fn apply_report_resolution(&self, resolution: &ReportResolution) {
        let report = &resolution.report;
        if report.status_changed() && report.status != ReportStatus::Pending {
            if let Some(reporter) = &resolution.reporter {
                self.notify_report_outcome(reporter, report.status == ReportStatus::Resolved);
            }
            if resolution.removes_post() {
                if let Some(author) = &resolution.post_author {
                    self.notify_post_removed(author);
                }
            }
        }
        self.push_report_status_changed(report.clone());
    }

    /// A user's role changed.
    pub fn apply_role_change(&self, change: &UserRoleChange) {
        info!(
            user_id = %change.user_id,
            previous = %change.previous_role,
            new = %change.new_role,
            "User role changed"
        );
        self.push_user_role_changed(change.clone());
    }
}
