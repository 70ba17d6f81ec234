//! Realtime engine metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Engine-level metrics counters.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    connections_total: AtomicU64,
    connections_active: AtomicU64,
    joins: AtomicU64,
    presence_broadcasts: AtomicU64,
    notifications_delivered: AtomicU64,
    notifications_dropped: AtomicU64,
    dashboard_pushes: AtomicU64,
}

impl EngineMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transport connect
    pub fn connection_opened(&self) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
        self.connections_active.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a transport disconnect
    pub fn connection_closed(&self) {
        let _ = self
            .connections_active
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }

    /// Record a completed join
    pub fn join_recorded(&self) {
        self.joins.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an `onlineUsers` / `onlineUsersCount` broadcast pair
    pub fn presence_broadcast(&self) {
        self.presence_broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a notification routed to an online user
    pub fn notification_delivered(&self) {
        self.notifications_delivered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a notification dropped because the user was offline
    pub fn notification_dropped(&self) {
        self.notifications_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an admin-dashboard push
    pub fn dashboard_push(&self) {
        self.dashboard_pushes.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_total: self.connections_total.load(Ordering::Relaxed),
            connections_active: self.connections_active.load(Ordering::Relaxed),
            joins: self.joins.load(Ordering::Relaxed),
            presence_broadcasts: self.presence_broadcasts.load(Ordering::Relaxed),
            notifications_delivered: self.notifications_delivered.load(Ordering::Relaxed),
            notifications_dropped: self.notifications_dropped.load(Ordering::Relaxed),
            dashboard_pushes: self.dashboard_pushes.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Connections ever accepted
    pub connections_total: u64,
    /// Currently open connections
    pub connections_active: u64,
    /// Completed joins
    pub joins: u64,
    /// Presence broadcast pairs emitted
    pub presence_broadcasts: u64,
    /// Notifications routed to online users
    pub notifications_delivered: u64,
    /// Notifications dropped for offline users
    pub notifications_dropped: u64,
    /// Admin-dashboard pushes
    pub dashboard_pushes: u64,
}
