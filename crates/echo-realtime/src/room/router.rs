//! Room router: turns presence and role changes into room joins and leaves.

use std::sync::Arc;

use tracing::debug;

use echo_core::types::{ConnectionId, Role, UserId};

use crate::presence::registry::{PresenceEntry, PresenceRegistry};

use super::bus::EventBus;
use super::types::Room;

/// Decides which rooms a connection belongs to.
#[derive(Debug, Clone)]
pub struct RoomRouter {
    registry: Arc<PresenceRegistry>,
    bus: Arc<dyn EventBus>,
}

impl RoomRouter {
    /// Creates a router over the given registry and transport.
    pub fn new(registry: Arc<PresenceRegistry>, bus: Arc<dyn EventBus>) -> Self {
        Self { registry, bus }
    }

    /// Joins the personal room and `allUsers`, plus `adminRoom` for admins.
    ///
    /// A connection re-joining without the admin flag leaves `adminRoom` and
    /// `adminDashboard`. A previous personal room is not left.
    pub fn on_user_join(&self, conn_id: ConnectionId, user_id: &UserId, role: Role) {
        self.bus.join(conn_id, &Room::Personal(user_id.clone()));
        self.bus.join(conn_id, &Room::AllUsers);

        if role.is_admin() {
            self.bus.join(conn_id, &Room::AdminRoom);
        } else {
            self.bus.leave(conn_id, &Room::AdminRoom);
            self.bus.leave(conn_id, &Room::AdminDashboard);
        }

        debug!(conn_id = %conn_id, user_id = %user_id, role = %role, "Rooms joined");
    }

    /// Joins `adminDashboard` when the connection currently serves `user_id`
    /// as an admin. Otherwise a no-op returning `false`.
    pub fn on_dashboard_subscribe(&self, conn_id: ConnectionId, user_id: &UserId) -> bool {
        let serves_user = self.registry.user_for_connection(conn_id).as_ref() == Some(user_id);
        let is_admin = self.registry.role_of_connection(conn_id) == Some(Role::Admin);
        if !(serves_user && is_admin) {
            debug!(conn_id = %conn_id, user_id = %user_id, "Dashboard subscription ignored");
            return false;
        }

        self.bus.join(conn_id, &Room::AdminDashboard);
        true
    }

    /// Leaves `adminDashboard`. Returns whether the connection was in it.
    pub fn on_dashboard_unsubscribe(&self, conn_id: ConnectionId) -> bool {
        let was_member = self.bus.is_member(conn_id, &Room::AdminDashboard);
        self.bus.leave(conn_id, &Room::AdminDashboard);
        was_member
    }

    /// Unregisters the connection. Room memberships are dropped by the
    /// transport when the socket closes.
    pub fn on_disconnect(&self, conn_id: ConnectionId) -> Option<PresenceEntry> {
        self.registry.unregister_connection(conn_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionHandle;
    use crate::room::RoomHub;

    fn setup() -> (Arc<PresenceRegistry>, Arc<RoomHub>, RoomRouter) {
        let registry = Arc::new(PresenceRegistry::new());
        let hub = Arc::new(RoomHub::new());
        let router = RoomRouter::new(registry.clone(), hub.clone());
        (registry, hub, router)
    }

    fn attach(
        hub: &RoomHub,
    ) -> (ConnectionId, tokio::sync::mpsc::Receiver<crate::message::types::OutboundEvent>) {
        let (handle, rx) = ConnectionHandle::channel(8);
        let id = handle.id;
        hub.attach(handle);
        (id, rx)
    }

    #[tokio::test]
    async fn test_admin_join_enters_admin_room() {
        let (_registry, hub, router) = setup();
        let (conn, _rx) = attach(&hub);
        let admin = UserId::parse("a1").unwrap();

        router.on_user_join(conn, &admin, Role::Admin);
        assert!(hub.is_member(conn, &Room::Personal(admin)));
        assert!(hub.is_member(conn, &Room::AllUsers));
        assert!(hub.is_member(conn, &Room::AdminRoom));
        assert!(!hub.is_member(conn, &Room::AdminDashboard));
    }

    #[tokio::test]
    async fn test_dashboard_requires_admin_registration() {
        let (registry, hub, router) = setup();
        let (conn, _rx) = attach(&hub);
        let user = UserId::parse("u1").unwrap();

        // Not registered at all.
        assert!(!router.on_dashboard_subscribe(conn, &user));

        registry.register_connection(user.clone(), conn, Role::User);
        router.on_user_join(conn, &user, Role::User);
        assert!(!router.on_dashboard_subscribe(conn, &user));
        assert!(!hub.is_member(conn, &Room::AdminDashboard));

        registry.register_connection(user.clone(), conn, Role::Admin);
        router.on_user_join(conn, &user, Role::Admin);
        assert!(router.on_dashboard_subscribe(conn, &user));
        assert!(hub.is_member(conn, &Room::AdminDashboard));

        assert!(router.on_dashboard_unsubscribe(conn));
        assert!(!router.on_dashboard_unsubscribe(conn));
    }

    #[tokio::test]
    async fn test_demotion_leaves_admin_rooms() {
        let (registry, hub, router) = setup();
        let (conn, _rx) = attach(&hub);
        let user = UserId::parse("a1").unwrap();

        registry.register_connection(user.clone(), conn, Role::Admin);
        router.on_user_join(conn, &user, Role::Admin);
        router.on_dashboard_subscribe(conn, &user);

        registry.register_connection(user.clone(), conn, Role::User);
        router.on_user_join(conn, &user, Role::User);
        assert!(!hub.is_member(conn, &Room::AdminRoom));
        assert!(!hub.is_member(conn, &Room::AdminDashboard));
        assert!(hub.is_member(conn, &Room::AllUsers));
    }

    #[tokio::test]
    async fn test_disconnect_unregisters() {
        let (registry, hub, router) = setup();
        let (conn, _rx) = attach(&hub);
        let user = UserId::parse("u1").unwrap();
        registry.register_connection(user.clone(), conn, Role::User);

        assert_eq!(router.on_disconnect(conn).map(|e| e.user_id), Some(user.clone()));
        assert!(router.on_disconnect(conn).is_none());
        assert!(!registry.is_online(&user));
    }
}
