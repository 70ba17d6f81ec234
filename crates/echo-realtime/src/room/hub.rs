//! In-memory transport hub: live connection handles plus room memberships.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use echo_core::types::ConnectionId;

use crate::connection::handle::ConnectionHandle;
use crate::message::types::OutboundEvent;

use super::bus::EventBus;
use super::subscription::MembershipIndex;
use super::types::Room;

/// Single-process implementation of [`EventBus`].
///
/// The WebSocket gateway attaches a handle when a socket is accepted and
/// detaches it when the socket closes; detaching drops every membership.
#[derive(Debug, Default)]
pub struct RoomHub {
    /// Connection ID → handle.
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    /// Room → member connection IDs.
    rooms: DashMap<Room, HashSet<ConnectionId>>,
    /// Reverse index.
    memberships: MembershipIndex,
}

impl RoomHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a connection addressable.
    pub fn attach(&self, handle: Arc<ConnectionHandle>) {
        debug!(conn_id = %handle.id, "Connection attached to hub");
        self.connections.insert(handle.id, handle);
    }

    /// Removes a connection and all of its memberships.
    pub fn detach(&self, conn_id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.connections.remove(&conn_id)?;
        handle.mark_closed();

        for room in self.memberships.remove_all(conn_id) {
            self.remove_member(&room, conn_id);
        }

        debug!(conn_id = %conn_id, "Connection detached from hub");
        Some(handle)
    }

    /// IDs of every attached connection.
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.connections.iter().map(|e| *e.key()).collect()
    }

    /// Looks up a live handle.
    pub fn connection(&self, conn_id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.get(&conn_id).map(|e| e.value().clone())
    }

    /// Number of attached connections, anonymous ones included.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of non-empty rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Member connection IDs of a room.
    pub fn members(&self, room: &Room) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Rooms a connection is in.
    pub fn rooms_of(&self, conn_id: ConnectionId) -> HashSet<Room> {
        self.memberships.rooms_of(conn_id)
    }

    fn remove_member(&self, room: &Room, conn_id: ConnectionId) {
        if let Some(mut members) = self.rooms.get_mut(room) {
            members.remove(&conn_id);
        }
        self.rooms.remove_if(room, |_, members| members.is_empty());
    }
}

impl EventBus for RoomHub {
    fn join(&self, conn_id: ConnectionId, room: &Room) {
        if !self.connections.contains_key(&conn_id) {
            debug!(conn_id = %conn_id, room = %room, "Join for detached connection ignored");
            return;
        }
        self.rooms.entry(room.clone()).or_default().insert(conn_id);
        self.memberships.add(conn_id, room.clone());
    }

    fn leave(&self, conn_id: ConnectionId, room: &Room) {
        self.remove_member(room, conn_id);
        self.memberships.remove(conn_id, room);
    }

    fn emit_to_room(&self, room: &Room, event: &OutboundEvent) -> usize {
        let mut sent = 0;
        for conn_id in self.members(room) {
            let Some(handle) = self.connection(conn_id) else {
                continue;
            };
            if handle.send(event.clone()) {
                sent += 1;
            } else {
                warn!(
                    conn_id = %conn_id,
                    room = %room,
                    event = event.name(),
                    "Failed to deliver room broadcast"
                );
            }
        }
        sent
    }

    fn emit_to_connection(&self, conn_id: ConnectionId, event: &OutboundEvent) -> bool {
        self.connection(conn_id)
            .is_some_and(|handle| handle.send(event.clone()))
    }

    fn room_size(&self, room: &Room) -> usize {
        self.rooms.get(room).map(|members| members.len()).unwrap_or(0)
    }

    fn is_member(&self, conn_id: ConnectionId, room: &Room) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|members| members.contains(&conn_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_core::types::UserId;

    fn attached(hub: &RoomHub) -> (ConnectionId, tokio::sync::mpsc::Receiver<OutboundEvent>) {
        let (handle, rx) = ConnectionHandle::channel(8);
        let id = handle.id;
        hub.attach(handle);
        (id, rx)
    }

    #[tokio::test]
    async fn test_emit_reaches_only_room_members() {
        let hub = RoomHub::new();
        let (a, mut rx_a) = attached(&hub);
        let (b, mut rx_b) = attached(&hub);

        hub.join(a, &Room::AllUsers);
        assert_eq!(hub.emit_to_room(&Room::AllUsers, &OutboundEvent::ForceLogout), 1);

        assert_eq!(rx_a.try_recv().ok(), Some(OutboundEvent::ForceLogout));
        assert!(rx_b.try_recv().is_err());
        assert!(hub.is_member(a, &Room::AllUsers));
        assert!(!hub.is_member(b, &Room::AllUsers));
    }

    #[tokio::test]
    async fn test_detach_drops_all_memberships_and_empty_rooms() {
        let hub = RoomHub::new();
        let (a, _rx) = attached(&hub);
        let personal = Room::Personal(UserId::parse("u1").unwrap());

        hub.join(a, &personal);
        hub.join(a, &Room::AllUsers);
        assert_eq!(hub.room_count(), 2);

        let handle = hub.detach(a).unwrap();
        assert!(!handle.is_alive());
        assert_eq!(hub.room_count(), 0);
        assert_eq!(hub.room_size(&Room::AllUsers), 0);
        assert!(hub.rooms_of(a).is_empty());
        assert!(hub.detach(a).is_none());
    }

    #[tokio::test]
    async fn test_join_for_unknown_connection_is_ignored() {
        let hub = RoomHub::new();
        hub.join(ConnectionId::new(), &Room::AdminRoom);
        assert_eq!(hub.room_size(&Room::AdminRoom), 0);
    }

    #[tokio::test]
    async fn test_leave_keeps_other_members() {
        let hub = RoomHub::new();
        let (a, _rx_a) = attached(&hub);
        let (b, _rx_b) = attached(&hub);
        hub.join(a, &Room::AdminDashboard);
        hub.join(b, &Room::AdminDashboard);

        hub.leave(a, &Room::AdminDashboard);
        assert_eq!(hub.members(&Room::AdminDashboard), vec![b]);
        assert!(!hub.rooms_of(a).contains(&Room::AdminDashboard));
    }
}
