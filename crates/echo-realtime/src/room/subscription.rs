//! Membership tracking: which rooms each connection is in (reverse index).

use std::collections::HashSet;

use dashmap::DashMap;

use echo_core::types::ConnectionId;

use super::types::Room;

/// Tracks connection-to-room memberships.
#[derive(Debug, Default)]
pub struct MembershipIndex {
    /// Connection ID → set of rooms.
    conn_to_rooms: DashMap<ConnectionId, HashSet<Room>>,
}

impl MembershipIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a membership.
    pub fn add(&self, conn_id: ConnectionId, room: Room) {
        self.conn_to_rooms.entry(conn_id).or_default().insert(room);
    }

    /// Removes a membership.
    pub fn remove(&self, conn_id: ConnectionId, room: &Room) {
        if let Some(mut rooms) = self.conn_to_rooms.get_mut(&conn_id) {
            rooms.remove(room);
        }
    }

    /// Rooms a connection is in.
    pub fn rooms_of(&self, conn_id: ConnectionId) -> HashSet<Room> {
        self.conn_to_rooms
            .get(&conn_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Removes and returns every membership of a connection.
    pub fn remove_all(&self, conn_id: ConnectionId) -> HashSet<Room> {
        self.conn_to_rooms
            .remove(&conn_id)
            .map(|(_, rooms)| rooms)
            .unwrap_or_default()
    }
}
