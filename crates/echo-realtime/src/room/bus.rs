//! Publish/subscribe transport contract.

use echo_core::types::ConnectionId;

use crate::message::types::OutboundEvent;

use super::types::Room;

/// Room-based publish/subscribe transport.
///
/// All methods are synchronous and non-blocking so they can run inside the
/// coordinator's critical section. Delivery is best-effort.
pub trait EventBus: Send + Sync + std::fmt::Debug {
    /// Add a connection to a room. Unknown connections are ignored.
    fn join(&self, conn_id: ConnectionId, room: &Room);

    /// Remove a connection from a room.
    fn leave(&self, conn_id: ConnectionId, room: &Room);

    /// Send an event to every member of a room. Returns how many
    /// connections accepted it.
    fn emit_to_room(&self, room: &Room, event: &OutboundEvent) -> usize;

    /// Send an event to a single connection.
    fn emit_to_connection(&self, conn_id: ConnectionId, event: &OutboundEvent) -> bool;

    /// Number of connections in a room.
    fn room_size(&self, room: &Room) -> usize;

    /// Whether a connection is in a room.
    fn is_member(&self, conn_id: ConnectionId, room: &Room) -> bool;
}
