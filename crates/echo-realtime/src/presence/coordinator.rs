//! Presence coordinator: drives the per-connection state machine.
//!
//! Every inbound transport event goes through [`PresenceCoordinator::handle`].
//! The registry mutation and the presence broadcast it causes run inside one
//! critical section, so observers see snapshots in mutation order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use echo_core::types::{ConnectionId, Role, UserId};

use crate::connection::state::{Connection, ConnectionState};
use crate::message::types::{InboundMessage, OutboundEvent};
use crate::metrics::EngineMetrics;
use crate::room::{EventBus, Room, RoomRouter};

use super::registry::PresenceRegistry;

/// Inbound transport events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The transport accepted a socket.
    Connect {
        /// New connection.
        connection_id: ConnectionId,
    },
    /// `join` frame. A missing or blank user id leaves the connection
    /// anonymous.
    Join {
        /// Sender.
        connection_id: ConnectionId,
        /// Claimed identity.
        user_id: Option<UserId>,
        /// Claimed role.
        role: Role,
    },
    /// `joinAdminDashboard` frame.
    JoinAdminDashboard {
        /// Sender.
        connection_id: ConnectionId,
    },
    /// `leaveAdminDashboard` frame.
    LeaveAdminDashboard {
        /// Sender.
        connection_id: ConnectionId,
    },
    /// The socket closed.
    Disconnect {
        /// Closed connection.
        connection_id: ConnectionId,
    },
}

impl TransportEvent {
    /// Converts a decoded client frame into a transport event.
    pub fn from_inbound(connection_id: ConnectionId, message: InboundMessage) -> Self {
        match message {
            InboundMessage::Join(payload) => Self::Join {
                connection_id,
                user_id: payload.user_id(),
                role: payload.role(),
            },
            InboundMessage::JoinAdminDashboard => Self::JoinAdminDashboard { connection_id },
            InboundMessage::LeaveAdminDashboard => Self::LeaveAdminDashboard { connection_id },
        }
    }

    /// Connection the event belongs to.
    pub fn connection_id(&self) -> ConnectionId {
        match self {
            Self::Connect { connection_id }
            | Self::Join { connection_id, .. }
            | Self::JoinAdminDashboard { connection_id }
            | Self::LeaveAdminDashboard { connection_id }
            | Self::Disconnect { connection_id } => *connection_id,
        }
    }
}

/// Owns the connection state machine and is the only writer of the
/// presence registry.
#[derive(Debug)]
pub struct PresenceCoordinator {
    registry: Arc<PresenceRegistry>,
    router: RoomRouter,
    bus: Arc<dyn EventBus>,
    connections: Mutex<HashMap<ConnectionId, Connection>>,
    metrics: Arc<EngineMetrics>,
}

impl PresenceCoordinator {
    /// Creates a coordinator.
    pub fn new(
        registry: Arc<PresenceRegistry>,
        bus: Arc<dyn EventBus>,
        metrics: Arc<EngineMetrics>,
    ) -> Self {
        Self {
            router: RoomRouter::new(registry.clone(), bus.clone()),
            registry,
            bus,
            connections: Mutex::new(HashMap::new()),
            metrics,
        }
    }

    /// The registry this coordinator writes to.
    pub fn registry(&self) -> &Arc<PresenceRegistry> {
        &self.registry
    }

    /// Applies one transport event.
    ///
    /// Returns the connection's state afterwards, or `None` when the event
    /// referred to an unknown connection.
    pub fn handle(&self, event: TransportEvent) -> Option<ConnectionState> {
        let mut connections = self.connections.lock().unwrap_or_else(|e| e.into_inner());

        match event {
            TransportEvent::Connect { connection_id } => {
                if let Some(existing) = connections.get(&connection_id) {
                    return Some(existing.state.clone());
                }
                connections.insert(connection_id, Connection::anonymous(connection_id));
                self.metrics.connection_opened();
                debug!(conn_id = %connection_id, "Connection opened");
                Some(ConnectionState::Anonymous)
            }

            TransportEvent::Join {
                connection_id,
                user_id,
                role,
            } => {
                let connection = connections.get_mut(&connection_id)?;
                let Some(user_id) = user_id else {
                    debug!(conn_id = %connection_id, "Join without user id ignored");
                    return Some(connection.state.clone());
                };
                self.join(connection, user_id, role);
                Some(connection.state.clone())
            }

            TransportEvent::JoinAdminDashboard { connection_id } => {
                let connection = connections.get_mut(&connection_id)?;
                if let ConnectionState::Identified {
                    user_id,
                    role: Role::Admin,
                } = &connection.state
                {
                    let user_id = user_id.clone();
                    if self.router.on_dashboard_subscribe(connection_id, &user_id) {
                        // The new viewer needs the current count; the count
                        // itself did not change.
                        self.bus.emit_to_connection(
                            connection_id,
                            &OutboundEvent::OnlineUsersCount(self.registry.online_count()),
                        );
                        info!(conn_id = %connection_id, user_id = %user_id, "Admin dashboard subscribed");
                        connection.state = ConnectionState::DashboardSubscribed { user_id };
                    }
                } else if !matches!(connection.state, ConnectionState::DashboardSubscribed { .. }) {
                    debug!(conn_id = %connection_id, "Dashboard subscription from non-admin ignored");
                }
                Some(connection.state.clone())
            }

            TransportEvent::LeaveAdminDashboard { connection_id } => {
                let connection = connections.get_mut(&connection_id)?;
                if let ConnectionState::DashboardSubscribed { user_id } = &connection.state {
                    let user_id = user_id.clone();
                    self.router.on_dashboard_unsubscribe(connection_id);
                    debug!(conn_id = %connection_id, user_id = %user_id, "Admin dashboard unsubscribed");
                    connection.state = ConnectionState::Identified {
                        user_id,
                        role: Role::Admin,
                    };
                }
                Some(connection.state.clone())
            }

            TransportEvent::Disconnect { connection_id } => {
                connections.remove(&connection_id)?;
                self.metrics.connection_closed();

                if let Some(entry) = self.router.on_disconnect(connection_id) {
                    info!(conn_id = %connection_id, user_id = %entry.user_id, "User went offline");
                    self.broadcast_presence();
                } else {
                    debug!(conn_id = %connection_id, "Disconnect without current presence");
                }
                Some(ConnectionState::Closed)
            }
        }
    }

    /// Current state of a connection.
    pub fn state_of(&self, connection_id: ConnectionId) -> Option<ConnectionState> {
        self.connections
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&connection_id)
            .map(|c| c.state.clone())
    }

    /// Number of open connections, anonymous ones included.
    pub fn connection_count(&self) -> usize {
        self.connections
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    fn join(&self, connection: &mut Connection, user_id: UserId, role: Role) {
        let conn_id = connection.id;

        // Switching to another identity ends the old dashboard subscription.
        if let ConnectionState::DashboardSubscribed { user_id: previous } = &connection.state {
            if *previous != user_id || !role.is_admin() {
                self.router.on_dashboard_unsubscribe(conn_id);
            }
        }

        let registration = self
            .registry
            .register_connection(user_id.clone(), conn_id, role);
        self.metrics.join_recorded();

        let keeps_dashboard = matches!(
            &connection.state,
            ConnectionState::DashboardSubscribed { user_id: previous }
                if *previous == user_id && role.is_admin()
        );
        connection.state = if keeps_dashboard {
            ConnectionState::DashboardSubscribed {
                user_id: user_id.clone(),
            }
        } else {
            ConnectionState::Identified {
                user_id: user_id.clone(),
                role,
            }
        };

        if !registration.changed {
            debug!(conn_id = %conn_id, user_id = %user_id, "Repeated join");
            return;
        }

        self.router.on_user_join(conn_id, &user_id, role);

        if let Some(old) = registration.superseded {
            debug!(conn_id = %conn_id, superseded = %old, user_id = %user_id, "Join superseded older connection");
        }
        if let Some(displaced) = &registration.displaced {
            debug!(conn_id = %conn_id, displaced = %displaced, "Connection switched identity");
        }
        info!(
            conn_id = %conn_id,
            user_id = %user_id,
            role = %role,
            epoch = registration.epoch,
            "User joined"
        );

        self.broadcast_presence();
    }

    /// Sends the online snapshot to `allUsers` and the count to
    /// `adminDashboard`, back to back.
    fn broadcast_presence(&self) {
        let online = self.registry.online_user_ids();
        let count = online.len();
        self.bus
            .emit_to_room(&Room::AllUsers, &OutboundEvent::OnlineUsers(online));
        self.bus
            .emit_to_room(&Room::AdminDashboard, &OutboundEvent::OnlineUsersCount(count));
        self.metrics.presence_broadcast();
    }
}
