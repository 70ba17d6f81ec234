//! Per-connection presence state machine.

use serde::{Deserialize, Serialize};

use echo_core::types::{ConnectionId, Role, UserId};

/// Lifecycle state of a connection as seen by the presence coordinator.
///
/// ```text
/// Anonymous --join--> Identified --joinAdminDashboard (admin)--> DashboardSubscribed
///                         ^                                            |
///                         +-------------- leaveAdminDashboard ---------+
/// any --disconnect--> Closed
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionState {
    /// Connected, no identity bound yet.
    Anonymous,
    /// Joined under a user identity.
    Identified {
        /// Bound user.
        user_id: UserId,
        /// Role supplied at join.
        role: Role,
    },
    /// Admin connection viewing the dashboard.
    DashboardSubscribed {
        /// Bound user (always an admin).
        user_id: UserId,
    },
    /// Terminal.
    Closed,
}

impl ConnectionState {
    /// The bound user, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Identified { user_id, .. } | Self::DashboardSubscribed { user_id } => {
                Some(user_id)
            }
            Self::Anonymous | Self::Closed => None,
        }
    }

    /// The role of the bound user, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Identified { role, .. } => Some(*role),
            Self::DashboardSubscribed { .. } => Some(Role::Admin),
            Self::Anonymous | Self::Closed => None,
        }
    }

    /// Whether the connection completed `join`.
    pub fn is_identified(&self) -> bool {
        self.user_id().is_some()
    }
}

/// A connection tracked by the coordinator.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Transport id.
    pub id: ConnectionId,
    /// Current state.
    pub state: ConnectionState,
}

impl Connection {
    /// New anonymous connection.
    pub fn anonymous(id: ConnectionId) -> Self {
        Self {
            id,
            state: ConnectionState::Anonymous,
        }
    }
}
