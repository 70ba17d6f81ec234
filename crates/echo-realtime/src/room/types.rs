//! Broadcast room identifiers.

use std::fmt;

use echo_core::types::UserId;

/// A named broadcast group a connection can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Room {
    /// Personal room keyed by user id.
    Personal(UserId),
    /// Every identified connection.
    AllUsers,
    /// Every connected admin.
    AdminRoom,
    /// Admins currently viewing the dashboard.
    AdminDashboard,
}

impl Room {
    /// Room name as exposed to clients and logs. Personal rooms are named
    /// after the bare user id.
    pub fn name(&self) -> &str {
        match self {
            Room::Personal(user_id) => user_id.as_str(),
            Room::AllUsers => "allUsers",
            Room::AdminRoom => "adminRoom",
            Room::AdminDashboard => "adminDashboard",
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
