//! Presence registry: who is online and which connection serves them.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use echo_core::types::{ConnectionId, Role, UserId};

/// One online user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEntry {
    /// User id.
    pub user_id: UserId,
    /// The latest connection that joined under this user id.
    pub connection_id: ConnectionId,
    /// Role supplied at join.
    pub role: Role,
    /// Join epoch; strictly increases with every registration.
    pub epoch: u64,
    /// When this entry was registered.
    pub joined_at: DateTime<Utc>,
}

/// Result of [`PresenceRegistry::register_connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Epoch of the entry now in place.
    pub epoch: u64,
    /// `false` when the call repeated the current registration exactly.
    pub changed: bool,
    /// The user was offline before this call.
    pub newly_online: bool,
    /// Older connection of the same user that no longer resolves.
    pub superseded: Option<ConnectionId>,
    /// Another user previously bound to this same connection, now offline.
    pub displaced: Option<UserId>,
}

#[derive(Debug, Default)]
struct RegistryState {
    by_user: HashMap<UserId, PresenceEntry>,
    by_connection: HashMap<ConnectionId, UserId>,
    next_epoch: u64,
}

/// Process-wide presence table.
///
/// A user id maps to at most one connection (last join wins). A connection
/// serves at most one user id. Superseded connections lose their reverse
/// index entry, so a late disconnect from them never takes the user
/// offline.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    state: RwLock<RegistryState>,
}

impl PresenceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `user_id` with `connection_id`, replacing any earlier
    /// connection for that user.
    pub fn register_connection(
        &self,
        user_id: UserId,
        connection_id: ConnectionId,
        role: Role,
    ) -> Registration {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

        if let Some(current) = state.by_user.get(&user_id) {
            if current.connection_id == connection_id && current.role == role {
                return Registration {
                    epoch: current.epoch,
                    changed: false,
                    newly_online: false,
                    superseded: None,
                    displaced: None,
                };
            }
        }

        // The connection switches identity: the previous user it served
        // goes offline unless they already moved to another connection.
        let mut displaced = None;
        if let Some(previous_user) = state.by_connection.get(&connection_id).cloned() {
            if previous_user != user_id {
                let still_bound = state
                    .by_user
                    .get(&previous_user)
                    .is_some_and(|e| e.connection_id == connection_id);
                if still_bound {
                    state.by_user.remove(&previous_user);
                    displaced = Some(previous_user);
                }
            }
        }

        state.next_epoch += 1;
        let epoch = state.next_epoch;
        let entry = PresenceEntry {
            user_id: user_id.clone(),
            connection_id,
            role,
            epoch,
            joined_at: Utc::now(),
        };

        let previous = state.by_user.insert(user_id.clone(), entry);
        let superseded = previous
            .as_ref()
            .map(|p| p.connection_id)
            .filter(|old| *old != connection_id);
        if let Some(old) = superseded {
            state.by_connection.remove(&old);
        }
        state.by_connection.insert(connection_id, user_id);

        Registration {
            epoch,
            changed: true,
            newly_online: previous.is_none(),
            superseded,
            displaced,
        }
    }

    /// Removes the entry served by `connection_id`. No-op for unknown or
    /// superseded connections.
    pub fn unregister_connection(&self, connection_id: ConnectionId) -> Option<PresenceEntry> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let user_id = state.by_connection.remove(&connection_id)?;

        let is_current = state
            .by_user
            .get(&user_id)
            .is_some_and(|e| e.connection_id == connection_id);
        if is_current {
            state.by_user.remove(&user_id)
        } else {
            None
        }
    }

    /// Whether the user has a live connection.
    pub fn is_online(&self, user_id: &UserId) -> bool {
        self.read().by_user.contains_key(user_id)
    }

    /// Snapshot of online user ids, sorted.
    pub fn online_user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.read().by_user.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of online users.
    pub fn online_count(&self) -> usize {
        self.read().by_user.len()
    }

    /// The connection currently serving a user.
    pub fn connection_id_for(&self, user_id: &UserId) -> Option<ConnectionId> {
        self.read().by_user.get(user_id).map(|e| e.connection_id)
    }

    /// The user a connection currently serves.
    pub fn user_for_connection(&self, connection_id: ConnectionId) -> Option<UserId> {
        self.read().by_connection.get(&connection_id).cloned()
    }

    /// The role a connection joined with, if it still serves a user.
    pub fn role_of_connection(&self, connection_id: ConnectionId) -> Option<Role> {
        let state = self.read();
        let user_id = state.by_connection.get(&connection_id)?;
        state.by_user.get(user_id).map(|e| e.role)
    }

    /// Full entry for a user.
    pub fn entry(&self, user_id: &UserId) -> Option<PresenceEntry> {
        self.read().by_user.get(user_id).cloned()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::parse(s).unwrap()
    }

    #[test]
    fn test_register_then_unregister() {
        let registry = PresenceRegistry::new();
        let conn = ConnectionId::new();

        let reg = registry.register_connection(uid("u1"), conn, Role::User);
        assert!(reg.changed && reg.newly_online);
        assert!(registry.is_online(&uid("u1")));
        assert_eq!(registry.connection_id_for(&uid("u1")), Some(conn));

        let removed = registry.unregister_connection(conn).unwrap();
        assert_eq!(removed.user_id, uid("u1"));
        assert!(!registry.is_online(&uid("u1")));
    }

    #[test]
    fn test_repeated_identical_registration_is_idempotent() {
        let registry = PresenceRegistry::new();
        let conn = ConnectionId::new();

        let first = registry.register_connection(uid("u1"), conn, Role::Admin);
        let second = registry.register_connection(uid("u1"), conn, Role::Admin);
        assert!(!second.changed);
        assert_eq!(first.epoch, second.epoch);
        assert_eq!(registry.online_count(), 1);
    }

    #[test]
    fn test_rejoin_on_new_connection_supersedes_old() {
        let registry = PresenceRegistry::new();
        let old = ConnectionId::new();
        let new = ConnectionId::new();

        let first = registry.register_connection(uid("u1"), old, Role::User);
        let second = registry.register_connection(uid("u1"), new, Role::User);
        assert_eq!(second.superseded, Some(old));
        assert!(!second.newly_online);
        assert!(second.epoch > first.epoch);
        assert_eq!(registry.connection_id_for(&uid("u1")), Some(new));
        assert_eq!(registry.user_for_connection(old), None);

        // Late disconnect of the superseded connection keeps the user online.
        assert!(registry.unregister_connection(old).is_none());
        assert!(registry.is_online(&uid("u1")));
        assert_eq!(registry.entry(&uid("u1")).map(|e| e.epoch), Some(second.epoch));
    }

    #[test]
    fn test_identity_switch_on_same_connection_displaces_previous_user() {
        let registry = PresenceRegistry::new();
        let conn = ConnectionId::new();

        registry.register_connection(uid("u1"), conn, Role::User);
        let reg = registry.register_connection(uid("u2"), conn, Role::User);
        assert_eq!(reg.displaced, Some(uid("u1")));
        assert_eq!(registry.online_user_ids(), vec![uid("u2")]);

        registry.unregister_connection(conn);
        assert_eq!(registry.online_count(), 0);
    }

    #[test]
    fn test_unregister_twice_is_noop() {
        let registry = PresenceRegistry::new();
        let a = ConnectionId::new();
        let b = ConnectionId::new();
        registry.register_connection(uid("u1"), a, Role::User);
        registry.register_connection(uid("u2"), b, Role::User);

        assert!(registry.unregister_connection(a).is_some());
        let after_first = registry.online_user_ids();
        assert!(registry.unregister_connection(a).is_none());
        assert_eq!(registry.online_user_ids(), after_first);
        assert_eq!(after_first, vec![uid("u2")]);
    }

    #[test]
    fn test_role_lookup_by_connection() {
        let registry = PresenceRegistry::new();
        let conn = ConnectionId::new();
        assert_eq!(registry.role_of_connection(conn), None);

        registry.register_connection(uid("admin"), conn, Role::Admin);
        assert_eq!(registry.role_of_connection(conn), Some(Role::Admin));

        let reg = registry.register_connection(uid("admin"), conn, Role::User);
        assert!(reg.changed);
        assert_eq!(registry.role_of_connection(conn), Some(Role::User));
    }
}
