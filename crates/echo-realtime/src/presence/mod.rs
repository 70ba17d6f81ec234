//! User presence: the registry of online users and the coordinator that
//! maintains it.

pub mod coordinator;
pub mod registry;

pub use coordinator::{PresenceCoordinator, TransportEvent};
pub use registry::{PresenceEntry, PresenceRegistry, Registration};
