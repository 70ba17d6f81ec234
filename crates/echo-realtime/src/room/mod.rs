//! Broadcast rooms and the transport they run on.

pub mod bus;
pub mod hub;
pub mod router;
pub mod subscription;
pub mod types;

pub use bus::EventBus;
pub use hub::RoomHub;
pub use router::RoomRouter;
pub use types::Room;
