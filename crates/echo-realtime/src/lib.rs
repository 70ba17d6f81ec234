//! # echo-realtime
//!
//! Real-time engine for Vocal Echo. Provides:
//!
//! - A presence registry mapping online users to their live connection
//! - Broadcast rooms (personal, `allUsers`, `adminRoom`, `adminDashboard`)
//!   over an in-memory transport hub
//! - A presence coordinator driving the per-connection state machine
//! - A moderation event emitter turning REST workflow outcomes into
//!   notifications, forced logouts, and admin-dashboard pushes
//! - A notification dispatcher backing real-time delivery with durable records

pub mod connection;
pub mod message;
pub mod metrics;
pub mod moderation;
pub mod notification;
pub mod presence;
pub mod room;
pub mod server;

pub use connection::{ConnectionHandle, ConnectionState};
pub use moderation::ModerationEventEmitter;
pub use notification::NotificationDispatcher;
pub use presence::{PresenceCoordinator, PresenceRegistry, TransportEvent};
pub use room::{EventBus, Room, RoomHub, RoomRouter};
pub use server::RealtimeEngine;
