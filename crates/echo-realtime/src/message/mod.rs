//! WebSocket message types, serialization, and validation.

pub mod builder;
pub mod serializer;
pub mod types;
pub mod validator;

pub use builder::NotificationBuilder;
pub use types::{InboundMessage, JoinPayload, NotificationPayload, OutboundEvent};
