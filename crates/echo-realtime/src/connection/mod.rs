//! Connection handles and the per-connection state machine.

pub mod handle;
pub mod state;

pub use handle::ConnectionHandle;
pub use state::{Connection, ConnectionState};
