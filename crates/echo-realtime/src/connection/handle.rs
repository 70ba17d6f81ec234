//! Individual WebSocket connection handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use echo_core::types::ConnectionId;

use crate::message::types::OutboundEvent;

/// A handle to a single live connection.
///
/// Holds the bounded sender feeding the socket writer task.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// When the transport accepted the connection
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<OutboundEvent>,
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a handle around an existing sender.
    pub fn new(id: ConnectionId, sender: mpsc::Sender<OutboundEvent>) -> Self {
        Self {
            id,
            connected_at: Utc::now(),
            sender,
            alive: AtomicBool::new(true),
        }
    }

    /// Create a handle with a fresh id and bounded queue, returning the
    /// receiver the socket writer drains.
    pub fn channel(buffer: usize) -> (Arc<Self>, mpsc::Receiver<OutboundEvent>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Arc::new(Self::new(ConnectionId::new(), tx)), rx)
    }

    /// Queue an event for this connection without waiting.
    ///
    /// Returns `false` if the connection is closed or its queue is full.
    pub fn send(&self, event: OutboundEvent) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!(
                    conn_id = %self.id,
                    event = event.name(),
                    "Connection send buffer full, dropping message"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    /// Check if connection is alive
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark connection as closed
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
