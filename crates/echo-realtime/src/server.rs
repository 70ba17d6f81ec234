//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use echo_core::AppResult;
use echo_core::config::RealtimeConfig;
use echo_core::traits::{NotificationStore, UserStore};
use echo_core::types::ConnectionId;

use crate::connection::{ConnectionHandle, ConnectionState};
use crate::message::serializer::deserialize_inbound;
use crate::message::types::OutboundEvent;
use crate::message::validator::validate_inbound;
use crate::metrics::{EngineMetrics, MetricsSnapshot};
use crate::moderation::ModerationEventEmitter;
use crate::notification::NotificationDispatcher;
use crate::presence::{PresenceCoordinator, PresenceRegistry, TransportEvent};
use crate::room::RoomHub;

/// Central real-time engine that coordinates all WebSocket subsystems.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// Online users.
    pub registry: Arc<PresenceRegistry>,
    /// Connection handles and rooms.
    pub hub: Arc<RoomHub>,
    /// Connection state machine.
    pub coordinator: Arc<PresenceCoordinator>,
    /// Moderation fan-out.
    pub emitter: ModerationEventEmitter,
    /// Metrics collector.
    pub metrics: Arc<EngineMetrics>,
    config: RealtimeConfig,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine")
            .field("connections", &self.hub.connection_count())
            .field("online", &self.registry.online_count())
            .finish()
    }
}

impl RealtimeEngine {
    /// Creates a new real-time engine with all subsystems.
    pub fn new(config: RealtimeConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        let metrics = Arc::new(EngineMetrics::new());
        let registry = Arc::new(PresenceRegistry::new());
        let hub = Arc::new(RoomHub::new());
        let coordinator = Arc::new(PresenceCoordinator::new(
            registry.clone(),
            hub.clone(),
            metrics.clone(),
        ));
        let emitter = ModerationEventEmitter::new(registry.clone(), hub.clone(), metrics.clone());

        info!(
            outbound_buffer = config.outbound_buffer_size,
            max_frame_bytes = config.max_frame_bytes,
            "Real-time engine initialized"
        );

        Self {
            registry,
            hub,
            coordinator,
            emitter,
            metrics,
            config,
            shutdown_tx,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }

    /// Builds a dispatcher that persists notifications before live delivery.
    pub fn notification_dispatcher(
        &self,
        users: Arc<dyn UserStore>,
        store: Arc<dyn NotificationStore>,
    ) -> NotificationDispatcher {
        NotificationDispatcher::new(users, store, self.emitter.clone())
    }

    /// Registers a newly accepted socket. Returns its handle and the
    /// receiver the socket writer must drain.
    pub fn open_connection(&self) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundEvent>) {
        let (handle, rx) = ConnectionHandle::channel(self.config.outbound_buffer_size);
        self.hub.attach(handle.clone());
        self.coordinator.handle(TransportEvent::Connect {
            connection_id: handle.id,
        });
        (handle, rx)
    }

    /// Validates, decodes and applies one inbound text frame.
    pub fn handle_frame(&self, conn_id: ConnectionId, text: &str) -> AppResult<ConnectionState> {
        validate_inbound(text, self.config.max_frame_bytes)?;
        let message = deserialize_inbound(text)?;
        debug!(conn_id = %conn_id, ?message, "Inbound frame");

        Ok(self
            .coordinator
            .handle(TransportEvent::from_inbound(conn_id, message))
            .unwrap_or(ConnectionState::Closed))
    }

    /// Tears down a closed socket: drops its rooms, then runs presence
    /// cleanup.
    pub fn close_connection(&self, conn_id: ConnectionId) -> Option<ConnectionState> {
        if let Some(handle) = self.hub.detach(conn_id) {
            let lifetime = Utc::now() - handle.connected_at;
            debug!(conn_id = %conn_id, seconds = lifetime.num_seconds(), "Connection detached");
        }
        self.coordinator
            .handle(TransportEvent::Disconnect {
                connection_id: conn_id,
            })
    }

    /// Metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Returns a shutdown receiver for graceful shutdown coordination.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Initiates a graceful shutdown of the real-time engine.
    pub async fn shutdown(&self) -> AppResult<()> {
        info!("Shutting down real-time engine");

        // Signal socket tasks to stop
        let _ = self.shutdown_tx.send(());

        let closed = self
            .hub
            .connection_ids()
            .into_iter()
            .filter(|id| self.close_connection(*id).is_some())
            .count();

        info!(closed, "Real-time engine shut down");
        Ok(())
    }
}
