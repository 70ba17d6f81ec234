//! WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use echo_realtime::message::serializer::serialize_outbound;

use crate::state::AppState;

/// GET /ws: WebSocket upgrade. Connections start anonymous and bind an
/// identity with a `join` frame.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let engine = state.realtime.clone();

    let (handle, mut outbound_rx) = engine.open_connection();
    let conn_id = handle.id;
    let mut shutdown_rx = engine.shutdown_receiver();

    info!(conn_id = %conn_id, "WebSocket connection established");

    // Spawn outbound message forwarder
    let outbound_task = tokio::spawn(async move {
        while let Some(event) = outbound_rx.recv().await {
            let text = match serialize_outbound(&event) {
                Ok(text) => text,
                Err(e) => {
                    warn!(conn_id = %conn_id, event = event.name(), error = %e, "Failed to encode event");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_tx.close().await;
    });

    // Process inbound messages
    loop {
        tokio::select! {
            frame = ws_rx.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Err(e) = engine.handle_frame(conn_id, text.as_str()) {
                        debug!(conn_id = %conn_id, error = %e, "Inbound frame ignored");
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                // Ping/pong is answered by axum; binary frames are not part of the protocol.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            },
            _ = shutdown_rx.recv() => break,
        }
    }

    // Cleanup
    engine.close_connection(conn_id);
    drop(handle);
    outbound_task.abort();

    info!(conn_id = %conn_id, "WebSocket connection closed");
}
