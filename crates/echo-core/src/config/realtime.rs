//! Real-time WebSocket engine configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Bounded outbound queue size per connection. A full queue drops
    /// further messages for that connection.
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer_size: usize,
    /// Maximum accepted inbound text frame, in bytes.
    #[serde(default = "default_max_frame")]
    pub max_frame_bytes: usize,
    /// Route on which the WebSocket upgrade is served.
    #[serde(default = "default_ws_path")]
    pub ws_path: String,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            outbound_buffer_size: default_outbound_buffer(),
            max_frame_bytes: default_max_frame(),
            ws_path: default_ws_path(),
        }
    }
}

fn default_outbound_buffer() -> usize {
    256
}

fn default_max_frame() -> usize {
    65_536
}

fn default_ws_path() -> String {
    "/ws".to_string()
}
