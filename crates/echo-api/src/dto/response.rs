//! Response DTOs.

use serde::{Deserialize, Serialize};

use echo_core::types::UserId;
use echo_realtime::metrics::MetricsSnapshot;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `"ok"` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Open WebSocket connections, anonymous ones included.
    pub connections: usize,
    /// Online users.
    pub online_users: usize,
    /// Engine counters.
    pub metrics: MetricsSnapshot,
}

/// Who is online right now.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceResponse {
    /// Online user ids, sorted.
    pub online_users: Vec<UserId>,
    /// Number of online users.
    pub count: usize,
}
