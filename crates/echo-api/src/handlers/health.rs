//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/healthcheck
pub async fn healthcheck(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let engine = &state.realtime;

    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        connections: engine.hub.connection_count(),
        online_users: engine.registry.online_count(),
        metrics: engine.metrics_snapshot(),
    }))
}
