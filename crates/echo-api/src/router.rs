//! Route definitions for the Vocal Echo HTTP API.
//!
//! REST routes are mounted under `/api`; the WebSocket upgrade lives at the
//! configured path (`/ws` by default).

use axum::{Router, routing::get};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, threading `AppState` through
/// `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let ws_path = state.config.realtime.ws_path.clone();

    let api_routes = Router::new().merge(health_routes()).merge(admin_routes());

    Router::new()
        .nest("/api", api_routes)
        .route(&ws_path, get(handlers::ws::ws_upgrade))
        .with_state(state)
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/healthcheck", get(handlers::health::healthcheck))
}

/// Admin presence endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/presence", get(handlers::presence::online_users))
        .route("/admin/presence/{id}", get(handlers::presence::user_presence))
}
