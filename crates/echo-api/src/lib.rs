//! # echo-api
//!
//! HTTP layer for Vocal Echo built on Axum.
//!
//! Serves the real-time WebSocket endpoint, the liveness probe, and the
//! admin presence read API, with CORS and request tracing middleware.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
