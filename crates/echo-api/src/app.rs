//! Application builder: wires router, middleware and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use echo_core::config::AppConfig;
use echo_core::error::AppError;
use echo_realtime::RealtimeEngine;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Runs the Vocal Echo server until Ctrl-C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Vocal Echo server...");

    let realtime = Arc::new(RealtimeEngine::new(config.realtime.clone()));
    let addr = config.server.bind_address();
    let app = build_app(AppState::new(config, realtime.clone()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "Vocal Echo server listening");

    // Engine shutdown ends every WebSocket task.
    let engine = realtime.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            if let Err(e) = engine.shutdown().await {
                tracing::error!(error = %e, "Real-time engine shutdown failed");
            }
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Vocal Echo server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
