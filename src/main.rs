//! Vocal Echo Server: real-time presence and moderation fan-out
//!
//! Main entry point: loads configuration, initialises logging, and serves
//! the HTTP/WebSocket gateway.

use tracing_subscriber::{EnvFilter, fmt};

use echo_core::config::AppConfig;
use echo_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Starting Vocal Echo v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = echo_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default`, the `ECHO_ENV` overlay, then `ECHO__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ECHO_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
