//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod logging;
pub mod realtime;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::logging::LoggingConfig;
pub use self::realtime::RealtimeConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (`config/default.toml` + environment overlay + `ECHO__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Real-time WebSocket settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment.
    ///
    /// Merges `config/default`, then `config/{env}`, then environment
    /// variables prefixed with `ECHO__` (e.g. `ECHO__SERVER__PORT=8080`).
    /// Missing files are not an error; every field has a default.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ECHO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an inline TOML string (used by tests and
    /// embedded deployments).
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.realtime.ws_path, "/ws");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_overlay_overrides_sections() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 8081

            [realtime]
            outbound_buffer_size = 8

            [logging]
            level = "debug"
            format = "pretty"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.realtime.outbound_buffer_size, 8);
        assert_eq!(config.realtime.max_frame_bytes, 65_536);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_type_is_configuration_error() {
        let err = AppConfig::from_toml("[server]\nport = \"not-a-port\"").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
