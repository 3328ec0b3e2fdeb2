//! Tracing subscriber bootstrap
//!
//! Console logging with an `EnvFilter`; `RUST_LOG` overrides the configured
//! filter. Isolation-relevant events (cross-tenant switches, rejected
//! writes) are emitted at warn/error level by the stores and the context.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "infrastructure=debug")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit structured JSON lines instead of human-readable output
    #[serde(default)]
    pub json_output: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json_output: false,
        }
    }
}

/// Error type for telemetry initialization
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Initialize the global tracing subscriber
///
/// Call once at startup; a second call fails because the global subscriber
/// is already set.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_output {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    info!(filter = %config.log_filter, "Telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_filter, "info");
        assert!(!config.json_output);
    }

    #[test]
    fn config_serialization() {
        let config = TelemetryConfig {
            log_filter: "debug".to_string(),
            json_output: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: TelemetryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.log_filter, "debug");
        assert!(parsed.json_output);
    }

    #[test]
    fn json_output_defaults_to_false() {
        let parsed: TelemetryConfig = serde_json::from_str(r#"{"log_filter":"warn"}"#).unwrap();
        assert!(!parsed.json_output);
    }
}
