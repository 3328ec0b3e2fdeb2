//! Application configuration
//!
//! Loaded from an optional `config` file merged with `TENANCY_`-prefixed
//! environment variables, e.g. `TENANCY_DATABASE_PATH`.

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of concurrent database connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Whether to run pending migrations on startup (default: true)
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_db_path() -> String {
    "tenancy.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

pub(crate) const fn default_true() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("TENANCY")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
