//! Infrastructure layer - SQLite adapters for the application ports
//!
//! Implements the repository ports defined in the application layer on top
//! of a pooled SQLite database, plus configuration loading and tracing
//! bootstrap.

pub mod config;
pub mod persistence;
pub mod telemetry;

pub use config::{AppConfig, DatabaseConfig};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteClientStore, SqliteContributorStore, SqliteInvoiceStore,
    SqliteOrderLineStore, SqliteOrderSectionStore, SqliteOrderStore, SqlitePlanningStore,
    SqliteProjectStore, SqliteScopedStore, SqliteTaskStore, SqliteTenantDirectory,
    SqliteTimesheetStore, TenantRecord, create_pool,
};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
