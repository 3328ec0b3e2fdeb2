//! Persistence module
//!
//! SQLite-based storage. Every tenant-owned table goes through the generic
//! scoped store, which applies the active tenant predicate before any other
//! filter; the tenant roster itself is served by [`SqliteTenantDirectory`].

pub mod client_store;
mod codec;
pub mod connection;
pub mod contributor_store;
pub mod invoice_store;
pub mod migrations;
pub mod order_store;
pub mod planning_store;
pub mod project_store;
pub mod scoped;
pub mod task_store;
pub mod tenant_directory;
pub mod timesheet_store;

pub use client_store::SqliteClientStore;
pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use contributor_store::SqliteContributorStore;
pub use invoice_store::SqliteInvoiceStore;
pub use order_store::{SqliteOrderLineStore, SqliteOrderSectionStore, SqliteOrderStore};
pub use planning_store::SqlitePlanningStore;
pub use project_store::SqliteProjectStore;
pub use scoped::{SqliteScopedStore, TenantRecord};
pub use task_store::SqliteTaskStore;
pub use tenant_directory::SqliteTenantDirectory;
pub use timesheet_store::SqliteTimesheetStore;
