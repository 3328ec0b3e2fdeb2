//! Ports - interfaces implemented by infrastructure adapters

mod billing;
mod orders;
mod projects;
mod scoped;
mod staffing;
mod tasks;
mod tenant_directory;

pub use billing::InvoiceRepository;
pub use orders::OrderRepository;
pub use projects::ProjectRepository;
pub use scoped::ScopedRepository;
pub use staffing::{PlanningRepository, TimesheetRepository};
pub use tasks::TaskRepository;
pub use tenant_directory::TenantDirectory;
