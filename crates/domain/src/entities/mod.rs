//! Entities - domain objects with identity and lifecycle

mod client;
mod contributor;
mod invoice;
mod order;
mod planning;
mod principal;
mod project;
mod project_task;
mod tenant;
mod timesheet;

pub use client::Client;
pub use contributor::Contributor;
pub use invoice::{Invoice, InvoiceStatus};
pub use order::{Order, OrderLine, OrderSection, OrderStatus};
pub use planning::Planning;
pub use principal::{Principal, Role};
pub use project::{Project, ProjectStatus};
pub use project_task::ProjectTask;
pub use tenant::{CostCoefficients, SubscriptionTier, Tenant, TenantStatus};
pub use timesheet::Timesheet;
