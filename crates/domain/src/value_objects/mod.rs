//! Value Objects - Immutable, identity-less domain primitives

mod billing_anchor_day;
mod currency;
mod email_address;
mod ids;
mod slug;
mod tenant_id;

pub use billing_anchor_day::BillingAnchorDay;
pub use currency::Currency;
pub use email_address::EmailAddress;
pub use ids::{
    ClientId, ContributorId, InvoiceId, OrderId, OrderLineId, OrderSectionId, PlanningId,
    PrincipalId, ProjectId, TaskId, TimesheetId,
};
pub use slug::Slug;
pub use tenant_id::TenantId;
