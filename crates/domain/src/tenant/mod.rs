//! Tenant isolation core: context, ownership contract and resolver
//!
//! - [`TenantContext`] - the tenant in effect for one unit of work
//! - [`TenantOwned`] - the contract every persisted business entity implements
//! - [`derive_owner`] - the parent-to-child ownership rule
//! - [`CrossTenantGrant`] / [`SystemGrant`] - capability types gating the
//!   administrative and system escape hatches

mod context;
mod owned;

pub use context::{CrossTenantGrant, SystemGrant, TenantContext, TenantContextError};
pub use owned::{TenantOwned, derive_owner};
