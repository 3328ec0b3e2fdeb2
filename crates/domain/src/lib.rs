//! Domain layer for the multi-tenant isolation core
//!
//! Contains the tenant model, the TenantOwned contract, the request-scoped
//! tenant context, and all tenant-owned business entities. This layer does
//! no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod tenant;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use tenant::{CrossTenantGrant, SystemGrant, TenantContext, TenantContextError, TenantOwned};
pub use value_objects::*;
