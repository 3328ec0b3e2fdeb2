//! Tenant directory port
//!
//! The tenants table is the one table that is not itself tenant-owned.
//! This port serves tenant onboarding, switch-target resolution, and the
//! per-tenant iteration performed by system jobs.

use async_trait::async_trait;
use domain::{Slug, Tenant, TenantId};

use crate::error::ApplicationError;

/// Access to the tenant roster
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Register a new tenant (onboarding)
    async fn create(&self, tenant: &Tenant) -> Result<(), ApplicationError>;

    /// Look up a tenant by id
    async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, ApplicationError>;

    /// Look up a tenant by its unique slug
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Tenant>, ApplicationError>;

    /// All tenants a unit of work may bind to, ordered by name
    async fn list_operational(&self) -> Result<Vec<Tenant>, ApplicationError>;
}
