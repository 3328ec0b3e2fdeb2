//! Generic tenant-scoped repository port
//!
//! The single sanctioned way application code reads or writes tenant-owned
//! entities. Implementations guarantee that the tenant predicate is applied
//! first and unconditionally on every read, AND-ed with every further
//! filter, and that every write is validated against the context before the
//! storage call.

use async_trait::async_trait;
use domain::TenantOwned;
use domain::tenant::TenantContext;

use crate::error::ApplicationError;

/// Tenant-scoped data access for one entity type
///
/// Contract highlights:
///
/// - `find_by_id` evaluates `id AND tenant` as one atomic predicate. An id
///   that exists under another tenant yields `None`, indistinguishable from
///   an id that does not exist at all. Cross-tenant existence must never
///   leak through differentiated responses.
/// - `insert` rejects an entity whose own tenant does not match the context
///   with [`ApplicationError::IsolationViolation`], even when the caller
///   bypassed the read path and supplied the entity directly.
/// - `update`/`delete` return `false` for absent-or-foreign rows; they
///   never report which of the two it was.
/// - Every method fails with [`ApplicationError::UnboundContext`] when the
///   context has no tenant. There is no default.
#[async_trait]
pub trait ScopedRepository<E: TenantOwned + Send + Sync>: Send + Sync {
    /// The entity's identifier type
    type Id: Copy + Send + Sync;

    /// All entities of this type owned by the context's tenant,
    /// in the entity's default order
    async fn find_all(&self, ctx: &TenantContext) -> Result<Vec<E>, ApplicationError>;

    /// Look up by id and tenant simultaneously
    async fn find_by_id(
        &self,
        ctx: &TenantContext,
        id: Self::Id,
    ) -> Result<Option<E>, ApplicationError>;

    /// Number of entities owned by the context's tenant
    async fn count(&self, ctx: &TenantContext) -> Result<u64, ApplicationError>;

    /// Case-insensitive text search within the context's tenant
    async fn search(&self, ctx: &TenantContext, text: &str) -> Result<Vec<E>, ApplicationError>;

    /// Persist a new entity after validating its tenant against the context
    async fn insert(&self, ctx: &TenantContext, entity: &E) -> Result<(), ApplicationError>;

    /// Update an existing entity; `false` when absent or foreign
    async fn update(&self, ctx: &TenantContext, entity: &E) -> Result<bool, ApplicationError>;

    /// Delete by id; `false` when absent or foreign
    async fn delete(&self, ctx: &TenantContext, id: Self::Id) -> Result<bool, ApplicationError>;
}
