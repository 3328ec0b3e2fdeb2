//! Project repository port

use async_trait::async_trait;
use domain::tenant::TenantContext;
use domain::{ClientId, Project, ProjectId, ProjectStatus};

use crate::error::ApplicationError;
use crate::ports::ScopedRepository;

/// Project-specific query shapes on top of the generic scoped port
///
/// Every additional filter is AND-ed onto the tenant predicate, never a
/// replacement for it.
#[async_trait]
pub trait ProjectRepository: ScopedRepository<Project, Id = ProjectId> {
    /// Projects of the context's tenant in the given status
    async fn find_by_status(
        &self,
        ctx: &TenantContext,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, ApplicationError>;

    /// Projects of the context's tenant delivered for the given client
    async fn find_for_client(
        &self,
        ctx: &TenantContext,
        client: ClientId,
    ) -> Result<Vec<Project>, ApplicationError>;
}
