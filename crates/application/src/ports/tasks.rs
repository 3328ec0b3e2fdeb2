//! Project task repository port

use async_trait::async_trait;
use domain::tenant::TenantContext;
use domain::{ProjectId, ProjectTask, TaskId};

use crate::error::ApplicationError;
use crate::ports::ScopedRepository;

/// Task-specific query shapes
#[async_trait]
pub trait TaskRepository: ScopedRepository<ProjectTask, Id = TaskId> {
    /// Open tasks of one project
    async fn open_for_project(
        &self,
        ctx: &TenantContext,
        project: ProjectId,
    ) -> Result<Vec<ProjectTask>, ApplicationError>;
}
