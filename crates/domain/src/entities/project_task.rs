//! Project task entity

use serde::{Deserialize, Serialize};

use crate::entities::Project;
use crate::tenant::{TenantOwned, derive_owner};
use crate::value_objects::{ProjectId, TaskId, TenantId};

/// A unit of work within a project
///
/// A task's tenant is always its project's tenant, derived at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTask {
    id: TaskId,
    tenant: TenantId,
    project: ProjectId,
    /// Task title
    pub title: String,
    /// Completion flag
    pub done: bool,
}

impl ProjectTask {
    /// Create a new open task under a project, inheriting its tenant
    pub fn new(project: &Project, title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            tenant: derive_owner(project),
            project: project.id(),
            title: title.into(),
            done: false,
        }
    }

    /// Rebuild a task from stored state (persistence adapters only)
    pub fn restore(
        id: TaskId,
        tenant: TenantId,
        project: ProjectId,
        title: String,
        done: bool,
    ) -> Self {
        Self {
            id,
            tenant,
            project,
            title,
            done,
        }
    }

    pub const fn id(&self) -> TaskId {
        self.id
    }

    pub const fn project_id(&self) -> ProjectId {
        self.project
    }
}

impl TenantOwned for ProjectTask {
    fn tenant_id(&self) -> TenantId {
        self.tenant
    }
}
