//! Project entity - the anchor of most tenant-owned children
//!
//! Orders, tasks, timesheets, plannings and invoices all hang off a
//! project and inherit its tenant at construction time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tenant::TenantOwned;
use crate::value_objects::{ClientId, ProjectId, TenantId};

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Active,
    OnHold,
    Closed,
}

impl ProjectStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A delivery project owned by one tenant
///
/// Projects are root entities: the tenant is an explicit constructor
/// parameter (callers pass `ctx.current()?`), and there is no mutator.
///
/// # Examples
///
/// ```
/// use domain::tenant::TenantOwned;
/// use domain::{Project, TenantId};
///
/// let tenant = TenantId::new();
/// let project = Project::new(tenant, "Website revamp");
/// assert_eq!(project.tenant_id(), tenant);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    tenant: TenantId,
    /// Project name
    pub name: String,
    /// Current lifecycle status
    pub status: ProjectStatus,
    /// The client this project is delivered for, once assigned
    pub client: Option<ClientId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new draft project under the given tenant
    pub fn new(tenant: TenantId, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            tenant,
            name: name.into(),
            status: ProjectStatus::Draft,
            client: None,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a project from stored state (persistence adapters only)
    pub fn restore(
        id: ProjectId,
        tenant: TenantId,
        name: String,
        status: ProjectStatus,
        client: Option<ClientId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            tenant,
            name,
            status,
            client,
            created_at,
        }
    }

    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Assign the client this project is delivered for
    #[must_use]
    pub const fn for_client(mut self, client: ClientId) -> Self {
        self.client = Some(client);
        self
    }

    /// Move the project to active
    #[must_use]
    pub const fn activated(mut self) -> Self {
        self.status = ProjectStatus::Active;
        self
    }
}

impl TenantOwned for Project {
    fn tenant_id(&self) -> TenantId {
        self.tenant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_starts_as_draft() {
        let project = Project::new(TenantId::new(), "Revamp");
        assert_eq!(project.status, ProjectStatus::Draft);
        assert!(project.client.is_none());
    }

    #[test]
    fn project_belongs_to_construction_tenant() {
        let tenant = TenantId::new();
        let project = Project::new(tenant, "Revamp");
        assert!(project.belongs_to(tenant));
        assert!(!project.belongs_to(TenantId::new()));
    }
}
