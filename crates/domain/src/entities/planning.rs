//! Planning entity - a staffing slot for a contributor on a project

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Project;
use crate::errors::DomainError;
use crate::tenant::{TenantOwned, derive_owner};
use crate::value_objects::{ContributorId, PlanningId, ProjectId, TenantId};

/// A contributor staffed on a project over a day range
///
/// Plannings hang off a project and inherit its tenant at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planning {
    id: PlanningId,
    tenant: TenantId,
    project: ProjectId,
    /// Who is staffed
    pub contributor: ContributorId,
    /// First staffed day (inclusive)
    pub start_day: NaiveDate,
    /// Last staffed day (inclusive)
    pub end_day: NaiveDate,
}

impl Planning {
    /// Staff a contributor on a project, inheriting the project's tenant
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidPeriod`] when `start_day > end_day`.
    pub fn new(
        project: &Project,
        contributor: ContributorId,
        start_day: NaiveDate,
        end_day: NaiveDate,
    ) -> Result<Self, DomainError> {
        if start_day > end_day {
            return Err(DomainError::InvalidPeriod {
                start: start_day.to_string(),
                end: end_day.to_string(),
            });
        }
        Ok(Self {
            id: PlanningId::new(),
            tenant: derive_owner(project),
            project: project.id(),
            contributor,
            start_day,
            end_day,
        })
    }

    /// Rebuild a planning from stored state (persistence adapters only)
    pub fn restore(
        id: PlanningId,
        tenant: TenantId,
        project: ProjectId,
        contributor: ContributorId,
        start_day: NaiveDate,
        end_day: NaiveDate,
    ) -> Self {
        Self {
            id,
            tenant,
            project,
            contributor,
            start_day,
            end_day,
        }
    }

    pub const fn id(&self) -> PlanningId {
        self.id
    }

    pub const fn project_id(&self) -> ProjectId {
        self.project
    }

    /// Whether this slot overlaps the given inclusive day range
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_day <= to && self.end_day >= from
    }
}

impl TenantOwned for Planning {
    fn tenant_id(&self) -> TenantId {
        self.tenant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn planning_inherits_project_tenant() {
        let tenant = TenantId::new();
        let project = Project::new(tenant, "Revamp");
        let slot = Planning::new(&project, ContributorId::new(), day(1), day(10)).unwrap();
        assert_eq!(slot.tenant_id(), tenant);
    }

    #[test]
    fn rejects_inverted_range() {
        let project = Project::new(TenantId::new(), "Revamp");
        let result = Planning::new(&project, ContributorId::new(), day(10), day(1));
        assert!(result.is_err());
    }

    #[test]
    fn overlap_detection() {
        let project = Project::new(TenantId::new(), "Revamp");
        let slot = Planning::new(&project, ContributorId::new(), day(5), day(10)).unwrap();
        assert!(slot.overlaps(day(1), day(5)));
        assert!(slot.overlaps(day(10), day(20)));
        assert!(!slot.overlaps(day(11), day(20)));
        assert!(!slot.overlaps(day(1), day(4)));
    }
}
