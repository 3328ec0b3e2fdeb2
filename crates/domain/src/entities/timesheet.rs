//! Timesheet entity - one contributor-day of recorded work

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Project;
use crate::tenant::{TenantOwned, derive_owner};
use crate::value_objects::{ContributorId, ProjectId, TenantId, TimesheetId};

/// Minutes worked by one contributor on one project on one day
///
/// Timesheets hang off a project and inherit its tenant at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timesheet {
    id: TimesheetId,
    tenant: TenantId,
    project: ProjectId,
    /// Who worked
    pub contributor: ContributorId,
    /// The day the work happened
    pub day: NaiveDate,
    /// Minutes worked
    pub minutes: u32,
}

impl Timesheet {
    /// Record work under a project, inheriting its tenant
    pub fn new(project: &Project, contributor: ContributorId, day: NaiveDate, minutes: u32) -> Self {
        Self {
            id: TimesheetId::new(),
            tenant: derive_owner(project),
            project: project.id(),
            contributor,
            day,
            minutes,
        }
    }

    /// Rebuild a timesheet from stored state (persistence adapters only)
    pub fn restore(
        id: TimesheetId,
        tenant: TenantId,
        project: ProjectId,
        contributor: ContributorId,
        day: NaiveDate,
        minutes: u32,
    ) -> Self {
        Self {
            id,
            tenant,
            project,
            contributor,
            day,
            minutes,
        }
    }

    pub const fn id(&self) -> TimesheetId {
        self.id
    }

    pub const fn project_id(&self) -> ProjectId {
        self.project
    }
}

impl TenantOwned for Timesheet {
    fn tenant_id(&self) -> TenantId {
        self.tenant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timesheet_inherits_project_tenant() {
        let tenant = TenantId::new();
        let project = Project::new(tenant, "Revamp");
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let sheet = Timesheet::new(&project, ContributorId::new(), day, 420);
        assert_eq!(sheet.tenant_id(), tenant);
        assert_eq!(sheet.minutes, 420);
    }
}
