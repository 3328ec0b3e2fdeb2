//! Timesheet and planning repository ports

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::tenant::TenantContext;
use domain::{ContributorId, Planning, PlanningId, ProjectId, Timesheet, TimesheetId};

use crate::error::ApplicationError;
use crate::ports::ScopedRepository;

/// Timesheet-specific query shapes
#[async_trait]
pub trait TimesheetRepository: ScopedRepository<Timesheet, Id = TimesheetId> {
    /// Entries of the context's tenant within an inclusive day range
    async fn find_between(
        &self,
        ctx: &TenantContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Timesheet>, ApplicationError>;

    /// Total minutes recorded against one project
    async fn minutes_for_project(
        &self,
        ctx: &TenantContext,
        project: ProjectId,
    ) -> Result<u64, ApplicationError>;
}

/// Planning-specific query shapes
#[async_trait]
pub trait PlanningRepository: ScopedRepository<Planning, Id = PlanningId> {
    /// Slots of the context's tenant staffing the given contributor
    async fn find_for_contributor(
        &self,
        ctx: &TenantContext,
        contributor: ContributorId,
    ) -> Result<Vec<Planning>, ApplicationError>;

    /// Slots of the given contributor overlapping an inclusive day range
    async fn overlapping(
        &self,
        ctx: &TenantContext,
        contributor: ContributorId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Planning>, ApplicationError>;
}
