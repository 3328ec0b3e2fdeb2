//! Timesheet record mapping and repository
//!
//! Days are stored as ISO-8601 text, so lexicographic BETWEEN matches
//! chronological order and the composite `(tenant_id, day)` index serves
//! range scans.

use application::error::ApplicationError;
use application::ports::TimesheetRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::TenantOwned;
use domain::tenant::TenantContext;
use domain::{ContributorId, ProjectId, Timesheet, TimesheetId};
use rusqlite::types::Value;
use rusqlite::{Row, params};
use tokio::task;
use tracing::instrument;

use super::codec::{decode_err, parse_day, parse_uuid};
use super::scoped::{SqliteScopedStore, TenantRecord, internal};

/// SQLite-backed timesheet repository
pub type SqliteTimesheetStore = SqliteScopedStore<Timesheet>;

impl TenantRecord for Timesheet {
    const TABLE: &'static str = "timesheets";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "tenant_id",
        "project_id",
        "contributor_id",
        "day",
        "minutes",
    ];
    const SEARCH_COLUMN: &'static str = "day";
    const DEFAULT_ORDER: &'static str = "day ASC";

    type Id = TimesheetId;

    fn record_id(&self) -> TimesheetId {
        self.id()
    }

    fn bind(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id().to_string()),
            Value::Text(self.tenant_id().to_string()),
            Value::Text(self.project_id().to_string()),
            Value::Text(self.contributor.to_string()),
            Value::Text(self.day.to_string()),
            Value::Integer(i64::from(self.minutes)),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let tenant: String = row.get(1)?;
        let project: String = row.get(2)?;
        let contributor: String = row.get(3)?;
        let day: String = row.get(4)?;
        let minutes: i64 = row.get(5)?;

        Ok(Self::restore(
            TimesheetId::from_uuid(parse_uuid(0, &id)?),
            parse_uuid(1, &tenant)?.into(),
            ProjectId::from_uuid(parse_uuid(2, &project)?),
            ContributorId::from_uuid(parse_uuid(3, &contributor)?),
            parse_day(4, &day)?,
            u32::try_from(minutes).map_err(|e| decode_err(5, format!("minutes: {e}")))?,
        ))
    }
}

#[async_trait]
impl TimesheetRepository for SqliteScopedStore<Timesheet> {
    #[instrument(skip(self, ctx))]
    async fn find_between(
        &self,
        ctx: &TenantContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Timesheet>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, project_id, contributor_id, day, minutes
                     FROM timesheets
                     WHERE tenant_id = ?1 AND day BETWEEN ?2 AND ?3
                     ORDER BY day ASC",
                )
                .map_err(internal)?;
            let rows = stmt
                .query_map(
                    params![tenant.to_string(), from.to_string(), to.to_string()],
                    |row| Timesheet::from_row(row),
                )
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<Timesheet>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, project))]
    async fn minutes_for_project(
        &self,
        ctx: &TenantContext,
        project: ProjectId,
    ) -> Result<u64, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let total: i64 = conn
                .query_row(
                    "SELECT COALESCE(SUM(minutes), 0)
                     FROM timesheets
                     WHERE tenant_id = ?1 AND project_id = ?2",
                    params![tenant.to_string(), project.to_string()],
                    |row| row.get(0),
                )
                .map_err(internal)?;
            u64::try_from(total).map_err(internal)
        })
        .await
        .map_err(internal)?
    }
}
