//! Planning record mapping and repository

use application::error::ApplicationError;
use application::ports::PlanningRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::TenantOwned;
use domain::tenant::TenantContext;
use domain::{ContributorId, Planning, PlanningId, ProjectId};
use rusqlite::types::Value;
use rusqlite::{Row, params};
use tokio::task;
use tracing::instrument;

use super::codec::{parse_day, parse_uuid};
use super::scoped::{SqliteScopedStore, TenantRecord, internal};

/// SQLite-backed planning repository
pub type SqlitePlanningStore = SqliteScopedStore<Planning>;

impl TenantRecord for Planning {
    const TABLE: &'static str = "plannings";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "tenant_id",
        "project_id",
        "contributor_id",
        "start_day",
        "end_day",
    ];
    const SEARCH_COLUMN: &'static str = "start_day";
    const DEFAULT_ORDER: &'static str = "start_day ASC";

    type Id = PlanningId;

    fn record_id(&self) -> PlanningId {
        self.id()
    }

    fn bind(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id().to_string()),
            Value::Text(self.tenant_id().to_string()),
            Value::Text(self.project_id().to_string()),
            Value::Text(self.contributor.to_string()),
            Value::Text(self.start_day.to_string()),
            Value::Text(self.end_day.to_string()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let tenant: String = row.get(1)?;
        let project: String = row.get(2)?;
        let contributor: String = row.get(3)?;
        let start_day: String = row.get(4)?;
        let end_day: String = row.get(5)?;

        Ok(Self::restore(
            PlanningId::from_uuid(parse_uuid(0, &id)?),
            parse_uuid(1, &tenant)?.into(),
            ProjectId::from_uuid(parse_uuid(2, &project)?),
            ContributorId::from_uuid(parse_uuid(3, &contributor)?),
            parse_day(4, &start_day)?,
            parse_day(5, &end_day)?,
        ))
    }
}

#[async_trait]
impl PlanningRepository for SqliteScopedStore<Planning> {
    #[instrument(skip(self, ctx, contributor))]
    async fn find_for_contributor(
        &self,
        ctx: &TenantContext,
        contributor: ContributorId,
    ) -> Result<Vec<Planning>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, project_id, contributor_id, start_day, end_day
                     FROM plannings
                     WHERE tenant_id = ?1 AND contributor_id = ?2
                     ORDER BY start_day ASC",
                )
                .map_err(internal)?;
            let rows = stmt
                .query_map(
                    params![tenant.to_string(), contributor.to_string()],
                    |row| Planning::from_row(row),
                )
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<Planning>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, contributor))]
    async fn overlapping(
        &self,
        ctx: &TenantContext,
        contributor: ContributorId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Planning>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, project_id, contributor_id, start_day, end_day
                     FROM plannings
                     WHERE tenant_id = ?1 AND contributor_id = ?2
                       AND start_day <= ?4 AND end_day >= ?3
                     ORDER BY start_day ASC",
                )
                .map_err(internal)?;
            let rows = stmt
                .query_map(
                    params![
                        tenant.to_string(),
                        contributor.to_string(),
                        from.to_string(),
                        to.to_string()
                    ],
                    |row| Planning::from_row(row),
                )
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<Planning>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }
}
