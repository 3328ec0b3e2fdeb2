//! Project record mapping and repository

use application::error::ApplicationError;
use application::ports::ProjectRepository;
use async_trait::async_trait;
use domain::TenantOwned;
use domain::tenant::TenantContext;
use domain::{ClientId, Project, ProjectId, ProjectStatus};
use rusqlite::types::Value;
use rusqlite::{Row, params};
use tokio::task;
use tracing::instrument;

use super::codec::{decode_err, parse_datetime, parse_uuid};
use super::scoped::{SqliteScopedStore, TenantRecord, internal};

/// SQLite-backed project repository
pub type SqliteProjectStore = SqliteScopedStore<Project>;

fn status_from_str(idx: usize, s: &str) -> rusqlite::Result<ProjectStatus> {
    match s {
        "draft" => Ok(ProjectStatus::Draft),
        "active" => Ok(ProjectStatus::Active),
        "on_hold" => Ok(ProjectStatus::OnHold),
        "closed" => Ok(ProjectStatus::Closed),
        other => Err(decode_err(idx, format!("unknown project status: {other}"))),
    }
}

impl TenantRecord for Project {
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] =
        &["id", "tenant_id", "name", "status", "client_id", "created_at"];
    const SEARCH_COLUMN: &'static str = "name";
    const DEFAULT_ORDER: &'static str = "name ASC";

    type Id = ProjectId;

    fn record_id(&self) -> ProjectId {
        self.id()
    }

    fn bind(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id().to_string()),
            Value::Text(self.tenant_id().to_string()),
            Value::Text(self.name.clone()),
            Value::Text(self.status.label().to_string()),
            self.client
                .map_or(Value::Null, |c| Value::Text(c.to_string())),
            Value::Text(self.created_at.to_rfc3339()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let tenant: String = row.get(1)?;
        let name: String = row.get(2)?;
        let status: String = row.get(3)?;
        let client: Option<String> = row.get(4)?;
        let created_at: String = row.get(5)?;

        let client = client
            .map(|c| parse_uuid(4, &c).map(ClientId::from_uuid))
            .transpose()?;

        Ok(Self::restore(
            ProjectId::from_uuid(parse_uuid(0, &id)?),
            parse_uuid(1, &tenant)?.into(),
            name,
            status_from_str(3, &status)?,
            client,
            parse_datetime(5, &created_at)?,
        ))
    }
}

#[async_trait]
impl ProjectRepository for SqliteScopedStore<Project> {
    #[instrument(skip(self, ctx))]
    async fn find_by_status(
        &self,
        ctx: &TenantContext,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();
        let status = status.label();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, name, status, client_id, created_at
                     FROM projects
                     WHERE tenant_id = ?1 AND status = ?2
                     ORDER BY name ASC",
                )
                .map_err(internal)?;
            let rows = stmt
                .query_map(params![tenant.to_string(), status], |row| {
                    Project::from_row(row)
                })
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<Project>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, client))]
    async fn find_for_client(
        &self,
        ctx: &TenantContext,
        client: ClientId,
    ) -> Result<Vec<Project>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, name, status, client_id, created_at
                     FROM projects
                     WHERE tenant_id = ?1 AND client_id = ?2
                     ORDER BY name ASC",
                )
                .map_err(internal)?;
            let rows = stmt
                .query_map(params![tenant.to_string(), client.to_string()], |row| {
                    Project::from_row(row)
                })
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<Project>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }
}
