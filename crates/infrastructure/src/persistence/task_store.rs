//! Project task record mapping and repository

use application::error::ApplicationError;
use application::ports::TaskRepository;
use async_trait::async_trait;
use domain::TenantOwned;
use domain::tenant::TenantContext;
use domain::{ProjectId, ProjectTask, TaskId};
use rusqlite::types::Value;
use rusqlite::{Row, params};
use tokio::task;
use tracing::instrument;

use super::codec::parse_uuid;
use super::scoped::{SqliteScopedStore, TenantRecord, internal};

/// SQLite-backed task repository
pub type SqliteTaskStore = SqliteScopedStore<ProjectTask>;

impl TenantRecord for ProjectTask {
    const TABLE: &'static str = "project_tasks";
    const COLUMNS: &'static [&'static str] = &["id", "tenant_id", "project_id", "title", "done"];
    const SEARCH_COLUMN: &'static str = "title";
    const DEFAULT_ORDER: &'static str = "title ASC";

    type Id = TaskId;

    fn record_id(&self) -> TaskId {
        self.id()
    }

    fn bind(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id().to_string()),
            Value::Text(self.tenant_id().to_string()),
            Value::Text(self.project_id().to_string()),
            Value::Text(self.title.clone()),
            Value::Integer(i64::from(self.done)),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let tenant: String = row.get(1)?;
        let project: String = row.get(2)?;
        let title: String = row.get(3)?;
        let done: bool = row.get(4)?;

        Ok(Self::restore(
            TaskId::from_uuid(parse_uuid(0, &id)?),
            parse_uuid(1, &tenant)?.into(),
            ProjectId::from_uuid(parse_uuid(2, &project)?),
            title,
            done,
        ))
    }
}

#[async_trait]
impl TaskRepository for SqliteScopedStore<ProjectTask> {
    #[instrument(skip(self, ctx, project))]
    async fn open_for_project(
        &self,
        ctx: &TenantContext,
        project: ProjectId,
    ) -> Result<Vec<ProjectTask>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, project_id, title, done
                     FROM project_tasks
                     WHERE tenant_id = ?1 AND project_id = ?2 AND done = 0
                     ORDER BY title ASC",
                )
                .map_err(internal)?;
            let rows = stmt
                .query_map(params![tenant.to_string(), project.to_string()], |row| {
                    ProjectTask::from_row(row)
                })
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<ProjectTask>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }
}
