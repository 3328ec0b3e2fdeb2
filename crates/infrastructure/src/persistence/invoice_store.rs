//! Invoice record mapping and repository

use application::error::ApplicationError;
use application::ports::InvoiceRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::TenantOwned;
use domain::tenant::TenantContext;
use domain::{Invoice, InvoiceId, InvoiceStatus, ProjectId};
use rusqlite::types::Value;
use rusqlite::{Row, params};
use tokio::task;
use tracing::instrument;

use super::codec::{decode_err, parse_day, parse_uuid};
use super::scoped::{SqliteScopedStore, TenantRecord, internal};

/// SQLite-backed invoice repository
pub type SqliteInvoiceStore = SqliteScopedStore<Invoice>;

fn status_from_str(idx: usize, s: &str) -> rusqlite::Result<InvoiceStatus> {
    match s {
        "draft" => Ok(InvoiceStatus::Draft),
        "issued" => Ok(InvoiceStatus::Issued),
        "paid" => Ok(InvoiceStatus::Paid),
        other => Err(decode_err(idx, format!("unknown invoice status: {other}"))),
    }
}

impl TenantRecord for Invoice {
    const TABLE: &'static str = "invoices";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "tenant_id",
        "project_id",
        "number",
        "issued_on",
        "total_cents",
        "status",
    ];
    const SEARCH_COLUMN: &'static str = "number";
    const DEFAULT_ORDER: &'static str = "issued_on ASC";

    type Id = InvoiceId;

    fn record_id(&self) -> InvoiceId {
        self.id()
    }

    fn bind(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id().to_string()),
            Value::Text(self.tenant_id().to_string()),
            Value::Text(self.project_id().to_string()),
            Value::Text(self.number.clone()),
            Value::Text(self.issued_on.to_string()),
            Value::Integer(self.total_cents),
            Value::Text(self.status.label().to_string()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let tenant: String = row.get(1)?;
        let project: String = row.get(2)?;
        let number: String = row.get(3)?;
        let issued_on: String = row.get(4)?;
        let total_cents: i64 = row.get(5)?;
        let status: String = row.get(6)?;

        Ok(Self::restore(
            InvoiceId::from_uuid(parse_uuid(0, &id)?),
            parse_uuid(1, &tenant)?.into(),
            ProjectId::from_uuid(parse_uuid(2, &project)?),
            number,
            parse_day(4, &issued_on)?,
            total_cents,
            status_from_str(6, &status)?,
        ))
    }
}

#[async_trait]
impl InvoiceRepository for SqliteScopedStore<Invoice> {
    #[instrument(skip(self, ctx))]
    async fn find_issued_between(
        &self,
        ctx: &TenantContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Invoice>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, project_id, number, issued_on, total_cents, status
                     FROM invoices
                     WHERE tenant_id = ?1
                       AND status IN ('issued', 'paid')
                       AND issued_on BETWEEN ?2 AND ?3
                     ORDER BY issued_on ASC",
                )
                .map_err(internal)?;
            let rows = stmt
                .query_map(
                    params![tenant.to_string(), from.to_string(), to.to_string()],
                    |row| Invoice::from_row(row),
                )
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<Invoice>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx))]
    async fn revenue_cents_between(
        &self,
        ctx: &TenantContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            conn.query_row(
                "SELECT COALESCE(SUM(total_cents), 0)
                 FROM invoices
                 WHERE tenant_id = ?1
                   AND status IN ('issued', 'paid')
                   AND issued_on BETWEEN ?2 AND ?3",
                params![tenant.to_string(), from.to_string(), to.to_string()],
                |row| row.get(0),
            )
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }
}
