//! Order book record mappings and repository
//!
//! Orders, sections and lines each get their own scoped store; the
//! order-total aggregate joins all three tables with the tenant predicate
//! applied to every one of them, so a section id colliding across tenants
//! can never pull a foreign line into the sum.

use application::error::ApplicationError;
use application::ports::OrderRepository;
use async_trait::async_trait;
use domain::TenantOwned;
use domain::tenant::TenantContext;
use domain::{Order, OrderId, OrderLine, OrderLineId, OrderSection, OrderSectionId, OrderStatus, ProjectId};
use rusqlite::types::Value;
use rusqlite::{Row, params};
use tokio::task;
use tracing::instrument;

use super::codec::{decode_err, parse_uuid};
use super::scoped::{SqliteScopedStore, TenantRecord, internal};

/// SQLite-backed order repository
pub type SqliteOrderStore = SqliteScopedStore<Order>;
/// SQLite-backed order section repository (generic scoped operations only)
pub type SqliteOrderSectionStore = SqliteScopedStore<OrderSection>;
/// SQLite-backed order line repository (generic scoped operations only)
pub type SqliteOrderLineStore = SqliteScopedStore<OrderLine>;

fn status_from_str(idx: usize, s: &str) -> rusqlite::Result<OrderStatus> {
    match s {
        "draft" => Ok(OrderStatus::Draft),
        "signed" => Ok(OrderStatus::Signed),
        "cancelled" => Ok(OrderStatus::Cancelled),
        other => Err(decode_err(idx, format!("unknown order status: {other}"))),
    }
}

const fn status_to_str(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Draft => "draft",
        OrderStatus::Signed => "signed",
        OrderStatus::Cancelled => "cancelled",
    }
}

impl TenantRecord for Order {
    const TABLE: &'static str = "orders";
    const COLUMNS: &'static [&'static str] =
        &["id", "tenant_id", "project_id", "reference", "status"];
    const SEARCH_COLUMN: &'static str = "reference";
    const DEFAULT_ORDER: &'static str = "reference ASC";

    type Id = OrderId;

    fn record_id(&self) -> OrderId {
        self.id()
    }

    fn bind(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id().to_string()),
            Value::Text(self.tenant_id().to_string()),
            Value::Text(self.project_id().to_string()),
            Value::Text(self.reference.clone()),
            Value::Text(status_to_str(self.status).to_string()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let tenant: String = row.get(1)?;
        let project: String = row.get(2)?;
        let reference: String = row.get(3)?;
        let status: String = row.get(4)?;

        Ok(Self::restore(
            OrderId::from_uuid(parse_uuid(0, &id)?),
            parse_uuid(1, &tenant)?.into(),
            ProjectId::from_uuid(parse_uuid(2, &project)?),
            reference,
            status_from_str(4, &status)?,
        ))
    }
}

impl TenantRecord for OrderSection {
    const TABLE: &'static str = "order_sections";
    const COLUMNS: &'static [&'static str] = &["id", "tenant_id", "order_id", "title", "position"];
    const SEARCH_COLUMN: &'static str = "title";
    const DEFAULT_ORDER: &'static str = "position ASC";

    type Id = OrderSectionId;

    fn record_id(&self) -> OrderSectionId {
        self.id()
    }

    fn bind(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id().to_string()),
            Value::Text(self.tenant_id().to_string()),
            Value::Text(self.order_id().to_string()),
            Value::Text(self.title.clone()),
            Value::Integer(i64::from(self.position)),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let tenant: String = row.get(1)?;
        let order: String = row.get(2)?;
        let title: String = row.get(3)?;
        let position: i64 = row.get(4)?;

        Ok(Self::restore(
            OrderSectionId::from_uuid(parse_uuid(0, &id)?),
            parse_uuid(1, &tenant)?.into(),
            OrderId::from_uuid(parse_uuid(2, &order)?),
            title,
            u32::try_from(position).map_err(|e| decode_err(4, format!("position: {e}")))?,
        ))
    }
}

impl TenantRecord for OrderLine {
    const TABLE: &'static str = "order_lines";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "tenant_id",
        "section_id",
        "label",
        "quantity",
        "unit_price_cents",
    ];
    const SEARCH_COLUMN: &'static str = "label";
    const DEFAULT_ORDER: &'static str = "label ASC";

    type Id = OrderLineId;

    fn record_id(&self) -> OrderLineId {
        self.id()
    }

    fn bind(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id().to_string()),
            Value::Text(self.tenant_id().to_string()),
            Value::Text(self.section_id().to_string()),
            Value::Text(self.label.clone()),
            Value::Integer(i64::from(self.quantity)),
            Value::Integer(self.unit_price_cents),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let tenant: String = row.get(1)?;
        let section: String = row.get(2)?;
        let label: String = row.get(3)?;
        let quantity: i64 = row.get(4)?;
        let unit_price_cents: i64 = row.get(5)?;

        Ok(Self::restore(
            OrderLineId::from_uuid(parse_uuid(0, &id)?),
            parse_uuid(1, &tenant)?.into(),
            OrderSectionId::from_uuid(parse_uuid(2, &section)?),
            label,
            u32::try_from(quantity).map_err(|e| decode_err(4, format!("quantity: {e}")))?,
            unit_price_cents,
        ))
    }
}

#[async_trait]
impl OrderRepository for SqliteScopedStore<Order> {
    #[instrument(skip(self, ctx, project))]
    async fn find_for_project(
        &self,
        ctx: &TenantContext,
        project: ProjectId,
    ) -> Result<Vec<Order>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, project_id, reference, status
                     FROM orders
                     WHERE tenant_id = ?1 AND project_id = ?2
                     ORDER BY reference ASC",
                )
                .map_err(internal)?;
            let rows = stmt
                .query_map(params![tenant.to_string(), project.to_string()], |row| {
                    Order::from_row(row)
                })
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<Order>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, order))]
    async fn sections(
        &self,
        ctx: &TenantContext,
        order: OrderId,
    ) -> Result<Vec<OrderSection>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, order_id, title, position
                     FROM order_sections
                     WHERE tenant_id = ?1 AND order_id = ?2
                     ORDER BY position ASC",
                )
                .map_err(internal)?;
            let rows = stmt
                .query_map(params![tenant.to_string(), order.to_string()], |row| {
                    OrderSection::from_row(row)
                })
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<OrderSection>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, section))]
    async fn lines(
        &self,
        ctx: &TenantContext,
        section: OrderSectionId,
    ) -> Result<Vec<OrderLine>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, section_id, label, quantity, unit_price_cents
                     FROM order_lines
                     WHERE tenant_id = ?1 AND section_id = ?2
                     ORDER BY label ASC",
                )
                .map_err(internal)?;
            let rows = stmt
                .query_map(params![tenant.to_string(), section.to_string()], |row| {
                    OrderLine::from_row(row)
                })
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<OrderLine>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, order))]
    async fn order_total_cents(
        &self,
        ctx: &TenantContext,
        order: OrderId,
    ) -> Result<i64, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            // Tenant predicate on every joined table, not only the root.
            conn.query_row(
                "SELECT COALESCE(SUM(l.quantity * l.unit_price_cents), 0)
                 FROM order_lines l
                 JOIN order_sections s
                   ON s.id = l.section_id AND s.tenant_id = l.tenant_id
                 JOIN orders o
                   ON o.id = s.order_id AND o.tenant_id = s.tenant_id
                 WHERE l.tenant_id = ?1 AND o.id = ?2",
                params![tenant.to_string(), order.to_string()],
                |row| row.get(0),
            )
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }
}
