//! Generic tenant-scoped SQLite store
//!
//! One implementation of the scoped-repository contract for every entity
//! type. Per-entity modules supply a [`TenantRecord`] mapping (table,
//! columns, row hydration); the SQL here is generated from that mapping
//! with the tenant predicate always bound first (`WHERE tenant_id = ?1`)
//! and AND-ed with everything else. Centralizing the predicate in one
//! place is what keeps a dozen repositories from silently diverging.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ScopedRepository;
use async_trait::async_trait;
use domain::TenantOwned;
use domain::tenant::TenantContext;
use rusqlite::types::Value;
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use tokio::task;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use super::connection::ConnectionPool;

/// Map any storage-layer failure to an opaque internal error
pub(crate) fn internal<E: fmt::Display>(e: E) -> ApplicationError {
    ApplicationError::Internal(e.to_string())
}

/// Per-entity mapping between a domain type and its SQLite table
///
/// `COLUMNS` starts with `id, tenant_id`; [`TenantRecord::bind`] must
/// produce values in the same order.
pub trait TenantRecord: Sized + Clone + Send + 'static {
    /// Table name
    const TABLE: &'static str;
    /// Column list, `id` first, `tenant_id` second
    const COLUMNS: &'static [&'static str];
    /// Column targeted by text search
    const SEARCH_COLUMN: &'static str;
    /// Default ORDER BY clause for listings
    const DEFAULT_ORDER: &'static str;

    /// The entity's identifier type
    type Id: Copy + Send + Sync + Into<Uuid> + 'static;

    /// This record's identifier
    fn record_id(&self) -> Self::Id;

    /// Values for [`Self::COLUMNS`], in order
    fn bind(&self) -> Vec<Value>;

    /// Hydrate a record from a row selected with [`Self::COLUMNS`]
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

fn column_list<R: TenantRecord>() -> String {
    R::COLUMNS.join(", ")
}

fn insert_sql<R: TenantRecord>() -> String {
    let placeholders: Vec<String> = (1..=R::COLUMNS.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::TABLE,
        column_list::<R>(),
        placeholders.join(", ")
    )
}

fn update_sql<R: TenantRecord>() -> String {
    // Columns 0 and 1 (id, tenant_id) form the WHERE predicate; the rest
    // are assignable payload.
    let assignments: Vec<String> = R::COLUMNS
        .iter()
        .enumerate()
        .skip(2)
        .map(|(i, col)| format!("{col} = ?{}", i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ?1 AND tenant_id = ?2",
        R::TABLE,
        assignments.join(", ")
    )
}

/// SQLite-backed scoped repository, generic over the record mapping
#[derive(Debug)]
pub struct SqliteScopedStore<R> {
    pool: Arc<ConnectionPool>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for SqliteScopedStore<R> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
            _record: PhantomData,
        }
    }
}

impl<R> SqliteScopedStore<R> {
    /// Create a store over the given pool
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    pub(crate) fn pool(&self) -> Arc<ConnectionPool> {
        Arc::clone(&self.pool)
    }
}

#[async_trait]
impl<R> ScopedRepository<R> for SqliteScopedStore<R>
where
    R: TenantRecord + TenantOwned + Sync,
{
    type Id = <R as TenantRecord>::Id;

    #[instrument(skip(self, ctx), fields(table = R::TABLE))]
    async fn find_all(&self, ctx: &TenantContext) -> Result<Vec<R>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let sql = format!(
                "SELECT {} FROM {} WHERE tenant_id = ?1 ORDER BY {}",
                column_list::<R>(),
                R::TABLE,
                R::DEFAULT_ORDER
            );
            let mut stmt = conn.prepare(&sql).map_err(internal)?;
            let rows = stmt
                .query_map([tenant.to_string()], |row| R::from_row(row))
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<R>>>().map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, id), fields(table = R::TABLE))]
    async fn find_by_id(
        &self,
        ctx: &TenantContext,
        id: Self::Id,
    ) -> Result<Option<R>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();
        let id: Uuid = id.into();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            // One atomic predicate: an id under another tenant is
            // indistinguishable from an absent id.
            let sql = format!(
                "SELECT {} FROM {} WHERE tenant_id = ?1 AND id = ?2",
                column_list::<R>(),
                R::TABLE
            );
            conn.query_row(&sql, params![tenant.to_string(), id.to_string()], |row| {
                R::from_row(row)
            })
            .optional()
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx), fields(table = R::TABLE))]
    async fn count(&self, ctx: &TenantContext) -> Result<u64, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let sql = format!("SELECT COUNT(*) FROM {} WHERE tenant_id = ?1", R::TABLE);
            let count: i64 = conn
                .query_row(&sql, [tenant.to_string()], |row| row.get(0))
                .map_err(internal)?;
            u64::try_from(count).map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, text), fields(table = R::TABLE))]
    async fn search(&self, ctx: &TenantContext, text: &str) -> Result<Vec<R>, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();
        let pattern = format!("%{}%", text.to_lowercase());

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let sql = format!(
                "SELECT {} FROM {} WHERE tenant_id = ?1 AND LOWER({}) LIKE ?2 ORDER BY {}",
                column_list::<R>(),
                R::TABLE,
                R::SEARCH_COLUMN,
                R::DEFAULT_ORDER
            );
            let mut stmt = conn.prepare(&sql).map_err(internal)?;
            let rows = stmt
                .query_map(params![tenant.to_string(), pattern], |row| R::from_row(row))
                .map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<R>>>().map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, entity), fields(table = R::TABLE))]
    async fn insert(&self, ctx: &TenantContext, entity: &R) -> Result<(), ApplicationError> {
        let tenant = ctx.current()?;
        if !entity.belongs_to(tenant) {
            error!(
                table = R::TABLE,
                context_tenant = %tenant,
                entity_tenant = %entity.tenant_id(),
                "rejected insert: entity tenant does not match context"
            );
            return Err(ApplicationError::IsolationViolation(format!(
                "refusing to insert into {}: entity belongs to {}, context is {}",
                R::TABLE,
                entity.tenant_id(),
                tenant
            )));
        }

        let pool = self.pool();
        let values = entity.bind();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            conn.execute(&insert_sql::<R>(), params_from_iter(values))
                .map_err(internal)?;
            debug!(table = R::TABLE, "inserted row");
            Ok(())
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, entity), fields(table = R::TABLE))]
    async fn update(&self, ctx: &TenantContext, entity: &R) -> Result<bool, ApplicationError> {
        let tenant = ctx.current()?;
        if !entity.belongs_to(tenant) {
            error!(
                table = R::TABLE,
                context_tenant = %tenant,
                entity_tenant = %entity.tenant_id(),
                "rejected update: entity tenant does not match context"
            );
            return Err(ApplicationError::IsolationViolation(format!(
                "refusing to update {}: entity belongs to {}, context is {}",
                R::TABLE,
                entity.tenant_id(),
                tenant
            )));
        }

        let pool = self.pool();
        let values = entity.bind();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let affected = conn
                .execute(&update_sql::<R>(), params_from_iter(values))
                .map_err(internal)?;
            Ok(affected > 0)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, ctx, id), fields(table = R::TABLE))]
    async fn delete(&self, ctx: &TenantContext, id: Self::Id) -> Result<bool, ApplicationError> {
        let tenant = ctx.current()?;
        let pool = self.pool();
        let id: Uuid = id.into();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let sql = format!("DELETE FROM {} WHERE id = ?1 AND tenant_id = ?2", R::TABLE);
            let affected = conn
                .execute(&sql, params![id.to_string(), tenant.to_string()])
                .map_err(internal)?;
            Ok(affected > 0)
        })
        .await
        .map_err(internal)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Project;

    #[test]
    fn insert_sql_covers_all_columns() {
        let sql = insert_sql::<Project>();
        assert!(sql.starts_with("INSERT INTO projects"));
        assert!(sql.contains("?6"));
        assert!(!sql.contains("?7"));
    }

    #[test]
    fn update_sql_keys_on_id_and_tenant() {
        let sql = update_sql::<Project>();
        assert!(sql.ends_with("WHERE id = ?1 AND tenant_id = ?2"));
        assert!(sql.contains("name = ?3"));
        assert!(!sql.contains("tenant_id = ?2,"));
    }
}
