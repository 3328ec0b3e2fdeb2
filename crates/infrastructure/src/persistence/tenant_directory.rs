//! SQLite tenant directory
//!
//! The tenants table is the only table without a `tenant_id` column; it is
//! the referent of every owned table's foreign key, which is also what
//! enforces retention (`ON DELETE RESTRICT` blocks removal while owned
//! rows exist).

use std::str::FromStr;
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::TenantDirectory;
use async_trait::async_trait;
use domain::{
    BillingAnchorDay, CostCoefficients, Currency, Slug, SubscriptionTier, Tenant, TenantId,
    TenantStatus,
};
use rusqlite::{Row, params};
use tokio::task;
use tracing::{info, instrument};

use super::codec::{decode_err, parse_uuid};
use super::connection::ConnectionPool;
use super::scoped::internal;

const TENANT_COLUMNS: &str = "id, slug, name, status, tier, currency, \
     employer_charge_rate, overhead_rate, target_margin, billing_anchor_day";

/// SQLite-backed tenant roster
#[derive(Debug)]
pub struct SqliteTenantDirectory {
    pool: Arc<ConnectionPool>,
}

impl SqliteTenantDirectory {
    /// Create a directory over the given pool
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn status_from_str(idx: usize, s: &str) -> rusqlite::Result<TenantStatus> {
    match s {
        "active" => Ok(TenantStatus::Active),
        "trial" => Ok(TenantStatus::Trial),
        "suspended" => Ok(TenantStatus::Suspended),
        other => Err(decode_err(idx, format!("unknown tenant status: {other}"))),
    }
}

fn tier_from_str(idx: usize, s: &str) -> rusqlite::Result<SubscriptionTier> {
    match s {
        "starter" => Ok(SubscriptionTier::Starter),
        "professional" => Ok(SubscriptionTier::Professional),
        "enterprise" => Ok(SubscriptionTier::Enterprise),
        other => Err(decode_err(idx, format!("unknown tier: {other}"))),
    }
}

const fn tier_to_str(tier: SubscriptionTier) -> &'static str {
    match tier {
        SubscriptionTier::Starter => "starter",
        SubscriptionTier::Professional => "professional",
        SubscriptionTier::Enterprise => "enterprise",
    }
}

fn tenant_from_row(row: &Row<'_>) -> rusqlite::Result<Tenant> {
    let id: String = row.get(0)?;
    let slug: String = row.get(1)?;
    let name: String = row.get(2)?;
    let status: String = row.get(3)?;
    let tier: String = row.get(4)?;
    let currency: String = row.get(5)?;
    let employer_charge_rate: f64 = row.get(6)?;
    let overhead_rate: f64 = row.get(7)?;
    let target_margin: f64 = row.get(8)?;
    let anchor_day: i64 = row.get(9)?;

    let slug = Slug::new(&slug).map_err(|e| decode_err(1, format!("stored slug: {e}")))?;
    let currency = Currency::from_str(&currency)
        .map_err(|e| decode_err(5, format!("stored currency: {e}")))?;
    let anchor_day = u8::try_from(anchor_day)
        .ok()
        .and_then(|d| BillingAnchorDay::new(d).ok())
        .ok_or_else(|| decode_err(9, format!("stored anchor day: {anchor_day}")))?;

    Ok(Tenant::restore(
        TenantId::from_uuid(parse_uuid(0, &id)?),
        slug,
        name,
        status_from_str(3, &status)?,
        tier_from_str(4, &tier)?,
        currency,
        CostCoefficients {
            employer_charge_rate,
            overhead_rate,
            target_margin,
        },
        anchor_day,
    ))
}

#[async_trait]
impl TenantDirectory for SqliteTenantDirectory {
    #[instrument(skip(self, tenant), fields(slug = %tenant.slug()))]
    async fn create(&self, tenant: &Tenant) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let tenant = tenant.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            conn.execute(
                "INSERT INTO tenants (id, slug, name, status, tier, currency,
                     employer_charge_rate, overhead_rate, target_margin, billing_anchor_day)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    tenant.id().to_string(),
                    tenant.slug().as_str(),
                    tenant.name,
                    tenant.status().label(),
                    tier_to_str(tenant.tier),
                    tenant.currency.code(),
                    tenant.cost_coefficients.employer_charge_rate,
                    tenant.cost_coefficients.overhead_rate,
                    tenant.cost_coefficients.target_margin,
                    i64::from(tenant.billing_anchor_day.as_u8()),
                ],
            )
            .map_err(internal)?;
            info!(tenant = %tenant.id(), "Tenant registered");
            Ok(())
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, id))]
    async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {TENANT_COLUMNS} FROM tenants WHERE id = ?1"
                ))
                .map_err(internal)?;
            let mut rows = stmt
                .query_map(params![id.to_string()], tenant_from_row)
                .map_err(internal)?;
            rows.next().transpose().map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, slug))]
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Tenant>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let slug = slug.as_str().to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {TENANT_COLUMNS} FROM tenants WHERE slug = ?1"
                ))
                .map_err(internal)?;
            let mut rows = stmt
                .query_map(params![slug], tenant_from_row)
                .map_err(internal)?;
            rows.next().transpose().map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self))]
    async fn list_operational(&self) -> Result<Vec<Tenant>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {TENANT_COLUMNS} FROM tenants
                     WHERE status IN ('active', 'trial')
                     ORDER BY name ASC"
                ))
                .map_err(internal)?;
            let rows = stmt.query_map([], tenant_from_row).map_err(internal)?;
            rows.collect::<rusqlite::Result<Vec<Tenant>>>()
                .map_err(internal)
        })
        .await
        .map_err(internal)?
    }
}
