//! Contributor record mapping

use domain::TenantOwned;
use domain::{Contributor, ContributorId};
use rusqlite::Row;
use rusqlite::types::Value;

use super::codec::parse_uuid;
use super::scoped::{SqliteScopedStore, TenantRecord};

/// SQLite-backed contributor repository (generic scoped operations only)
pub type SqliteContributorStore = SqliteScopedStore<Contributor>;

impl TenantRecord for Contributor {
    const TABLE: &'static str = "contributors";
    const COLUMNS: &'static [&'static str] = &["id", "tenant_id", "name", "daily_rate_cents"];
    const SEARCH_COLUMN: &'static str = "name";
    const DEFAULT_ORDER: &'static str = "name ASC";

    type Id = ContributorId;

    fn record_id(&self) -> ContributorId {
        self.id()
    }

    fn bind(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id().to_string()),
            Value::Text(self.tenant_id().to_string()),
            Value::Text(self.name.clone()),
            Value::Integer(self.daily_rate_cents),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let tenant: String = row.get(1)?;
        let name: String = row.get(2)?;
        let daily_rate_cents: i64 = row.get(3)?;

        Ok(Self::restore(
            ContributorId::from_uuid(parse_uuid(0, &id)?),
            parse_uuid(1, &tenant)?.into(),
            name,
            daily_rate_cents,
        ))
    }
}
