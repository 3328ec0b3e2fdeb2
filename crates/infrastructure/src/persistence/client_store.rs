//! Client record mapping

use domain::{Client, ClientId, EmailAddress};
use rusqlite::Row;
use rusqlite::types::Value;

use super::codec::{decode_err, parse_uuid};
use super::scoped::{SqliteScopedStore, TenantRecord};
use domain::TenantOwned;

/// SQLite-backed client repository (generic scoped operations only)
pub type SqliteClientStore = SqliteScopedStore<Client>;

impl TenantRecord for Client {
    const TABLE: &'static str = "clients";
    const COLUMNS: &'static [&'static str] = &["id", "tenant_id", "name", "contact_email"];
    const SEARCH_COLUMN: &'static str = "name";
    const DEFAULT_ORDER: &'static str = "name ASC";

    type Id = ClientId;

    fn record_id(&self) -> ClientId {
        self.id()
    }

    fn bind(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id().to_string()),
            Value::Text(self.tenant_id().to_string()),
            Value::Text(self.name.clone()),
            self.contact_email
                .as_ref()
                .map_or(Value::Null, |e| Value::Text(e.as_str().to_string())),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let tenant: String = row.get(1)?;
        let name: String = row.get(2)?;
        let email: Option<String> = row.get(3)?;

        let contact_email = email
            .map(|e| {
                EmailAddress::new(&e).map_err(|err| decode_err(3, format!("stored email: {err}")))
            })
            .transpose()?;

        Ok(Self::restore(
            ClientId::from_uuid(parse_uuid(0, &id)?),
            parse_uuid(1, &tenant)?.into(),
            name,
            contact_email,
        ))
    }
}
