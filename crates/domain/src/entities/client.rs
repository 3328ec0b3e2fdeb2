//! Client entity - a tenant's customer

use serde::{Deserialize, Serialize};

use crate::tenant::TenantOwned;
use crate::value_objects::{ClientId, EmailAddress, TenantId};

/// A customer of one tenant
///
/// Clients are root entities: they are created under the tenant of the
/// caller's context, passed in explicitly at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    tenant: TenantId,
    /// Client name
    pub name: String,
    /// Billing contact, if known
    pub contact_email: Option<EmailAddress>,
}

impl Client {
    /// Create a new client under the given tenant
    pub fn new(tenant: TenantId, name: impl Into<String>) -> Self {
        Self {
            id: ClientId::new(),
            tenant,
            name: name.into(),
            contact_email: None,
        }
    }

    /// Rebuild a client from stored state (persistence adapters only)
    pub fn restore(
        id: ClientId,
        tenant: TenantId,
        name: String,
        contact_email: Option<EmailAddress>,
    ) -> Self {
        Self {
            id,
            tenant,
            name,
            contact_email,
        }
    }

    pub const fn id(&self) -> ClientId {
        self.id
    }

    /// Set the billing contact
    #[must_use]
    pub fn with_contact_email(mut self, email: EmailAddress) -> Self {
        self.contact_email = Some(email);
        self
    }
}

impl TenantOwned for Client {
    fn tenant_id(&self) -> TenantId {
        self.tenant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_belongs_to_construction_tenant() {
        let tenant = TenantId::new();
        let client = Client::new(tenant, "Globex");
        assert!(client.belongs_to(tenant));
    }
}
