//! Contributor entity - a tenant's billable staff member

use serde::{Deserialize, Serialize};

use crate::tenant::TenantOwned;
use crate::value_objects::{ContributorId, TenantId};

/// A staff member whose time is planned and billed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    id: ContributorId,
    tenant: TenantId,
    /// Display name
    pub name: String,
    /// Standard daily rate, in minor currency units
    pub daily_rate_cents: i64,
}

impl Contributor {
    /// Create a new contributor under the given tenant
    pub fn new(tenant: TenantId, name: impl Into<String>, daily_rate_cents: i64) -> Self {
        Self {
            id: ContributorId::new(),
            tenant,
            name: name.into(),
            daily_rate_cents,
        }
    }

    /// Rebuild a contributor from stored state (persistence adapters only)
    pub fn restore(
        id: ContributorId,
        tenant: TenantId,
        name: String,
        daily_rate_cents: i64,
    ) -> Self {
        Self {
            id,
            tenant,
            name,
            daily_rate_cents,
        }
    }

    pub const fn id(&self) -> ContributorId {
        self.id
    }
}

impl TenantOwned for Contributor {
    fn tenant_id(&self) -> TenantId {
        self.tenant
    }
}
