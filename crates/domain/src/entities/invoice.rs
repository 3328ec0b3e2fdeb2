//! Invoice entity

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Project;
use crate::tenant::{TenantOwned, derive_owner};
use crate::value_objects::{InvoiceId, ProjectId, TenantId};

/// Billing status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
}

impl InvoiceStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Issued => "issued",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An invoice billed against a project
///
/// Invoices hang off a project and inherit its tenant at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    tenant: TenantId,
    project: ProjectId,
    /// Invoice number (tenant-local numbering scheme)
    pub number: String,
    /// Issue date
    pub issued_on: NaiveDate,
    /// Total in minor currency units
    pub total_cents: i64,
    /// Billing status
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Create a new draft invoice under a project, inheriting its tenant
    pub fn new(
        project: &Project,
        number: impl Into<String>,
        issued_on: NaiveDate,
        total_cents: i64,
    ) -> Self {
        Self {
            id: InvoiceId::new(),
            tenant: derive_owner(project),
            project: project.id(),
            number: number.into(),
            issued_on,
            total_cents,
            status: InvoiceStatus::Draft,
        }
    }

    /// Rebuild an invoice from stored state (persistence adapters only)
    pub fn restore(
        id: InvoiceId,
        tenant: TenantId,
        project: ProjectId,
        number: String,
        issued_on: NaiveDate,
        total_cents: i64,
        status: InvoiceStatus,
    ) -> Self {
        Self {
            id,
            tenant,
            project,
            number,
            issued_on,
            total_cents,
            status,
        }
    }

    pub const fn id(&self) -> InvoiceId {
        self.id
    }

    pub const fn project_id(&self) -> ProjectId {
        self.project
    }

    /// Issue this invoice
    #[must_use]
    pub const fn mark_issued(mut self) -> Self {
        self.status = InvoiceStatus::Issued;
        self
    }

    /// Record payment of this invoice
    #[must_use]
    pub const fn mark_paid(mut self) -> Self {
        self.status = InvoiceStatus::Paid;
        self
    }
}

impl TenantOwned for Invoice {
    fn tenant_id(&self) -> TenantId {
        self.tenant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice() -> Invoice {
        let project = Project::new(TenantId::new(), "Revamp");
        let issued = NaiveDate::from_ymd_opt(2026, 5, 15).unwrap();
        Invoice::new(&project, "2026-0042", issued, 1_200_000)
    }

    #[test]
    fn invoice_inherits_project_tenant() {
        let tenant = TenantId::new();
        let project = Project::new(tenant, "Revamp");
        let issued = NaiveDate::from_ymd_opt(2026, 5, 15).unwrap();
        let invoice = Invoice::new(&project, "2026-0001", issued, 500_000);
        assert_eq!(invoice.tenant_id(), tenant);
    }

    #[test]
    fn status_transitions() {
        let invoice = invoice();
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        let invoice = invoice.mark_issued();
        assert_eq!(invoice.status, InvoiceStatus::Issued);
        let invoice = invoice.mark_paid();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }
}
