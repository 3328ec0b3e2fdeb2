//! Invoice repository port

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::tenant::TenantContext;
use domain::{Invoice, InvoiceId};

use crate::error::ApplicationError;
use crate::ports::ScopedRepository;

/// Invoice-specific query shapes
#[async_trait]
pub trait InvoiceRepository: ScopedRepository<Invoice, Id = InvoiceId> {
    /// Invoices of the context's tenant issued within an inclusive range
    ///
    /// Drafts are not issued yet and never appear here.
    async fn find_issued_between(
        &self,
        ctx: &TenantContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Invoice>, ApplicationError>;

    /// Total issued-or-paid amount over an inclusive issue-date range
    async fn revenue_cents_between(
        &self,
        ctx: &TenantContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, ApplicationError>;
}
