//! Tenant entity - the root of the multi-tenant data model
//!
//! Each tenant is one customer organization and owns all of its business
//! data (projects, clients, orders, timesheets, invoices...). Tenant
//! identity is immutable once referenced by owned data, and a tenant is
//! never hard-deleted while owned data exists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::{BillingAnchorDay, Currency, Slug, TenantId};

/// Lifecycle status of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    /// Paying, fully operational
    Active,
    /// Evaluation period, operational
    Trial,
    /// Access revoked; data retained but no unit of work may bind to it
    Suspended,
}

impl TenantStatus {
    /// Whether units of work may operate on this tenant
    pub const fn is_operational(&self) -> bool {
        matches!(self, Self::Active | Self::Trial)
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trial => "trial",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Subscription tier of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Starter,
    Professional,
    Enterprise,
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        Self::Starter
    }
}

/// Payroll and cost coefficients used by billing and profitability logic
///
/// Consumed by collaborators through `TenantContext` + `TenantDirectory`;
/// the isolation core only guarantees they are read for the right tenant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostCoefficients {
    /// Multiplier from gross salary to full employer cost
    pub employer_charge_rate: f64,
    /// Multiplier covering structural overhead
    pub overhead_rate: f64,
    /// Target margin applied when deriving daily rates
    pub target_margin: f64,
}

impl Default for CostCoefficients {
    fn default() -> Self {
        Self {
            employer_charge_rate: 1.45,
            overhead_rate: 1.10,
            target_margin: 0.30,
        }
    }
}

/// A customer organization owning an isolated slice of all business data
///
/// # Examples
///
/// ```
/// use domain::{Slug, Tenant};
///
/// let tenant = Tenant::new("Acme Consulting", Slug::new("acme").unwrap());
/// assert_eq!(tenant.slug().as_str(), "acme");
/// assert!(tenant.status().is_operational());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    id: TenantId,
    slug: Slug,
    /// Display name
    pub name: String,
    /// Current lifecycle status
    status: TenantStatus,
    /// Subscription tier
    pub tier: SubscriptionTier,
    /// Billing currency
    pub currency: Currency,
    /// Payroll/cost inputs for billing collaborators
    pub cost_coefficients: CostCoefficients,
    /// Day of month the billing cycle is anchored to
    pub billing_anchor_day: BillingAnchorDay,
}

impl Tenant {
    /// Create a new active tenant with default tier, currency and coefficients
    pub fn new(name: impl Into<String>, slug: Slug) -> Self {
        Self {
            id: TenantId::new(),
            slug,
            name: name.into(),
            status: TenantStatus::Active,
            tier: SubscriptionTier::default(),
            currency: Currency::default(),
            cost_coefficients: CostCoefficients::default(),
            billing_anchor_day: BillingAnchorDay::default(),
        }
    }

    /// Rebuild a tenant from stored state (persistence adapters only)
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: TenantId,
        slug: Slug,
        name: String,
        status: TenantStatus,
        tier: SubscriptionTier,
        currency: Currency,
        cost_coefficients: CostCoefficients,
        billing_anchor_day: BillingAnchorDay,
    ) -> Self {
        Self {
            id,
            slug,
            name,
            status,
            tier,
            currency,
            cost_coefficients,
            billing_anchor_day,
        }
    }

    /// Tenant identity, immutable for the life of the tenant
    pub const fn id(&self) -> TenantId {
        self.id
    }

    /// URL-safe unique slug
    pub const fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Current lifecycle status
    pub const fn status(&self) -> TenantStatus {
        self.status
    }

    /// Mark this tenant as in trial
    #[must_use]
    pub const fn in_trial(mut self) -> Self {
        self.status = TenantStatus::Trial;
        self
    }

    /// Suspend this tenant; units of work can no longer bind to it
    #[must_use]
    pub const fn suspended(mut self) -> Self {
        self.status = TenantStatus::Suspended;
        self
    }

    /// Set the subscription tier
    #[must_use]
    pub const fn with_tier(mut self, tier: SubscriptionTier) -> Self {
        self.tier = tier;
        self
    }

    /// Set the billing currency
    #[must_use]
    pub const fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant() -> Tenant {
        Tenant::new("Acme", Slug::new("acme").unwrap())
    }

    #[test]
    fn new_tenant_is_active_with_defaults() {
        let t = tenant();
        assert_eq!(t.status(), TenantStatus::Active);
        assert_eq!(t.tier, SubscriptionTier::Starter);
        assert_eq!(t.currency, Currency::Eur);
        assert_eq!(t.billing_anchor_day.as_u8(), 1);
    }

    #[test]
    fn trial_tenant_is_operational() {
        assert!(tenant().in_trial().status().is_operational());
    }

    #[test]
    fn suspended_tenant_is_not_operational() {
        assert!(!tenant().suspended().status().is_operational());
    }

    #[test]
    fn restore_preserves_identity() {
        let original = tenant();
        let restored = Tenant::restore(
            original.id(),
            original.slug().clone(),
            original.name.clone(),
            original.status(),
            original.tier,
            original.currency,
            original.cost_coefficients,
            original.billing_anchor_day,
        );
        assert_eq!(restored, original);
    }
}
