//! Order aggregate - Order, OrderSection and OrderLine
//!
//! The deepest ownership chain in the model: OrderLine under OrderSection
//! under Order under Project. Every link derives its tenant from its
//! parent at construction time, never from ambient context, so a child
//! cannot end up under the wrong tenant even while an administrative
//! switch is in effect.

use serde::{Deserialize, Serialize};

use crate::entities::Project;
use crate::tenant::{TenantOwned, derive_owner};
use crate::value_objects::{OrderId, OrderLineId, OrderSectionId, ProjectId, TenantId};

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Draft,
    Signed,
    Cancelled,
}

/// A signed or draft commercial order attached to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    tenant: TenantId,
    project: ProjectId,
    /// Commercial reference (quote/PO number)
    pub reference: String,
    /// Current lifecycle status
    pub status: OrderStatus,
}

impl Order {
    /// Create a new draft order under a project, inheriting its tenant
    pub fn new(project: &Project, reference: impl Into<String>) -> Self {
        Self {
            id: OrderId::new(),
            tenant: derive_owner(project),
            project: project.id(),
            reference: reference.into(),
            status: OrderStatus::Draft,
        }
    }

    /// Rebuild an order from stored state (persistence adapters only)
    pub fn restore(
        id: OrderId,
        tenant: TenantId,
        project: ProjectId,
        reference: String,
        status: OrderStatus,
    ) -> Self {
        Self {
            id,
            tenant,
            project,
            reference,
            status,
        }
    }

    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// The project this order is attached to
    pub const fn project_id(&self) -> ProjectId {
        self.project
    }
}

impl TenantOwned for Order {
    fn tenant_id(&self) -> TenantId {
        self.tenant
    }
}

/// A titled group of lines within an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSection {
    id: OrderSectionId,
    tenant: TenantId,
    order: OrderId,
    /// Section title
    pub title: String,
    /// Ordering position within the order
    pub position: u32,
}

impl OrderSection {
    /// Create a new section under an order, inheriting its tenant
    pub fn new(order: &Order, title: impl Into<String>, position: u32) -> Self {
        Self {
            id: OrderSectionId::new(),
            tenant: derive_owner(order),
            order: order.id(),
            title: title.into(),
            position,
        }
    }

    /// Rebuild a section from stored state (persistence adapters only)
    pub fn restore(
        id: OrderSectionId,
        tenant: TenantId,
        order: OrderId,
        title: String,
        position: u32,
    ) -> Self {
        Self {
            id,
            tenant,
            order,
            title,
            position,
        }
    }

    pub const fn id(&self) -> OrderSectionId {
        self.id
    }

    pub const fn order_id(&self) -> OrderId {
        self.order
    }
}

impl TenantOwned for OrderSection {
    fn tenant_id(&self) -> TenantId {
        self.tenant
    }
}

/// A priced line within an order section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    id: OrderLineId,
    tenant: TenantId,
    section: OrderSectionId,
    /// Line label
    pub label: String,
    /// Quantity of units
    pub quantity: u32,
    /// Unit price in minor currency units
    pub unit_price_cents: i64,
}

impl OrderLine {
    /// Create a new line under a section, inheriting its tenant
    pub fn new(
        section: &OrderSection,
        label: impl Into<String>,
        quantity: u32,
        unit_price_cents: i64,
    ) -> Self {
        Self {
            id: OrderLineId::new(),
            tenant: derive_owner(section),
            section: section.id(),
            label: label.into(),
            quantity,
            unit_price_cents,
        }
    }

    /// Rebuild a line from stored state (persistence adapters only)
    pub fn restore(
        id: OrderLineId,
        tenant: TenantId,
        section: OrderSectionId,
        label: String,
        quantity: u32,
        unit_price_cents: i64,
    ) -> Self {
        Self {
            id,
            tenant,
            section,
            label,
            quantity,
            unit_price_cents,
        }
    }

    pub const fn id(&self) -> OrderLineId {
        self.id
    }

    pub const fn section_id(&self) -> OrderSectionId {
        self.section
    }

    /// Line total in minor currency units
    pub fn total_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

impl TenantOwned for OrderLine {
    fn tenant_id(&self) -> TenantId {
        self.tenant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_chain_inherits_project_tenant() {
        let tenant = TenantId::new();
        let project = Project::new(tenant, "Revamp");
        let order = Order::new(&project, "PO-2026-001");
        let section = OrderSection::new(&order, "Phase 1", 0);
        let line = OrderLine::new(&section, "Discovery workshop", 2, 120_000);

        assert_eq!(order.tenant_id(), tenant);
        assert_eq!(section.tenant_id(), tenant);
        assert_eq!(line.tenant_id(), tenant);
    }

    #[test]
    fn line_total_multiplies_quantity() {
        let project = Project::new(TenantId::new(), "Revamp");
        let order = Order::new(&project, "PO-1");
        let section = OrderSection::new(&order, "Phase 1", 0);
        let line = OrderLine::new(&section, "Dev days", 3, 80_000);
        assert_eq!(line.total_cents(), 240_000);
    }
}
