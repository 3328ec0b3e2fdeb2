//! Order book repository port

use async_trait::async_trait;
use domain::tenant::TenantContext;
use domain::{Order, OrderId, OrderLine, OrderSection, OrderSectionId, ProjectId};

use crate::error::ApplicationError;
use crate::ports::ScopedRepository;

/// Order-specific query shapes, including the section/line children
///
/// The total aggregate joins three tables; the tenant predicate is applied
/// to every table in the join, not only the root.
#[async_trait]
pub trait OrderRepository: ScopedRepository<Order, Id = OrderId> {
    /// Orders of the context's tenant attached to the given project
    async fn find_for_project(
        &self,
        ctx: &TenantContext,
        project: ProjectId,
    ) -> Result<Vec<Order>, ApplicationError>;

    /// Sections of one order, in position order
    async fn sections(
        &self,
        ctx: &TenantContext,
        order: OrderId,
    ) -> Result<Vec<OrderSection>, ApplicationError>;

    /// Lines of one section
    async fn lines(
        &self,
        ctx: &TenantContext,
        section: OrderSectionId,
    ) -> Result<Vec<OrderLine>, ApplicationError>;

    /// Sum of `quantity * unit_price` over every line of the order
    async fn order_total_cents(
        &self,
        ctx: &TenantContext,
        order: OrderId,
    ) -> Result<i64, ApplicationError>;
}
