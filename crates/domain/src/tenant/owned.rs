//! The TenantOwned contract and the parent-to-child ownership resolver
//!
//! Every persisted business entity implements [`TenantOwned`]: it carries a
//! mandatory tenant reference fixed at construction time. There is no
//! mutator anywhere, so reassignment is a compile error, not a review item.

use crate::value_objects::TenantId;

/// Contract for entities that belong to exactly one tenant
///
/// # Examples
///
/// ```
/// use domain::tenant::TenantOwned;
/// use domain::TenantId;
///
/// struct Note {
///     tenant: TenantId,
///     body: String,
/// }
///
/// impl TenantOwned for Note {
///     fn tenant_id(&self) -> TenantId {
///         self.tenant
///     }
/// }
/// ```
pub trait TenantOwned {
    /// The tenant this entity belongs to
    fn tenant_id(&self) -> TenantId;

    /// Check whether this entity belongs to the given tenant
    fn belongs_to(&self, tenant_id: TenantId) -> bool {
        self.tenant_id() == tenant_id
    }
}

/// Derive the owning tenant of a new child entity from its parent
///
/// A child created under a parent always takes the parent's tenant, never
/// the ambient context. The ambient context can be momentarily pointed at a
/// different tenant (administrative switch); the parent cannot.
///
/// This function has no failure mode: a [`TenantOwned`] value cannot exist
/// without a tenant id.
///
/// # Examples
///
/// ```
/// use domain::tenant::{TenantOwned, derive_owner};
/// use domain::TenantId;
///
/// struct Parent(TenantId);
/// impl TenantOwned for Parent {
///     fn tenant_id(&self) -> TenantId {
///         self.0
///     }
/// }
///
/// let parent = Parent(TenantId::new());
/// assert_eq!(derive_owner(&parent), parent.tenant_id());
/// ```
pub fn derive_owner<P: TenantOwned>(parent: &P) -> TenantId {
    parent.tenant_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub(TenantId);

    impl TenantOwned for Stub {
        fn tenant_id(&self) -> TenantId {
            self.0
        }
    }

    #[test]
    fn belongs_to_matches_owner_only() {
        let tenant = TenantId::new();
        let entity = Stub(tenant);
        assert!(entity.belongs_to(tenant));
        assert!(!entity.belongs_to(TenantId::new()));
    }

    #[test]
    fn derive_owner_returns_parent_tenant() {
        let tenant = TenantId::new();
        assert_eq!(derive_owner(&Stub(tenant)), tenant);
    }
}
