//! Request-scoped tenant context
//!
//! A [`TenantContext`] records which tenant is in effect for one unit of
//! work (HTTP request, background-job iteration, test case). It is an
//! explicit value threaded through every repository call, never an ambient
//! singleton: dropping the context is the teardown, and nothing can leak
//! into the next unit of work because nothing outlives the value.
//!
//! Switching tenants is gated by capability *types* rather than runtime
//! role-string checks: a [`CrossTenantGrant`] can only be obtained from a
//! principal holding the elevated role, and a [`SystemGrant`] is built
//! explicitly by background-job bootstrap code. An unauthorized switch is
//! unrepresentable.

use thiserror::Error;
use tracing::{debug, warn};

use crate::entities::{Tenant, TenantStatus};
use crate::value_objects::{PrincipalId, TenantId};

/// Failures of the tenant context itself
///
/// These are the only thrown failures in the isolation core. Ordinary
/// repository reads never fail for "not yours" — they return the not-found
/// form of their result instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TenantContextError {
    /// Tenant-scoped code was reached before a tenant was established.
    /// A programming error, surfaced loudly and never defaulted.
    #[error("tenant context is unbound")]
    Unbound,

    /// The principal lacks the elevated cross-tenant capability
    #[error("principal {principal} is not allowed to act across tenants")]
    Forbidden { principal: PrincipalId },

    /// The switch target is suspended and cannot be operated on
    #[error("tenant {tenant} is not operational (status: {status})")]
    TenantNotOperational {
        tenant: TenantId,
        status: TenantStatus,
    },
}

/// Capability to operate on behalf of a tenant other than one's own
///
/// Obtained exclusively through
/// [`Principal::cross_tenant_grant`](crate::entities::Principal::cross_tenant_grant).
/// Holding a value of this type *is* the authorization; every place one is
/// used is an audit point.
#[derive(Debug)]
pub struct CrossTenantGrant {
    granted_to: PrincipalId,
}

impl CrossTenantGrant {
    /// Only the principal module mints grants.
    pub(crate) const fn issue(granted_to: PrincipalId) -> Self {
        Self { granted_to }
    }

    /// The principal this grant was issued to
    pub const fn granted_to(&self) -> PrincipalId {
        self.granted_to
    }
}

/// Capability for non-interactive system jobs to bind a context to any tenant
///
/// System jobs (periodic recalculation, digests) iterate tenants explicitly
/// and rebind a fresh context per iteration; they never bypass scoping and
/// never run "across all tenants" in a single query.
#[derive(Debug)]
pub struct SystemGrant {
    job: String,
}

impl SystemGrant {
    /// Create a grant for a named background job
    pub fn for_background_job(job: impl Into<String>) -> Self {
        Self { job: job.into() }
    }

    /// The job this grant was created for
    pub fn job(&self) -> &str {
        &self.job
    }
}

/// The tenant currently in effect for one unit of work
///
/// # Examples
///
/// ```
/// use domain::tenant::TenantContext;
/// use domain::{Principal, Role, TenantId};
///
/// let principal = Principal::new("ada", TenantId::new(), [Role::Manager]);
/// let ctx = TenantContext::bind(&principal);
/// assert_eq!(ctx.current().unwrap(), principal.home_tenant());
/// ```
#[derive(Debug)]
pub struct TenantContext {
    active: Option<TenantId>,
}

impl TenantContext {
    /// An empty context, as it exists before authentication
    ///
    /// Any repository call against an unbound context fails with
    /// [`TenantContextError::Unbound`].
    pub const fn unbound() -> Self {
        Self { active: None }
    }

    /// Seed a context from an authenticated principal's home tenant
    pub fn bind(principal: &crate::entities::Principal) -> Self {
        Self {
            active: Some(principal.home_tenant()),
        }
    }

    /// Bind a context to one tenant on behalf of a system job
    pub fn bind_for_job(tenant: TenantId, grant: &SystemGrant) -> Self {
        debug!(job = grant.job(), %tenant, "binding tenant context for system job");
        Self {
            active: Some(tenant),
        }
    }

    /// The tenant in effect
    ///
    /// # Errors
    ///
    /// [`TenantContextError::Unbound`] if no tenant has been established.
    pub fn current(&self) -> Result<TenantId, TenantContextError> {
        self.active.ok_or(TenantContextError::Unbound)
    }

    /// Whether a tenant has been established
    pub const fn is_bound(&self) -> bool {
        self.active.is_some()
    }

    /// Replace the tenant in effect (administrative switch)
    ///
    /// Requires a [`CrossTenantGrant`]; the grant acquisition is where
    /// authorization fails, so by the time this is callable the caller is
    /// already elevated. Every switch is logged as an audit event.
    ///
    /// # Errors
    ///
    /// [`TenantContextError::TenantNotOperational`] if the target tenant is
    /// suspended; the context is left unchanged.
    pub fn switch(
        &mut self,
        grant: &CrossTenantGrant,
        target: &Tenant,
    ) -> Result<(), TenantContextError> {
        if !target.status().is_operational() {
            return Err(TenantContextError::TenantNotOperational {
                tenant: target.id(),
                status: target.status(),
            });
        }

        warn!(
            principal = %grant.granted_to(),
            from = ?self.active,
            to = %target.id(),
            "cross-tenant switch"
        );
        self.active = Some(target.id());
        Ok(())
    }
}

impl Default for TenantContext {
    fn default() -> Self {
        Self::unbound()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Principal, Role, Tenant};
    use crate::value_objects::Slug;

    fn tenant(slug: &str) -> Tenant {
        Tenant::new(slug.to_string(), Slug::new(slug).unwrap())
    }

    #[test]
    fn unbound_context_has_no_tenant() {
        let ctx = TenantContext::unbound();
        assert_eq!(ctx.current(), Err(TenantContextError::Unbound));
        assert!(!ctx.is_bound());
    }

    #[test]
    fn bind_uses_principal_home_tenant() {
        let home = TenantId::new();
        let principal = Principal::new("ada", home, [Role::Contributor]);
        let ctx = TenantContext::bind(&principal);
        assert_eq!(ctx.current(), Ok(home));
    }

    #[test]
    fn switch_replaces_active_tenant() {
        let principal = Principal::new("root", TenantId::new(), [Role::SuperAdmin]);
        let grant = principal.cross_tenant_grant().unwrap();
        let target = tenant("beta");

        let mut ctx = TenantContext::bind(&principal);
        ctx.switch(&grant, &target).unwrap();
        assert_eq!(ctx.current(), Ok(target.id()));
    }

    #[test]
    fn switch_to_suspended_tenant_fails_and_keeps_context() {
        let principal = Principal::new("root", TenantId::new(), [Role::SuperAdmin]);
        let grant = principal.cross_tenant_grant().unwrap();
        let target = tenant("beta").suspended();

        let mut ctx = TenantContext::bind(&principal);
        let before = ctx.current().unwrap();
        let err = ctx.switch(&grant, &target).unwrap_err();
        assert!(matches!(
            err,
            TenantContextError::TenantNotOperational { .. }
        ));
        assert_eq!(ctx.current(), Ok(before));
    }

    #[test]
    fn grant_denied_without_elevated_role() {
        let principal = Principal::new("eve", TenantId::new(), [Role::Manager]);
        let err = principal.cross_tenant_grant().unwrap_err();
        assert_eq!(
            err,
            TenantContextError::Forbidden {
                principal: principal.id()
            }
        );
    }

    #[test]
    fn system_grant_binds_any_tenant() {
        let grant = SystemGrant::for_background_job("monthly-recalculation");
        let tenant_id = TenantId::new();
        let ctx = TenantContext::bind_for_job(tenant_id, &grant);
        assert_eq!(ctx.current(), Ok(tenant_id));
    }

    #[test]
    fn dropping_a_context_does_not_affect_a_fresh_one() {
        let principal = Principal::new("ada", TenantId::new(), [Role::Contributor]);
        {
            let ctx = TenantContext::bind(&principal);
            assert!(ctx.is_bound());
        }
        // A new unit of work starts unbound regardless of what came before.
        let fresh = TenantContext::unbound();
        assert_eq!(fresh.current(), Err(TenantContextError::Unbound));
    }
}
