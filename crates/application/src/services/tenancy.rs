//! Tenancy workflows: administrative switching and system-job iteration
//!
//! These are the only two sanctioned ways a unit of work ends up bound to
//! a tenant other than the principal's home tenant.

use std::future::Future;

use domain::tenant::{SystemGrant, TenantContext};
use domain::{Principal, Slug, Tenant, TenantId};
use tracing::info;

use crate::error::ApplicationError;
use crate::ports::TenantDirectory;

/// Switch the context to the tenant identified by `slug`
///
/// Authorization happens first: acquiring the cross-tenant grant fails with
/// `Forbidden` before any lookup, so an unauthorized caller learns nothing
/// about which slugs exist. An unknown slug yields `Ok(None)`.
///
/// # Errors
///
/// `Forbidden` when the principal lacks the elevated capability or the
/// target tenant is suspended; storage failures as `Internal`.
pub async fn switch_to_slug(
    directory: &dyn TenantDirectory,
    ctx: &mut TenantContext,
    principal: &Principal,
    slug: &Slug,
) -> Result<Option<TenantId>, ApplicationError> {
    let grant = principal.cross_tenant_grant()?;

    let Some(target) = directory.find_by_slug(slug).await? else {
        return Ok(None);
    };

    ctx.switch(&grant, &target)?;
    Ok(Some(target.id()))
}

/// Run a job once per operational tenant, with a fresh context each time
///
/// System jobs never run "across all tenants" in one scope: each iteration
/// gets its own context bound to exactly one tenant, and the context is
/// dropped (torn down) before the next iteration starts. Returns the number
/// of tenants processed.
///
/// # Errors
///
/// The first job failure aborts the iteration and is propagated.
pub async fn run_for_each_tenant<F, Fut>(
    directory: &dyn TenantDirectory,
    grant: &SystemGrant,
    mut job: F,
) -> Result<u32, ApplicationError>
where
    F: FnMut(TenantContext, Tenant) -> Fut + Send,
    Fut: Future<Output = Result<(), ApplicationError>> + Send,
{
    let tenants = directory.list_operational().await?;
    let mut processed = 0u32;

    for tenant in tenants {
        let ctx = TenantContext::bind_for_job(tenant.id(), grant);
        job(ctx, tenant).await?;
        processed += 1;
    }

    info!(job = grant.job(), processed, "system job completed tenant sweep");
    Ok(processed)
}
