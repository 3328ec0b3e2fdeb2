//! Application-level errors
//!
//! Repository methods never fail to signal "not yours": a record that
//! exists under another tenant is indistinguishable from one that does not
//! exist at all. The variants here cover the remaining failure classes:
//! programming errors (unbound context), authorization on the switch path,
//! isolation violations on the write path, and infrastructure faults.

use domain::{DomainError, TenantContextError};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Tenant-scoped code reached before a context was established.
    /// A programming error; surfaces as a 5xx-class failure, never
    /// silently defaulted to some tenant.
    #[error("tenant context unbound")]
    UnboundContext,

    /// Cross-tenant capability denied
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A write was attempted for an entity whose tenant does not match the
    /// context, or a row reached the store without a tenant. Fatal; never
    /// caught-and-ignored.
    #[error("tenant isolation violation: {0}")]
    IsolationViolation(String),

    /// Internal error (storage, pool, serialization)
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TenantContextError> for ApplicationError {
    fn from(err: TenantContextError) -> Self {
        match err {
            TenantContextError::Unbound => Self::UnboundContext,
            TenantContextError::Forbidden { .. } | TenantContextError::TenantNotOperational { .. } => {
                Self::Forbidden(err.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::{Principal, Role, TenantId};

    use super::*;

    #[test]
    fn unbound_context_maps_to_unbound_variant() {
        let err: ApplicationError = TenantContextError::Unbound.into();
        assert!(matches!(err, ApplicationError::UnboundContext));
    }

    #[test]
    fn forbidden_maps_to_forbidden_variant() {
        let principal = Principal::new("eve", TenantId::new(), [Role::Manager]);
        let err: ApplicationError = principal.cross_tenant_grant().unwrap_err().into();
        assert!(matches!(err, ApplicationError::Forbidden(_)));
    }

    #[test]
    fn isolation_violation_message() {
        let err = ApplicationError::IsolationViolation("entity tenant mismatch".to_string());
        assert_eq!(
            err.to_string(),
            "tenant isolation violation: entity tenant mismatch"
        );
    }
}
