//! Principal entity - an authenticated actor with a fixed home tenant
//!
//! Credentials and authentication mechanics live outside this core; a
//! `Principal` is the already-verified result the isolation core consumes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::tenant::{CrossTenantGrant, TenantContextError};
use crate::value_objects::{PrincipalId, TenantId};

/// Roles a principal can hold, ordered by implication
///
/// Holding a role implies every role below it (`SuperAdmin` implies
/// `Manager` implies `ProjectLead` implies `Contributor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Records own timesheets, sees assigned work
    Contributor,
    /// Manages projects and their children
    ProjectLead,
    /// Manages the whole tenant
    Manager,
    /// Platform operator; the only role that can act across tenants
    SuperAdmin,
}

/// An authenticated user
///
/// The home tenant is a required constructor parameter with no mutator:
/// it is fixed for the life of the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    id: PrincipalId,
    home_tenant: TenantId,
    /// Display name
    pub display_name: String,
    roles: BTreeSet<Role>,
}

impl Principal {
    /// Create a principal with its fixed home tenant and role set
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::{Principal, Role, TenantId};
    ///
    /// let p = Principal::new("ada", TenantId::new(), [Role::Manager]);
    /// assert!(p.has_role(Role::Contributor));
    /// assert!(!p.has_role(Role::SuperAdmin));
    /// ```
    pub fn new(
        display_name: impl Into<String>,
        home_tenant: TenantId,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self {
            id: PrincipalId::new(),
            home_tenant,
            display_name: display_name.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Rebuild a principal from stored state (persistence adapters only)
    pub fn restore(
        id: PrincipalId,
        home_tenant: TenantId,
        display_name: String,
        roles: BTreeSet<Role>,
    ) -> Self {
        Self {
            id,
            home_tenant,
            display_name,
            roles,
        }
    }

    /// Principal identity
    pub const fn id(&self) -> PrincipalId {
        self.id
    }

    /// The tenant this principal belongs to; fixed at account creation
    pub const fn home_tenant(&self) -> TenantId {
        self.home_tenant
    }

    /// Check a role, resolving through the implication hierarchy
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|held| *held >= role)
    }

    /// Obtain the elevated cross-tenant capability
    ///
    /// This is the single authorization point for tenant switching: the
    /// grant exists as a value only for principals holding
    /// [`Role::SuperAdmin`].
    ///
    /// # Errors
    ///
    /// [`TenantContextError::Forbidden`] for any other principal.
    pub fn cross_tenant_grant(&self) -> Result<CrossTenantGrant, TenantContextError> {
        if self.has_role(Role::SuperAdmin) {
            Ok(CrossTenantGrant::issue(self.id))
        } else {
            Err(TenantContextError::Forbidden { principal: self.id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_imply_lower_roles() {
        let p = Principal::new("lead", TenantId::new(), [Role::ProjectLead]);
        assert!(p.has_role(Role::Contributor));
        assert!(p.has_role(Role::ProjectLead));
        assert!(!p.has_role(Role::Manager));
    }

    #[test]
    fn super_admin_gets_cross_tenant_grant() {
        let p = Principal::new("root", TenantId::new(), [Role::SuperAdmin]);
        let grant = p.cross_tenant_grant().unwrap();
        assert_eq!(grant.granted_to(), p.id());
    }

    #[test]
    fn manager_is_denied_cross_tenant_grant() {
        let p = Principal::new("mgr", TenantId::new(), [Role::Manager]);
        assert!(p.cross_tenant_grant().is_err());
    }

    #[test]
    fn home_tenant_is_fixed() {
        let home = TenantId::new();
        let p = Principal::new("ada", home, [Role::Contributor]);
        assert_eq!(p.home_tenant(), home);
    }
}
