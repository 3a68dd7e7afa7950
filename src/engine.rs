use crate::delegation::DelegationPolicy;
use crate::identity::Identity;
use crate::permission::{Permission, PermissionSet};
use crate::registry::RoleRegistry;
use crate::role::Role;
use crate::scope::ScopeResolver;
use std::sync::Arc;

/// Authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Access is granted by the named rule.
    Allow(Grant),
    /// Access is denied.
    Deny,
}

impl Decision {
    /// Whether access is granted.
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow(_))
    }

    /// The rule that granted access, if any.
    pub fn grant(self) -> Option<Grant> {
        match self {
            Decision::Allow(grant) => Some(grant),
            Decision::Deny => None,
        }
    }
}

impl From<Decision> for bool {
    fn from(decision: Decision) -> Self {
        decision.is_allowed()
    }
}

/// Rule that produced an [`Decision::Allow`].
///
/// Diagnostic only; callers gate on the boolean outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grant {
    /// Identity carries the super admin flag.
    SuperAdmin,
    /// Identity holds the admin role.
    Admin,
    /// Role's permission set contains the permission.
    RolePermission,
    /// Role level meets the required level.
    RoleLevel,
    /// Identity owns the resource.
    SelfOwnership,
    /// Identity owns the club scope.
    ClubOwner,
    /// Identity trains within the club scope.
    ClubTrainer,
    /// Identity belongs to the club scope.
    ClubMember,
    /// Actor owns a club the target belongs to.
    SharedClub,
}

/// Decision engine over an injected [`RoleRegistry`].
///
/// All checks are pure functions of their arguments; the engine holds no
/// mutable state and can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<RoleRegistry>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Arc::new(RoleRegistry::standard()))
    }
}

impl Engine {
    /// Creates an engine over `registry`.
    pub fn new(registry: Arc<RoleRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the role table.
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Scoped club checks built on this engine.
    pub fn scopes(&self) -> ScopeResolver<'_> {
        ScopeResolver::new(self)
    }

    /// User-management delegation rules built on this engine.
    pub fn delegation(&self) -> DelegationPolicy<'_> {
        DelegationPolicy::new(self.scopes())
    }

    /// Whether `identity` holds `permission`.
    pub fn can(&self, identity: Option<&Identity>, permission: Permission) -> bool {
        self.decide_permission(identity, permission).is_allowed()
    }

    /// [`Engine::can`] with the granting rule.
    pub fn decide_permission(
        &self,
        identity: Option<&Identity>,
        permission: Permission,
    ) -> Decision {
        let Some(identity) = identity else {
            return Decision::Deny;
        };
        if let Some(grant) = bypass_grant(identity) {
            return Decision::Allow(grant);
        }
        if self.registry.grants(identity.role, permission) {
            Decision::Allow(Grant::RolePermission)
        } else {
            Decision::Deny
        }
    }

    /// Permission check for a name that crossed a serialization boundary.
    pub fn can_named(&self, identity: Option<&Identity>, permission: &str) -> bool {
        match Permission::parse(permission) {
            Ok(permission) => self.can(identity, permission),
            Err(err) => {
                tracing::debug!(%err, "unrecognized permission name, denying");
                false
            }
        }
    }

    /// Whether `identity` holds at least one of `permissions`.
    pub fn can_any(&self, identity: Option<&Identity>, permissions: &[Permission]) -> bool {
        permissions
            .iter()
            .any(|permission| self.can(identity, *permission))
    }

    /// Whether `identity` holds every one of `permissions`.
    ///
    /// An absent identity is denied even for an empty list.
    pub fn can_all(&self, identity: Option<&Identity>, permissions: &[Permission]) -> bool {
        identity.is_some()
            && permissions
                .iter()
                .all(|permission| self.can(identity, *permission))
    }

    /// Permissions `identity` effectively holds, e.g. for menu gating.
    pub fn effective_permissions(&self, identity: Option<&Identity>) -> PermissionSet {
        match identity {
            None => PermissionSet::new(),
            Some(identity) if identity.bypasses() => Permission::ALL.iter().copied().collect(),
            Some(identity) => self.registry.permissions_of(identity.role).clone(),
        }
    }

    /// Whether `identity`'s role sits at or above `required` in the hierarchy.
    pub fn has_role_level(&self, identity: Option<&Identity>, required: Role) -> bool {
        self.decide_role_level(identity, required).is_allowed()
    }

    /// [`Engine::has_role_level`] with the granting rule.
    pub fn decide_role_level(&self, identity: Option<&Identity>, required: Role) -> Decision {
        let Some(identity) = identity else {
            return Decision::Deny;
        };
        if let Some(grant) = bypass_grant(identity) {
            return Decision::Allow(grant);
        }
        let required_level = self.registry.level_of(required);
        // An unconfigured requirement must not be satisfiable by level 0 roles.
        if required_level == 0 {
            return Decision::Deny;
        }
        if self.registry.level_of(identity.role) >= required_level {
            Decision::Allow(Grant::RoleLevel)
        } else {
            Decision::Deny
        }
    }

    /// Role level check for a role name that crossed a serialization boundary.
    pub fn has_role_level_named(&self, identity: Option<&Identity>, required: &str) -> bool {
        match required.parse::<Role>() {
            Ok(role) => self.has_role_level(identity, role),
            Err(err) => {
                tracing::debug!(%err, "unrecognized required role, denying");
                false
            }
        }
    }
}

/// Universal bypass shared by every check: super admin first, then admin.
pub(crate) fn bypass_grant(identity: &Identity) -> Option<Grant> {
    if identity.is_super_admin {
        Some(Grant::SuperAdmin)
    } else if identity.role == Role::Admin {
        Some(Grant::Admin)
    } else {
        None
    }
}
