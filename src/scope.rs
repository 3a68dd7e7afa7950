use crate::engine::{Decision, Engine, Grant, bypass_grant};
use crate::identity::Identity;
use crate::role::Role;
use crate::types::{ClubId, ResourceDescriptor, ResourceKind, UserId};

/// Club-scoped relationship checks.
///
/// Obtained from [`Engine::scopes`]; borrows the engine for base role checks.
#[derive(Debug, Clone, Copy)]
pub struct ScopeResolver<'e> {
    engine: &'e Engine,
}

impl<'e> ScopeResolver<'e> {
    pub(crate) fn new(engine: &'e Engine) -> Self {
        Self { engine }
    }

    /// Returns the underlying engine.
    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    /// Whether `identity` owns `club`, or any club when `club` is `None`.
    pub fn is_club_owner(&self, identity: Option<&Identity>, club: Option<&ClubId>) -> bool {
        self.decide_club_owner(identity, club).is_allowed()
    }

    /// [`ScopeResolver::is_club_owner`] with the granting rule.
    pub fn decide_club_owner(
        &self,
        identity: Option<&Identity>,
        club: Option<&ClubId>,
    ) -> Decision {
        let Some(identity) = identity else {
            return Decision::Deny;
        };
        if let Some(grant) = bypass_grant(identity) {
            return Decision::Allow(grant);
        }
        if identity.role != Role::ClubOwner {
            return Decision::Deny;
        }
        let owns = match club {
            None => !identity.owned_club_ids.is_empty(),
            Some(club) => identity.owned_club_ids.contains(club),
        };
        if owns {
            Decision::Allow(Grant::ClubOwner)
        } else {
            Decision::Deny
        }
    }

    /// Whether `identity` is at trainer level, within `club` when given.
    ///
    /// This is a level check: club owners pass it too.
    pub fn is_trainer(&self, identity: Option<&Identity>, club: Option<&ClubId>) -> bool {
        self.decide_trainer(identity, club).is_allowed()
    }

    /// [`ScopeResolver::is_trainer`] with the granting rule.
    pub fn decide_trainer(&self, identity: Option<&Identity>, club: Option<&ClubId>) -> Decision {
        let Some(identity) = identity else {
            return Decision::Deny;
        };
        if let Some(grant) = bypass_grant(identity) {
            return Decision::Allow(grant);
        }
        if !self.engine.has_role_level(Some(identity), Role::Trainer) {
            return Decision::Deny;
        }
        match club {
            Some(club) if !identity.club_ids.contains(club) => Decision::Deny,
            _ => Decision::Allow(Grant::ClubTrainer),
        }
    }

    /// Whether `identity` belongs to `club`.
    pub fn is_club_member(&self, identity: Option<&Identity>, club: &ClubId) -> bool {
        self.decide_club_member(identity, club).is_allowed()
    }

    /// [`ScopeResolver::is_club_member`] with the granting rule.
    pub fn decide_club_member(&self, identity: Option<&Identity>, club: &ClubId) -> Decision {
        let Some(identity) = identity else {
            return Decision::Deny;
        };
        if let Some(grant) = bypass_grant(identity) {
            return Decision::Allow(grant);
        }
        if identity.club_ids.contains(club) {
            Decision::Allow(Grant::ClubMember)
        } else {
            Decision::Deny
        }
    }

    /// Whether `identity` may modify a resource of `kind` owned by `owner`.
    ///
    /// Rules apply in order: bypass, self-ownership, club owner, then
    /// trainer of the club for events and teams only.
    pub fn can_modify_resource(
        &self,
        identity: Option<&Identity>,
        kind: ResourceKind,
        owner: &UserId,
        club: Option<&ClubId>,
    ) -> bool {
        self.decide_modify_resource(identity, kind, owner, club)
            .is_allowed()
    }

    /// [`ScopeResolver::can_modify_resource`] with the granting rule.
    pub fn decide_modify_resource(
        &self,
        identity: Option<&Identity>,
        kind: ResourceKind,
        owner: &UserId,
        club: Option<&ClubId>,
    ) -> Decision {
        let Some(identity) = identity else {
            return Decision::Deny;
        };
        if let Some(grant) = bypass_grant(identity) {
            return Decision::Allow(grant);
        }
        if &identity.id == owner {
            return Decision::Allow(Grant::SelfOwnership);
        }
        let Some(club) = club else {
            return Decision::Deny;
        };
        if self.is_club_owner(Some(identity), Some(club)) {
            return Decision::Allow(Grant::ClubOwner);
        }
        if kind.trainer_modifiable() && self.is_trainer(Some(identity), Some(club)) {
            return Decision::Allow(Grant::ClubTrainer);
        }
        Decision::Deny
    }

    /// [`ScopeResolver::can_modify_resource`] over a fetched descriptor.
    pub fn can_modify(&self, identity: Option<&Identity>, resource: &ResourceDescriptor) -> bool {
        self.can_modify_resource(
            identity,
            resource.kind,
            &resource.owner_id,
            resource.club_id.as_ref(),
        )
    }

    /// Whether `identity` holds the parent role.
    pub fn has_parent_role(&self, identity: Option<&Identity>) -> bool {
        identity.is_some_and(|identity| identity.role == Role::Parent)
    }

    /// Whether `identity` has at least one linked child.
    pub fn has_linked_children(&self, identity: Option<&Identity>) -> bool {
        identity.is_some_and(|identity| !identity.child_ids.is_empty())
    }

    /// Whether `identity` acts as a parent: parent role or linked children.
    // Either signal alone counts; whether non-parent roles with children
    // should be treated identically everywhere is still a product question.
    pub fn is_parent(&self, identity: Option<&Identity>) -> bool {
        self.has_parent_role(identity) || self.has_linked_children(identity)
    }

    /// Whether `child` is linked to `identity`.
    pub fn is_parent_of(&self, identity: Option<&Identity>, child: &UserId) -> bool {
        identity.is_some_and(|identity| identity.child_ids.contains(child))
    }
}
