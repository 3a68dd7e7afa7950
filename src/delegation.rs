use crate::engine::{Decision, Grant};
use crate::identity::Identity;
use crate::role::Role;
use crate::scope::ScopeResolver;

/// Rules for one identity acting administratively on another
/// (promote, demote, remove).
///
/// Obtained from [`Engine::delegation`](crate::Engine::delegation).
#[derive(Debug, Clone, Copy)]
pub struct DelegationPolicy<'e> {
    scopes: ScopeResolver<'e>,
}

impl<'e> DelegationPolicy<'e> {
    pub(crate) fn new(scopes: ScopeResolver<'e>) -> Self {
        Self { scopes }
    }

    /// Whether `actor` may change `target`'s role or membership.
    pub fn can_manage_user(&self, actor: Option<&Identity>, target: Option<&Identity>) -> bool {
        self.decide_manage_user(actor, target).is_allowed()
    }

    /// [`DelegationPolicy::can_manage_user`] with the granting rule.
    pub fn decide_manage_user(
        &self,
        actor: Option<&Identity>,
        target: Option<&Identity>,
    ) -> Decision {
        let (Some(actor), Some(target)) = (actor, target) else {
            return Decision::Deny;
        };
        // Nobody manages themselves, super admins included.
        if actor.id == target.id {
            return Decision::Deny;
        }
        if actor.is_super_admin {
            return Decision::Allow(Grant::SuperAdmin);
        }
        match actor.role {
            Role::Admin if target.role != Role::Admin => Decision::Allow(Grant::Admin),
            Role::ClubOwner if self.owns_club_of(actor, target) => {
                Decision::Allow(Grant::SharedClub)
            }
            _ => Decision::Deny,
        }
    }

    /// Whether `actor` may give `target` the role `role`.
    ///
    /// Requires [`DelegationPolicy::can_manage_user`]; outside of super
    /// admins the assigned role must sit strictly below the actor's level.
    pub fn can_assign_role(
        &self,
        actor: Option<&Identity>,
        target: Option<&Identity>,
        role: Role,
    ) -> bool {
        if !self.can_manage_user(actor, target) {
            return false;
        }
        actor.is_some_and(|actor| self.may_assign(actor, role))
    }

    /// Roles `actor` could assign to someone they manage, highest first.
    pub fn assignable_roles(&self, actor: Option<&Identity>) -> Vec<Role> {
        let Some(actor) = actor else {
            return Vec::new();
        };
        Role::ALL
            .into_iter()
            .filter(|role| self.may_assign(actor, *role))
            .collect()
    }

    fn may_assign(&self, actor: &Identity, role: Role) -> bool {
        if actor.is_super_admin {
            return true;
        }
        let registry = self.scopes.engine().registry();
        registry.level_of(actor.role) > registry.level_of(role)
    }

    fn owns_club_of(&self, actor: &Identity, target: &Identity) -> bool {
        target
            .club_ids
            .iter()
            .any(|club| self.scopes.is_club_owner(Some(actor), Some(club)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::types::{ClubId, UserId};

    fn user(id: &str) -> UserId {
        UserId::try_from(id).unwrap()
    }

    fn club(id: &str) -> ClubId {
        ClubId::try_from(id).unwrap()
    }

    #[test]
    fn self_management_should_be_denied_even_for_super_admin() {
        let engine = Engine::default();
        let root = Identity::new(user("a"), Role::Admin).super_admin(true);
        assert!(!engine.delegation().can_manage_user(Some(&root), Some(&root)));
    }

    #[test]
    fn self_management_should_compare_normalized_ids() {
        let engine = Engine::default();
        let padded = UserId::try_from(String::from(" root")).unwrap();
        let actor = Identity::new(padded, Role::User).super_admin(true);
        let target = Identity::new(user("root"), Role::User).super_admin(true);
        assert!(!engine.delegation().can_manage_user(Some(&actor), Some(&target)));
    }

    #[test]
    fn super_admin_should_manage_peer_admins() {
        let engine = Engine::default();
        let root = Identity::new(user("root"), Role::User).super_admin(true);
        let admin = Identity::new(user("adm"), Role::Admin);
        assert_eq!(
            engine.delegation().decide_manage_user(Some(&root), Some(&admin)),
            Decision::Allow(Grant::SuperAdmin)
        );
    }

    #[test]
    fn admin_should_manage_non_admins_only() {
        let engine = Engine::default();
        let delegation = engine.delegation();
        let admin = Identity::new(user("a1"), Role::Admin);
        let peer = Identity::new(user("a2"), Role::Admin);
        let owner = Identity::new(user("o"), Role::ClubOwner);

        assert!(delegation.can_manage_user(Some(&admin), Some(&owner)));
        assert!(!delegation.can_manage_user(Some(&admin), Some(&peer)));
    }

    #[test]
    fn club_owner_should_manage_members_of_owned_clubs() {
        let engine = Engine::default();
        let delegation = engine.delegation();
        let owner = Identity::new(user("a"), Role::ClubOwner).owns_club(club("c1"));
        let inside = Identity::new(user("b"), Role::User).member_of(club("c1"));
        let outside = Identity::new(user("c"), Role::User).member_of(club("c2"));

        assert_eq!(
            delegation.decide_manage_user(Some(&owner), Some(&inside)),
            Decision::Allow(Grant::SharedClub)
        );
        assert!(!delegation.can_manage_user(Some(&owner), Some(&outside)));
    }

    #[test]
    fn club_owner_should_manage_other_roles_inside_owned_clubs() {
        let engine = Engine::default();
        let owner = Identity::new(user("a"), Role::ClubOwner).owns_club(club("c1"));
        let admin_member = Identity::new(user("z"), Role::Admin).member_of(club("c1"));
        assert!(engine
            .delegation()
            .can_manage_user(Some(&owner), Some(&admin_member)));
    }

    #[test]
    fn lower_roles_should_not_manage_anyone() {
        let engine = Engine::default();
        let delegation = engine.delegation();
        let target = Identity::new(user("b"), Role::User).member_of(club("c1"));

        for role in [Role::Trainer, Role::Assistant, Role::User, Role::Parent] {
            let actor = Identity::new(user("a"), role)
                .member_of(club("c1"))
                .owns_club(club("c1"));
            assert!(!delegation.can_manage_user(Some(&actor), Some(&target)), "{role}");
        }
    }

    #[test]
    fn absent_parties_should_be_denied() {
        let engine = Engine::default();
        let delegation = engine.delegation();
        let admin = Identity::new(user("a"), Role::Admin);

        assert!(!delegation.can_manage_user(None, Some(&admin)));
        assert!(!delegation.can_manage_user(Some(&admin), None));
        assert!(delegation.assignable_roles(None).is_empty());
    }

    #[test]
    fn assign_role_should_stay_below_actor_level() {
        let engine = Engine::default();
        let delegation = engine.delegation();
        let owner = Identity::new(user("a"), Role::ClubOwner).owns_club(club("c1"));
        let member = Identity::new(user("b"), Role::User).member_of(club("c1"));

        assert!(delegation.can_assign_role(Some(&owner), Some(&member), Role::Trainer));
        assert!(!delegation.can_assign_role(Some(&owner), Some(&member), Role::ClubOwner));
        assert!(!delegation.can_assign_role(Some(&owner), Some(&member), Role::Admin));
    }

    #[test]
    fn assign_role_requires_management_rights() {
        let engine = Engine::default();
        let owner = Identity::new(user("a"), Role::ClubOwner).owns_club(club("c1"));
        let stranger = Identity::new(user("b"), Role::User).member_of(club("c2"));
        assert!(!engine
            .delegation()
            .can_assign_role(Some(&owner), Some(&stranger), Role::User));
    }

    #[test]
    fn assignable_roles_by_actor() {
        let engine = Engine::default();
        let delegation = engine.delegation();
        let admin = Identity::new(user("a"), Role::Admin);
        let owner = Identity::new(user("o"), Role::ClubOwner);
        let root = Identity::new(user("r"), Role::User).super_admin(true);

        assert_eq!(
            delegation.assignable_roles(Some(&admin)),
            vec![
                Role::ClubOwner,
                Role::Trainer,
                Role::Assistant,
                Role::User,
                Role::Parent
            ]
        );
        assert_eq!(
            delegation.assignable_roles(Some(&owner)),
            vec![Role::Trainer, Role::Assistant, Role::User, Role::Parent]
        );
        assert_eq!(delegation.assignable_roles(Some(&root)), Role::ALL.to_vec());
    }
}
