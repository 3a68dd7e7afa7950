use crate::role::Role;
use crate::types::{ClubId, UserId};
use std::collections::HashSet;

/// Acting principal, as supplied by the identity provider after
/// authentication.
///
/// The engine only reads identities; a snapshot is expected to stay
/// unchanged for the duration of one decision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Identity {
    /// User identifier.
    pub id: UserId,
    /// Assigned role.
    pub role: Role,
    /// Platform-wide bypass, independent of `role`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_super_admin: bool,
    /// Clubs this user owns.
    #[cfg_attr(feature = "serde", serde(default))]
    pub owned_club_ids: HashSet<ClubId>,
    /// Clubs this user belongs to as member or trainer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub club_ids: HashSet<ClubId>,
    /// Children linked to this user.
    #[cfg_attr(feature = "serde", serde(default))]
    pub child_ids: HashSet<UserId>,
}

impl Identity {
    /// Creates an identity with no memberships.
    pub fn new(id: UserId, role: Role) -> Self {
        Self {
            id,
            role,
            is_super_admin: false,
            owned_club_ids: HashSet::new(),
            club_ids: HashSet::new(),
            child_ids: HashSet::new(),
        }
    }

    /// Sets the super admin flag.
    pub fn super_admin(mut self, on: bool) -> Self {
        self.is_super_admin = on;
        self
    }

    /// Adds an owned club.
    pub fn owns_club(mut self, club: ClubId) -> Self {
        self.owned_club_ids.insert(club);
        self
    }

    /// Adds a club membership.
    pub fn member_of(mut self, club: ClubId) -> Self {
        self.club_ids.insert(club);
        self
    }

    /// Links a child.
    pub fn with_child(mut self, child: UserId) -> Self {
        self.child_ids.insert(child);
        self
    }

    /// Whether either universal bypass applies.
    pub(crate) fn bypasses(&self) -> bool {
        self.is_super_admin || self.role == Role::Admin
    }
}
