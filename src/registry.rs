use crate::error::{Error, Result};
use crate::permission::{Permission, PermissionSet};
use crate::role::Role;
use std::collections::HashMap;

use Permission::*;

const CLUB_OWNER_GRANTS: &[Permission] = &[
    ClubCreate,
    ClubRead,
    ClubUpdate,
    ClubDelete,
    ClubManageMembers,
    ClubInvite,
    TeamCreate,
    TeamRead,
    TeamUpdate,
    TeamDelete,
    TeamManagePlayers,
    TeamManageTrainers,
    EventCreate,
    EventRead,
    EventUpdate,
    EventDelete,
    EventRespond,
    EventManageAttendance,
    ChatRead,
    ChatSend,
    ChatCreateRoom,
    ChatModerate,
    ChatDeleteMessage,
    RoleAssign,
    RoleRevoke,
    RolePromoteTrainer,
    AccountRead,
    AccountUpdate,
    AccountDelete,
    AccountUploadPhoto,
];

const TRAINER_GRANTS: &[Permission] = &[
    ClubRead,
    TeamRead,
    TeamUpdate,
    TeamManagePlayers,
    EventCreate,
    EventRead,
    EventUpdate,
    EventDelete,
    EventRespond,
    EventManageAttendance,
    ChatRead,
    ChatSend,
    ChatCreateRoom,
    ChatModerate,
    ChatDeleteMessage,
    AccountRead,
    AccountUpdate,
    AccountDelete,
    AccountUploadPhoto,
];

const ASSISTANT_GRANTS: &[Permission] = &[
    ClubRead,
    TeamRead,
    EventCreate,
    EventRead,
    EventUpdate,
    EventRespond,
    EventManageAttendance,
    ChatRead,
    ChatSend,
    ChatCreateRoom,
    AccountRead,
    AccountUpdate,
    AccountDelete,
    AccountUploadPhoto,
];

const USER_GRANTS: &[Permission] = &[
    ClubRead,
    TeamRead,
    EventRead,
    EventRespond,
    ChatRead,
    ChatSend,
    AccountRead,
    AccountUpdate,
    AccountDelete,
    AccountUploadPhoto,
];

const PARENT_GRANTS: &[Permission] = &[
    ClubRead,
    TeamRead,
    EventRead,
    EventRespond,
    ChatRead,
    ChatSend,
    AccountRead,
    AccountUpdate,
    AccountDelete,
    AccountUploadPhoto,
    ParentViewChildren,
    ParentManageChildren,
    ParentRespondForChild,
    ParentLinkChild,
];

/// Permissions granted to `role` by the standard table.
pub const fn default_grants(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => Permission::ALL,
        Role::ClubOwner => CLUB_OWNER_GRANTS,
        Role::Trainer => TRAINER_GRANTS,
        Role::Assistant => ASSISTANT_GRANTS,
        Role::User => USER_GRANTS,
        Role::Parent => PARENT_GRANTS,
    }
}

/// Immutable role table: hierarchy levels and flat permission sets.
///
/// Build one at startup and share it behind an `Arc`; lookups for roles
/// missing from a substitute table fail closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRegistry {
    levels: HashMap<Role, u8>,
    grants: HashMap<Role, PermissionSet>,
    empty: PermissionSet,
}

impl RoleRegistry {
    /// Returns the built-in table.
    pub fn standard() -> Self {
        let mut builder = RoleRegistryBuilder::new();
        for role in Role::ALL {
            builder = builder
                .level(role, role.default_level())
                .grants(role, default_grants(role).iter().copied());
        }
        builder.build()
    }

    /// Starts an empty table.
    pub fn builder() -> RoleRegistryBuilder {
        RoleRegistryBuilder::new()
    }

    /// Hierarchy level of `role`; 0 when the table has no entry.
    pub fn level_of(&self, role: Role) -> u8 {
        self.levels.get(&role).copied().unwrap_or(0)
    }

    /// Permission set of `role`; empty when the table has no entry.
    pub fn permissions_of(&self, role: Role) -> &PermissionSet {
        self.grants.get(&role).unwrap_or(&self.empty)
    }

    /// Level lookup for a role name that crossed a serialization boundary.
    pub fn level_of_name(&self, name: &str) -> u8 {
        match name.parse::<Role>() {
            Ok(role) => self.level_of(role),
            Err(err) => {
                tracing::debug!(%err, "unrecognized role name, using level 0");
                0
            }
        }
    }

    /// Permission lookup for a role name that crossed a serialization boundary.
    pub fn permissions_of_name(&self, name: &str) -> &PermissionSet {
        match name.parse::<Role>() {
            Ok(role) => self.permissions_of(role),
            Err(err) => {
                tracing::debug!(%err, "unrecognized role name, granting nothing");
                &self.empty
            }
        }
    }

    /// Whether `role` explicitly holds `permission` in this table.
    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.permissions_of(role).contains(&permission)
    }

    /// Checks the table invariants.
    ///
    /// Admin must hold the whole universe and sit strictly above every
    /// other role.
    pub fn validate(&self) -> Result<()> {
        let admin = self.permissions_of(Role::Admin);
        if let Some(missing) = Permission::ALL.iter().find(|p| !admin.contains(*p)) {
            return Err(Error::InvalidRegistry(format!(
                "admin is missing permission {missing}"
            )));
        }
        let admin_level = self.level_of(Role::Admin);
        for role in Role::ALL.into_iter().filter(|role| *role != Role::Admin) {
            if self.level_of(role) >= admin_level {
                return Err(Error::InvalidRegistry(format!(
                    "role {role} level {} must be below admin level {admin_level}",
                    self.level_of(role)
                )));
            }
        }
        Ok(())
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for [`RoleRegistry`].
#[derive(Debug, Default, Clone)]
pub struct RoleRegistryBuilder {
    levels: HashMap<Role, u8>,
    grants: HashMap<Role, PermissionSet>,
}

impl RoleRegistryBuilder {
    /// Creates a builder with no roles configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hierarchy level of a role.
    pub fn level(mut self, role: Role, level: u8) -> Self {
        self.levels.insert(role, level);
        self
    }

    /// Grants one permission to a role.
    pub fn grant(mut self, role: Role, permission: Permission) -> Self {
        self.grants.entry(role).or_default().insert(permission);
        self
    }

    /// Grants several permissions to a role.
    pub fn grants(mut self, role: Role, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.grants.entry(role).or_default().extend(permissions);
        self
    }

    /// Builds the registry without validating it.
    pub fn build(self) -> RoleRegistry {
        RoleRegistry {
            levels: self.levels,
            grants: self.grants,
            empty: PermissionSet::new(),
        }
    }
}
