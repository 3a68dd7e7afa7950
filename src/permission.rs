use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Set of permissions held by a role or identity.
pub type PermissionSet = BTreeSet<Permission>;

/// Functional area a permission belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PermissionCategory {
    /// Club lifecycle and membership.
    Club,
    /// Team rosters and staff.
    Team,
    /// Calendar events and attendance.
    Event,
    /// Chat rooms and moderation.
    Chat,
    /// Promoting, assigning and revoking roles.
    RoleManagement,
    /// Platform administration.
    Admin,
    /// The caller's own account.
    Account,
    /// Acting for linked children.
    Parent,
}

// Expands the enum, its wire names and `Permission::ALL` from one list so
// the universe cannot fall out of sync with the variants.
macro_rules! define_permissions {
    ($($(#[$doc:meta])* $variant:ident => $category:ident, $name:literal;)+) => {
        /// Capability an identity may hold (`category:action`).
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Permission {
            $(
                $(#[$doc])*
                #[cfg_attr(feature = "serde", serde(rename = $name))]
                $variant,
            )+
        }

        impl Permission {
            /// The full permission universe.
            pub const ALL: &'static [Permission] = &[$(Permission::$variant,)+];

            /// Returns the wire name.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Permission::$variant => $name,)+
                }
            }

            /// Returns the functional area.
            pub const fn category(self) -> PermissionCategory {
                match self {
                    $(Permission::$variant => PermissionCategory::$category,)+
                }
            }
        }
    };
}

define_permissions! {
    ClubCreate => Club, "club:create";
    ClubRead => Club, "club:read";
    ClubUpdate => Club, "club:update";
    ClubDelete => Club, "club:delete";
    /// Add or remove club members.
    ClubManageMembers => Club, "club:manage_members";
    ClubInvite => Club, "club:invite";

    TeamCreate => Team, "team:create";
    TeamRead => Team, "team:read";
    TeamUpdate => Team, "team:update";
    TeamDelete => Team, "team:delete";
    TeamManagePlayers => Team, "team:manage_players";
    TeamManageTrainers => Team, "team:manage_trainers";

    EventCreate => Event, "event:create";
    EventRead => Event, "event:read";
    EventUpdate => Event, "event:update";
    EventDelete => Event, "event:delete";
    /// Accept or decline an event invitation.
    EventRespond => Event, "event:respond";
    EventManageAttendance => Event, "event:manage_attendance";

    ChatRead => Chat, "chat:read";
    ChatSend => Chat, "chat:send";
    ChatCreateRoom => Chat, "chat:create_room";
    ChatModerate => Chat, "chat:moderate";
    ChatDeleteMessage => Chat, "chat:delete_message";

    RoleAssign => RoleManagement, "role:assign";
    RoleRevoke => RoleManagement, "role:revoke";
    RolePromoteTrainer => RoleManagement, "role:promote_trainer";
    RolePromoteClubOwner => RoleManagement, "role:promote_club_owner";

    /// Open the administration area.
    AdminAccess => Admin, "admin:access";
    AdminManageUsers => Admin, "admin:manage_users";
    AdminManageClubs => Admin, "admin:manage_clubs";
    AdminViewStats => Admin, "admin:view_stats";
    AdminSystemSettings => Admin, "admin:system_settings";

    AccountRead => Account, "account:read";
    AccountUpdate => Account, "account:update";
    AccountDelete => Account, "account:delete";
    AccountUploadPhoto => Account, "account:upload_photo";

    ParentViewChildren => Parent, "parent:view_children";
    ParentManageChildren => Parent, "parent:manage_children";
    /// Respond to events on behalf of a linked child.
    ParentRespondForChild => Parent, "parent:respond_for_child";
    ParentLinkChild => Parent, "parent:link_child";
}

impl Permission {
    /// Parses a wire name.
    ///
    /// This trims whitespace and compares case-insensitively.
    pub fn parse(value: impl AsRef<str>) -> Result<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::UnknownPermission(
                "permission must not be empty".to_string(),
            ));
        }
        Permission::ALL
            .iter()
            .copied()
            .find(|permission| permission.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownPermission(trimmed.to_string()))
    }

    /// Returns every permission in `category`.
    pub fn in_category(category: PermissionCategory) -> impl Iterator<Item = Permission> {
        Permission::ALL
            .iter()
            .copied()
            .filter(move |permission| permission.category() == category)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Permission {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}
