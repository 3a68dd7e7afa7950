use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Role held by a principal.
///
/// Roles have no `Ord`: compare them through registry levels. `User` and
/// `Parent` share the lowest level, so the hierarchy is a pre-order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Owner of one or more clubs.
    ClubOwner,
    /// Team trainer.
    Trainer,
    /// Assistant trainer.
    Assistant,
    /// Regular member.
    User,
    /// Parent of one or more members.
    Parent,
}

impl Role {
    /// Every role, highest level first.
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::ClubOwner,
        Role::Trainer,
        Role::Assistant,
        Role::User,
        Role::Parent,
    ];

    /// Returns the wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ClubOwner => "clubOwner",
            Role::Trainer => "trainer",
            Role::Assistant => "assistant",
            Role::User => "user",
            Role::Parent => "parent",
        }
    }

    /// Hierarchy level used by the standard registry.
    pub const fn default_level(self) -> u8 {
        match self {
            Role::Admin => 5,
            Role::ClubOwner => 4,
            Role::Trainer => 3,
            Role::Assistant => 2,
            Role::User | Role::Parent => 1,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    /// Parses an exact wire name, ignoring surrounding whitespace only.
    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == trimmed)
            .ok_or_else(|| Error::UnknownRole(trimmed.to_string()))
    }
}

impl TryFrom<&str> for Role {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}
