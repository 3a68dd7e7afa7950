use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

const MAX_ID_LEN: usize = 128;

fn validate_id(value: &str, kind: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidId(format!("{kind} must not be empty")));
    }
    if trimmed.len() > MAX_ID_LEN {
        return Err(Error::InvalidId(format!(
            "{kind} length must be <= {MAX_ID_LEN}"
        )));
    }
    if !trimmed.chars().all(is_allowed_id_char) {
        return Err(Error::InvalidId(format!("{kind} contains invalid characters")));
    }
    Ok(trimmed.to_string())
}

fn is_allowed_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, ':' | '_' | '-')
}

macro_rules! define_id_type {
    ($(#[$doc:meta])* $name:ident, $kind:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
        pub struct $name(String);

        impl $name {
            /// Creates a validated identifier.
            pub fn new(value: impl AsRef<str>) -> Result<Self> {
                validate_id(value.as_ref(), $kind).map(Self)
            }

            /// Returns the underlying string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<&str> for $name {
            type Error = Error;

            fn try_from(value: &str) -> Result<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id_type!(
    /// User (principal) identifier.
    UserId,
    "user id"
);
define_id_type!(
    /// Club identifier, the organizational scope for owner/trainer/member checks.
    ClubId,
    "club id"
);

/// Kind of resource a modification check is made against.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResourceKind {
    /// Calendar event.
    Event,
    /// Team inside a club.
    Team,
    /// Club record.
    Club,
    /// User profile record.
    User,
}

impl ResourceKind {
    /// Every resource kind.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Event,
        ResourceKind::Team,
        ResourceKind::Club,
        ResourceKind::User,
    ];

    /// Returns the wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Event => "event",
            ResourceKind::Team => "team",
            ResourceKind::Club => "club",
            ResourceKind::User => "user",
        }
    }

    /// Whether trainers of the owning club may modify this kind of resource.
    pub const fn trainer_modifiable(self) -> bool {
        match self {
            ResourceKind::Event | ResourceKind::Team => true,
            ResourceKind::Club | ResourceKind::User => false,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownResourceKind(trimmed.to_string()))
    }
}

impl TryFrom<&str> for ResourceKind {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

/// Resource a caller wants to modify, as fetched from the resource store.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ResourceDescriptor {
    /// Resource kind.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ResourceKind,
    /// User that owns (created) the resource.
    pub owner_id: UserId,
    /// Club the resource belongs to, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub club_id: Option<ClubId>,
}

impl ResourceDescriptor {
    /// Creates a descriptor without a club scope.
    pub fn new(kind: ResourceKind, owner_id: UserId) -> Self {
        Self {
            kind,
            owner_id,
            club_id: None,
        }
    }

    /// Sets the club scope.
    pub fn in_club(mut self, club_id: ClubId) -> Self {
        self.club_id = Some(club_id);
        self
    }
}
