//! Authorization engine for club and team management.
//!
//! This crate provides a closed role hierarchy with flat permission sets,
//! club-scoped ownership/trainer/membership checks, resource modification
//! rules and user-management delegation. Every check is a pure, synchronous
//! function of its arguments and fails closed: an absent identity or an
//! unrecognized name is always denied. Use [`Engine`] for role and
//! permission checks, [`Engine::scopes`] for club-scoped checks and
//! [`Engine::delegation`] for user management.
//!
//! # Examples
//!
//! ```
//! use club_authz::{ClubId, Engine, Identity, Permission, ResourceKind, Role, UserId};
//!
//! let engine = Engine::default();
//! let c1 = ClubId::try_from("c1").unwrap();
//! let trainer = Identity::new(UserId::try_from("u2").unwrap(), Role::Trainer)
//!     .member_of(c1.clone());
//! let owner = UserId::try_from("u1").unwrap();
//!
//! assert!(engine.can(Some(&trainer), Permission::EventCreate));
//! assert!(engine
//!     .scopes()
//!     .can_modify_resource(Some(&trainer), ResourceKind::Event, &owner, Some(&c1)));
//! assert!(!engine
//!     .scopes()
//!     .can_modify_resource(Some(&trainer), ResourceKind::Club, &owner, Some(&c1)));
//! ```
//!
//! Substituting a role table, e.g. in tests:
//! ```
//! use club_authz::{Engine, Identity, Permission, Role, RoleRegistry, UserId};
//! use std::sync::Arc;
//!
//! let registry = RoleRegistry::builder()
//!     .level(Role::User, 1)
//!     .grant(Role::User, Permission::ChatModerate)
//!     .build();
//! let engine = Engine::new(Arc::new(registry));
//! let user = Identity::new(UserId::try_from("u1").unwrap(), Role::User);
//! assert!(engine.can(Some(&user), Permission::ChatModerate));
//! ```
#![forbid(unsafe_code)]

mod delegation;
mod engine;
mod error;
mod identity;
mod permission;
mod registry;
mod role;
mod scope;
mod types;

#[cfg(feature = "serde")]
mod config;

#[cfg(feature = "axum")]
pub mod axum;

pub use crate::delegation::DelegationPolicy;
pub use crate::engine::{Decision, Engine, Grant};
pub use crate::error::{Error, Result};
pub use crate::identity::Identity;
pub use crate::permission::{Permission, PermissionCategory, PermissionSet};
pub use crate::registry::{RoleRegistry, RoleRegistryBuilder, default_grants};
pub use crate::role::Role;
pub use crate::scope::ScopeResolver;
pub use crate::types::{ClubId, ResourceDescriptor, ResourceKind, UserId};

#[cfg(feature = "serde")]
pub use crate::config::{RegistryTable, RoleTableEntry};
