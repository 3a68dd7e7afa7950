//! Serialized role tables.
//!
//! A [`RegistryTable`] lets deployments ship an alternate role table as
//! JSON/TOML/YAML. Names are matched against the closed role and permission
//! sets; anything unrecognized is dropped rather than trusted.

use crate::error::Result;
use crate::permission::Permission;
use crate::registry::{RoleRegistry, RoleRegistryBuilder};
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialized form of a [`RoleRegistry`], keyed by role wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryTable {
    /// Entry per role.
    pub roles: BTreeMap<String, RoleTableEntry>,
}

/// One role's level and permission names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTableEntry {
    /// Hierarchy level.
    pub level: u8,
    /// Permission wire names.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RoleRegistry {
    /// Builds and validates a registry from a serialized table.
    pub fn from_table(table: &RegistryTable) -> Result<Self> {
        let mut builder = RoleRegistryBuilder::new();
        for (name, entry) in &table.roles {
            let role = match name.parse::<Role>() {
                Ok(role) => role,
                Err(err) => {
                    tracing::warn!(%err, "skipping unknown role in registry table");
                    continue;
                }
            };
            builder = builder.level(role, entry.level);
            let permissions = entry.permissions.iter().filter_map(|name| {
                Permission::parse(name)
                    .inspect_err(|err| {
                        tracing::warn!(%err, %role, "skipping unknown permission");
                    })
                    .ok()
            });
            builder = builder.grants(role, permissions);
        }
        let registry = builder.build();
        registry.validate()?;
        tracing::debug!(roles = table.roles.len(), "loaded role registry table");
        Ok(registry)
    }

    /// Serializable form of this registry.
    pub fn to_table(&self) -> RegistryTable {
        let roles = Role::ALL
            .into_iter()
            .map(|role| {
                let entry = RoleTableEntry {
                    level: self.level_of(role),
                    permissions: self
                        .permissions_of(role)
                        .iter()
                        .map(|p| p.as_str().to_string())
                        .collect(),
                };
                (role.as_str().to_string(), entry)
            })
            .collect();
        RegistryTable { roles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn admin_entry() -> RoleTableEntry {
        RoleTableEntry {
            level: 5,
            permissions: Permission::ALL
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }

    #[test]
    fn standard_table_should_survive_serialization() {
        let standard = RoleRegistry::standard();
        let json = serde_json::to_string(&standard.to_table()).unwrap();
        let table: RegistryTable = serde_json::from_str(&json).unwrap();

        assert_eq!(RoleRegistry::from_table(&table).unwrap(), standard);
    }

    #[test]
    fn unknown_names_should_be_dropped() {
        let mut table = RegistryTable::default();
        table.roles.insert("admin".to_string(), admin_entry());
        table.roles.insert(
            "trainer".to_string(),
            RoleTableEntry {
                level: 3,
                permissions: vec!["event:create".to_string(), "event:teleport".to_string()],
            },
        );
        table.roles.insert(
            "wizard".to_string(),
            RoleTableEntry {
                level: 9,
                permissions: vec!["club:delete".to_string()],
            },
        );

        let registry = RoleRegistry::from_table(&table).unwrap();
        assert_eq!(registry.permissions_of(Role::Trainer).len(), 1);
        assert!(registry.grants(Role::Trainer, Permission::EventCreate));
        assert_eq!(registry.level_of_name("wizard"), 0);
    }

    #[test]
    fn table_should_be_validated() {
        let json = r#"{ "roles": { "admin": { "level": 5, "permissions": ["club:read"] } } }"#;
        let table: RegistryTable = serde_json::from_str(json).unwrap();

        assert!(matches!(
            RoleRegistry::from_table(&table),
            Err(Error::InvalidRegistry(_))
        ));
    }

    #[test]
    fn missing_permissions_field_defaults_to_empty() {
        let admin_permissions: Vec<&str> = Permission::ALL.iter().map(|p| p.as_str()).collect();
        let value = serde_json::json!({
            "roles": {
                "admin": { "level": 5, "permissions": admin_permissions },
                "user": { "level": 1 }
            }
        });
        let table: RegistryTable = serde_json::from_value(value).unwrap();
        let registry = RoleRegistry::from_table(&table).unwrap();

        assert_eq!(registry.level_of(Role::User), 1);
        assert!(registry.permissions_of(Role::User).is_empty());
    }
}
