//! Entity references - Typed and raw handles to table-backed entities

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named, table-backed data type that can participate in relationships.
///
/// Implementors only declare their backing table; the short type name used
/// by the naming conventions is derived from the Rust type itself.
pub trait Entity {
    /// Name of the table backing this entity.
    fn table_name() -> &'static str;

    /// Short type name consulted by the naming conventions.
    fn entity_name() -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Reference to one side of a relationship.
///
/// The `Table` variant is the escape hatch for tables that are not modeled
/// as an entity type; every naming inference is bypassed for it and the raw
/// string is used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    /// Raw table name with all naming inference bypassed
    Table(String),
    /// Handle to a registered entity type
    Entity { table: String, type_name: String },
}

impl EntityRef {
    /// Build a typed reference from an [`Entity`] implementor.
    pub fn of<E: Entity>() -> Self {
        Self::Entity {
            table: E::table_name().to_string(),
            type_name: E::entity_name().to_string(),
        }
    }

    /// Build a raw table-name reference.
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table(name.into())
    }

    /// The table name this reference resolves to.
    pub fn table_name(&self) -> &str {
        match self {
            Self::Table(name) => name,
            Self::Entity { table, .. } => table,
        }
    }

    /// The entity type name, if this is a typed reference.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Table(_) => None,
            Self::Entity { type_name, .. } => Some(type_name),
        }
    }

    /// Returns true for the raw table-name escape hatch.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Table(_))
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(name) => f.write_str(name),
            Self::Entity { type_name, .. } => f.write_str(type_name),
        }
    }
}

impl From<&str> for EntityRef {
    fn from(name: &str) -> Self {
        Self::Table(name.to_string())
    }
}

impl From<String> for EntityRef {
    fn from(name: String) -> Self {
        Self::Table(name)
    }
}
