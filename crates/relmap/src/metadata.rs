//! Relationship metadata - Descriptor and override types consumed by the ORM layer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;
use crate::error::{RelationError, RelationResult};

/// The kind of relationship requested by the caller.
///
/// Describes cardinality and which side owns the foreign key; the builder
/// maps it onto the relation token the host ORM expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// The owner holds the foreign key pointing at the target
    BelongsToOne,
    /// The target holds the foreign key pointing at the owner; many rows
    HasMany,
    /// The target holds the foreign key pointing at the owner; one row
    HasOne,
    /// Both sides join through a junction table; many rows
    ManyToMany,
    /// Both sides join through a junction table; one row
    HasOneThrough,
}

impl RelationshipKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [RelationshipKind; 5] = [
        RelationshipKind::BelongsToOne,
        RelationshipKind::HasMany,
        RelationshipKind::HasOne,
        RelationshipKind::ManyToMany,
        RelationshipKind::HasOneThrough,
    ];

    /// Returns true if this kind resolves to a collection of related rows
    pub fn is_collection(self) -> bool {
        matches!(self, Self::HasMany | Self::ManyToMany)
    }

    /// Returns true if this kind joins through a junction table
    pub fn requires_through(self) -> bool {
        matches!(self, Self::ManyToMany | Self::HasOneThrough)
    }

    /// The relation token the ORM's mapping surface expects for this kind.
    pub fn relation_type(self) -> RelationType {
        match self {
            Self::BelongsToOne => RelationType::BelongsToOneRelation,
            Self::HasMany => RelationType::HasManyRelation,
            Self::HasOne => RelationType::HasOneRelation,
            Self::ManyToMany => RelationType::ManyToManyRelation,
            Self::HasOneThrough => RelationType::HasOneThroughRelation,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::BelongsToOne => "BelongsToOne",
            Self::HasMany => "HasMany",
            Self::HasOne => "HasOne",
            Self::ManyToMany => "ManyToMany",
            Self::HasOneThrough => "HasOneThrough",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = RelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BelongsToOne" => Ok(Self::BelongsToOne),
            "HasMany" => Ok(Self::HasMany),
            "HasOne" => Ok(Self::HasOne),
            "ManyToMany" => Ok(Self::ManyToMany),
            "HasOneThrough" => Ok(Self::HasOneThrough),
            other => Err(RelationError::InvalidRelationshipKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Relation token understood by the host ORM's mapping surface.
///
/// Serializes to the token name itself (`"BelongsToOneRelation"` etc.),
/// which is the string form the mapping configuration expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    BelongsToOneRelation,
    HasManyRelation,
    HasOneRelation,
    ManyToManyRelation,
    HasOneThroughRelation,
}

impl RelationType {
    /// Returns true if descriptors carrying this token must define a
    /// through join
    pub fn requires_through(self) -> bool {
        matches!(self, Self::ManyToManyRelation | Self::HasOneThroughRelation)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::BelongsToOneRelation => "BelongsToOneRelation",
            Self::HasManyRelation => "HasManyRelation",
            Self::HasOneRelation => "HasOneRelation",
            Self::ManyToManyRelation => "ManyToManyRelation",
            Self::HasOneThroughRelation => "HasOneThroughRelation",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-qualified `table.column` reference, or several of them for
/// composite keys.
///
/// Inference always produces the single form; the composite form only
/// enters a descriptor through caller overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Single(String),
    Composite(Vec<String>),
}

impl ColumnRef {
    /// Qualify a column against its table.
    pub fn qualified(table: &str, column: &str) -> Self {
        Self::Single(format!("{}.{}", table, column))
    }
}

impl From<&str> for ColumnRef {
    fn from(column: &str) -> Self {
        Self::Single(column.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(column: String) -> Self {
        Self::Single(column)
    }
}

impl From<Vec<String>> for ColumnRef {
    fn from(columns: Vec<String>) -> Self {
        Self::Composite(columns)
    }
}

/// Junction-table legs of a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThroughSpec {
    pub from: ColumnRef,
    pub to: ColumnRef,
}

/// How two tables are joined for one relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSpec {
    pub from: ColumnRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<ThroughSpec>,
    pub to: ColumnRef,
}

/// The unit of output: everything the ORM needs to join two entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDescriptor {
    pub relation: RelationType,
    pub target: EntityRef,
    pub join: JoinSpec,
}

impl RelationshipDescriptor {
    /// Validate that the join shape matches the relation token: a through
    /// join is present exactly for the junction-table tokens.
    pub fn validate(&self) -> RelationResult<()> {
        if self.relation.requires_through() && self.join.through.is_none() {
            return Err(RelationError::Configuration {
                message: format!("{} descriptors must define a through join", self.relation),
            });
        }

        if !self.relation.requires_through() && self.join.through.is_some() {
            return Err(RelationError::Configuration {
                message: format!("{} descriptors must not define a through join", self.relation),
            });
        }

        Ok(())
    }
}

/// Caller-supplied partial configuration; any field that is set wins over
/// the inferred default.
///
/// `from`/`to` replace the computed join reference wholesale. `through` is
/// the one exception to whole-value replacement: its keys are merged over
/// the inferred junction columns one by one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipOverrides {
    pub relation_name: Option<String>,
    pub from_table: Option<String>,
    pub to_table: Option<String>,
    pub from_field: Option<String>,
    pub to_field: Option<String>,
    pub from: Option<ColumnRef>,
    pub to: Option<ColumnRef>,
    pub through: Option<ThroughOverride>,
}

/// Partial override of the junction-table legs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThroughOverride {
    pub from: Option<ColumnRef>,
    pub to: Option<ColumnRef>,
}

impl RelationshipOverrides {
    /// Create an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the externally-visible relationship name.
    pub fn with_relation_name(mut self, name: impl Into<String>) -> Self {
        self.relation_name = Some(name.into());
        self
    }

    /// Override the table the join starts from.
    pub fn with_from_table(mut self, table: impl Into<String>) -> Self {
        self.from_table = Some(table.into());
        self
    }

    /// Override the table the join ends at.
    pub fn with_to_table(mut self, table: impl Into<String>) -> Self {
        self.to_table = Some(table.into());
        self
    }

    /// Override the column the join starts from.
    pub fn with_from_field(mut self, field: impl Into<String>) -> Self {
        self.from_field = Some(field.into());
        self
    }

    /// Override the column the join ends at.
    pub fn with_to_field(mut self, field: impl Into<String>) -> Self {
        self.to_field = Some(field.into());
        self
    }

    /// Replace the computed `from` reference wholesale.
    pub fn with_from(mut self, from: impl Into<ColumnRef>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Replace the computed `to` reference wholesale.
    pub fn with_to(mut self, to: impl Into<ColumnRef>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Override only the `from` leg of the junction join.
    pub fn with_through_from(mut self, from: impl Into<ColumnRef>) -> Self {
        self.through.get_or_insert_with(ThroughOverride::default).from = Some(from.into());
        self
    }

    /// Override only the `to` leg of the junction join.
    pub fn with_through_to(mut self, to: impl Into<ColumnRef>) -> Self {
        self.through.get_or_insert_with(ThroughOverride::default).to = Some(to.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_predicates() {
        assert!(RelationshipKind::HasMany.is_collection());
        assert!(RelationshipKind::ManyToMany.is_collection());
        assert!(!RelationshipKind::BelongsToOne.is_collection());
        assert!(!RelationshipKind::HasOne.is_collection());
        assert!(!RelationshipKind::HasOneThrough.is_collection());

        assert!(RelationshipKind::ManyToMany.requires_through());
        assert!(RelationshipKind::HasOneThrough.requires_through());
        assert!(!RelationshipKind::HasMany.requires_through());
    }

    #[test]
    fn test_kind_maps_to_relation_token() {
        assert_eq!(
            RelationshipKind::BelongsToOne.relation_type(),
            RelationType::BelongsToOneRelation
        );
        assert_eq!(
            RelationshipKind::HasMany.relation_type(),
            RelationType::HasManyRelation
        );
        assert_eq!(
            RelationshipKind::HasOne.relation_type(),
            RelationType::HasOneRelation
        );
        assert_eq!(
            RelationshipKind::ManyToMany.relation_type(),
            RelationType::ManyToManyRelation
        );
        assert_eq!(
            RelationshipKind::HasOneThrough.relation_type(),
            RelationType::HasOneThroughRelation
        );
    }

    #[test]
    fn test_kind_display_from_str_round_trip() {
        for kind in RelationshipKind::ALL {
            assert_eq!(kind.to_string().parse::<RelationshipKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_token_is_rejected() {
        let err = "ManyToOne".parse::<RelationshipKind>().unwrap_err();
        assert_eq!(
            err,
            RelationError::InvalidRelationshipKind {
                kind: "ManyToOne".to_string()
            }
        );
    }

    #[test]
    fn test_column_ref_qualified() {
        assert_eq!(
            ColumnRef::qualified("persons", "animalId"),
            ColumnRef::Single("persons.animalId".to_string())
        );
    }

    #[test]
    fn test_descriptor_validation_checks_through_shape() {
        let join = JoinSpec {
            from: ColumnRef::from("persons.id"),
            through: None,
            to: ColumnRef::from("animals.personId"),
        };
        let descriptor = RelationshipDescriptor {
            relation: RelationType::HasManyRelation,
            target: EntityRef::table("animals"),
            join,
        };
        assert!(descriptor.validate().is_ok());

        let mut missing_through = descriptor.clone();
        missing_through.relation = RelationType::ManyToManyRelation;
        assert!(matches!(
            missing_through.validate(),
            Err(RelationError::Configuration { .. })
        ));

        let mut stray_through = descriptor;
        stray_through.join.through = Some(ThroughSpec {
            from: ColumnRef::from("animals_persons.personId"),
            to: ColumnRef::from("animals_persons.animalId"),
        });
        assert!(matches!(
            stray_through.validate(),
            Err(RelationError::Configuration { .. })
        ));
    }

    #[test]
    fn test_through_override_setters_merge_into_one_override() {
        let overrides = RelationshipOverrides::new()
            .with_through_from("pets_owners.ownerId")
            .with_through_to("pets_owners.petId");

        let through = overrides.through.expect("through override set");
        assert_eq!(through.from, Some(ColumnRef::from("pets_owners.ownerId")));
        assert_eq!(through.to, Some(ColumnRef::from("pets_owners.petId")));
    }
}
