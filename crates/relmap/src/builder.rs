//! Relationship builder - Accumulates named relationship descriptors for one owner entity
//!
//! The builder is the only writer of its [`RelationshipTable`]: descriptors
//! enter through [`RelationshipBuilder::add`] (or the per-kind shortcuts)
//! and are read back through [`RelationshipBuilder::relationships`]. A
//! rejected `add` never touches the table.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conventions;
use crate::entity::EntityRef;
use crate::error::{RelationError, RelationResult};
use crate::metadata::{
    ColumnRef, JoinSpec, RelationshipDescriptor, RelationshipKind, RelationshipOverrides,
    ThroughSpec,
};

/// Named mapping from relationship name to descriptor.
///
/// Keys are unique; inserting under an existing name replaces the earlier
/// entry. Insertion order carries no meaning, consumers look entries up by
/// name. Serializes as the plain name→descriptor map the ORM's mapping
/// configuration consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipTable {
    entries: HashMap<String, RelationshipDescriptor>,
}

impl RelationshipTable {
    /// Look a descriptor up by relationship name.
    pub fn get(&self, name: &str) -> Option<&RelationshipDescriptor> {
        self.entries.get(name)
    }

    /// Check whether a relationship with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All relationship names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Number of accumulated relationships.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no relationship has been added yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over name/descriptor pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationshipDescriptor)> {
        self.entries.iter().map(|(name, desc)| (name.as_str(), desc))
    }

    fn insert(
        &mut self,
        name: String,
        descriptor: RelationshipDescriptor,
    ) -> Option<RelationshipDescriptor> {
        self.entries.insert(name, descriptor)
    }
}

/// How a read of the relationship table is reported.
///
/// Purely observational: the table is handed out either way and nothing
/// here can change it. A panicking sink propagates to the caller.
#[derive(Default)]
pub enum Observation<'a> {
    /// No reporting
    #[default]
    None,
    /// Dump the table through `tracing::debug!`
    Debug,
    /// Hand the table to a caller-supplied sink; the return value is
    /// discarded
    Sink(&'a dyn Fn(&RelationshipTable)),
}

impl fmt::Debug for Observation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Debug => f.write_str("Debug"),
            Self::Sink(_) => f.write_str("Sink(..)"),
        }
    }
}

/// Accumulates relationship descriptors declared from one owner entity.
///
/// Construction never fails; the owner binding is validated on every
/// [`add`](Self::add) because it can be rebound afterwards. One builder
/// owns exactly one table for its whole lifetime.
#[derive(Debug, Clone)]
pub struct RelationshipBuilder {
    owner: EntityRef,
    relationships: RelationshipTable,
}

impl RelationshipBuilder {
    /// Bind a new builder to its owner entity.
    pub fn new(owner: impl Into<EntityRef>) -> Self {
        Self {
            owner: owner.into(),
            relationships: RelationshipTable::default(),
        }
    }

    /// The entity relationships are currently declared from.
    pub fn owner(&self) -> &EntityRef {
        &self.owner
    }

    /// Rebind the owner entity. Only affects relationships added after the
    /// call; entries already in the table keep their derived names and
    /// columns.
    pub fn set_owner(&mut self, owner: impl Into<EntityRef>) {
        self.owner = owner.into();
    }

    /// Add one relationship towards `target`, deriving every join detail
    /// from the naming conventions and letting `overrides` win wherever
    /// supplied. Returns the builder for chaining.
    pub fn add(
        &mut self,
        target: impl Into<EntityRef>,
        kind: RelationshipKind,
        overrides: impl Into<Option<RelationshipOverrides>>,
    ) -> RelationResult<&mut Self> {
        let target = target.into();

        if target.table_name().is_empty() {
            return Err(RelationError::InvalidTarget {
                target: target.to_string(),
            });
        }

        if self.owner.table_name().is_empty() {
            return Err(RelationError::InvalidOwner {
                owner: self.owner.to_string(),
            });
        }

        let RelationshipOverrides {
            relation_name,
            from_table,
            to_table,
            from_field,
            to_field,
            from,
            to,
            through,
        } = overrides.into().unwrap_or_default();

        let from_table = from_table.unwrap_or_else(|| self.owner.table_name().to_string());
        let to_table = to_table.unwrap_or_else(|| target.table_name().to_string());
        let from_field = from_field.unwrap_or_else(|| conventions::from_field(&target, kind));
        let to_field = to_field.unwrap_or_else(|| conventions::to_field(&self.owner, kind));

        let relation = kind.relation_type();

        let mut join = JoinSpec {
            from: from.unwrap_or_else(|| ColumnRef::qualified(&from_table, &from_field)),
            through: None,
            to: to.unwrap_or_else(|| ColumnRef::qualified(&to_table, &to_field)),
        };

        if kind.requires_through() {
            let through_table =
                conventions::through_table_name(self.owner.table_name(), &to_table);
            let mut through_spec = ThroughSpec {
                from: ColumnRef::qualified(
                    &through_table,
                    &conventions::foreign_key_field(&self.owner),
                ),
                to: ColumnRef::qualified(
                    &through_table,
                    &conventions::foreign_key_field(&target),
                ),
            };

            // partial merge: only the supplied legs are replaced
            if let Some(through) = through {
                if let Some(from) = through.from {
                    through_spec.from = from;
                }
                if let Some(to) = through.to {
                    through_spec.to = to;
                }
            }

            join.through = Some(through_spec);
        } else if through.is_some() {
            tracing::warn!(
                "through override ignored for {} relationship towards '{}'",
                relation,
                target.table_name()
            );
        }

        let name =
            relation_name.unwrap_or_else(|| conventions::relationship_name(&target, kind));

        let descriptor = RelationshipDescriptor {
            relation,
            target,
            join,
        };
        descriptor.validate()?;

        tracing::debug!(
            "adding {} relationship '{}' on '{}'",
            relation,
            name,
            self.owner.table_name()
        );

        if self.relationships.insert(name.clone(), descriptor).is_some() {
            tracing::debug!("relationship '{}' replaced an earlier entry", name);
        }

        Ok(self)
    }

    /// Shortcut for [`add`](Self::add) with [`RelationshipKind::BelongsToOne`].
    pub fn belongs_to_one(
        &mut self,
        target: impl Into<EntityRef>,
        overrides: impl Into<Option<RelationshipOverrides>>,
    ) -> RelationResult<&mut Self> {
        self.add(target, RelationshipKind::BelongsToOne, overrides)
    }

    /// Shortcut for [`add`](Self::add) with [`RelationshipKind::HasMany`].
    pub fn has_many(
        &mut self,
        target: impl Into<EntityRef>,
        overrides: impl Into<Option<RelationshipOverrides>>,
    ) -> RelationResult<&mut Self> {
        self.add(target, RelationshipKind::HasMany, overrides)
    }

    /// Shortcut for [`add`](Self::add) with [`RelationshipKind::HasOne`].
    pub fn has_one(
        &mut self,
        target: impl Into<EntityRef>,
        overrides: impl Into<Option<RelationshipOverrides>>,
    ) -> RelationResult<&mut Self> {
        self.add(target, RelationshipKind::HasOne, overrides)
    }

    /// Shortcut for [`add`](Self::add) with [`RelationshipKind::ManyToMany`].
    pub fn many_to_many(
        &mut self,
        target: impl Into<EntityRef>,
        overrides: impl Into<Option<RelationshipOverrides>>,
    ) -> RelationResult<&mut Self> {
        self.add(target, RelationshipKind::ManyToMany, overrides)
    }

    /// Shortcut for [`add`](Self::add) with [`RelationshipKind::HasOneThrough`].
    pub fn has_one_through(
        &mut self,
        target: impl Into<EntityRef>,
        overrides: impl Into<Option<RelationshipOverrides>>,
    ) -> RelationResult<&mut Self> {
        self.add(target, RelationshipKind::HasOneThrough, overrides)
    }

    /// The accumulated table. This is a live view of the builder's state;
    /// treat it as a snapshot and re-read after further `add` calls.
    pub fn relationships(&self) -> &RelationshipTable {
        &self.relationships
    }

    /// Like [`relationships`](Self::relationships), reporting the table
    /// through the given observation first.
    pub fn observe(&self, observation: Observation<'_>) -> &RelationshipTable {
        match observation {
            Observation::None => {}
            Observation::Debug => tracing::debug!(
                "relationship table for '{}': {:?}",
                self.owner.table_name(),
                self.relationships
            ),
            Observation::Sink(sink) => sink(&self.relationships),
        }

        &self.relationships
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::metadata::RelationType;

    struct Person;

    impl Entity for Person {
        fn table_name() -> &'static str {
            "persons"
        }
    }

    struct Animal;

    impl Entity for Animal {
        fn table_name() -> &'static str {
            "animals"
        }
    }

    #[test]
    fn test_wrappers_delegate_to_add() {
        let mut by_add = RelationshipBuilder::new(EntityRef::of::<Person>());
        by_add
            .add(EntityRef::of::<Animal>(), RelationshipKind::HasMany, None)
            .unwrap();

        let mut by_wrapper = RelationshipBuilder::new(EntityRef::of::<Person>());
        by_wrapper.has_many(EntityRef::of::<Animal>(), None).unwrap();

        assert_eq!(by_add.relationships(), by_wrapper.relationships());
    }

    #[test]
    fn test_set_owner_affects_subsequent_adds_only() {
        let mut builder = RelationshipBuilder::new(EntityRef::of::<Person>());
        builder.has_many(EntityRef::of::<Animal>(), None).unwrap();

        builder.set_owner("owners");
        builder
            .has_one(
                EntityRef::of::<Animal>(),
                RelationshipOverrides::new().with_relation_name("keeper_animal"),
            )
            .unwrap();

        let table = builder.relationships();
        // first entry still joins to the original owner's foreign key
        assert_eq!(
            table.get("animals").unwrap().join.to,
            ColumnRef::from("animals.personId")
        );
        // second entry derives from the rebound owner (raw ref passthrough)
        assert_eq!(
            table.get("keeper_animal").unwrap().join.to,
            ColumnRef::from("animals.owners")
        );
    }

    #[test]
    fn test_rebinding_to_empty_owner_fails_later_adds() {
        let mut builder = RelationshipBuilder::new(EntityRef::of::<Person>());
        builder.set_owner("");

        let err = builder
            .has_many(EntityRef::of::<Animal>(), None)
            .unwrap_err();
        assert!(matches!(err, RelationError::InvalidOwner { .. }));
        assert!(builder.relationships().is_empty());
    }

    #[test]
    fn test_observe_debug_returns_the_table() {
        let mut builder = RelationshipBuilder::new(EntityRef::of::<Person>());
        builder
            .belongs_to_one(EntityRef::of::<Animal>(), None)
            .unwrap();

        let table = builder.observe(Observation::Debug);
        assert_eq!(
            table.get("animal").unwrap().relation,
            RelationType::BelongsToOneRelation
        );
    }

    #[test]
    fn test_observation_default_is_none() {
        assert!(matches!(Observation::default(), Observation::None));
    }
}
