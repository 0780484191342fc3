//! # relmap: Convention-driven relationship mappings
//!
//! Derives the relationship descriptors an ORM needs to join two entities
//! (foreign-key direction, junction table, column names) from the entities'
//! names and a chosen relationship kind. Every inferred value can be
//! overridden by explicit configuration; overrides always win.
//!
//! The crate is pure in-memory computation: no schema validation, no
//! migrations, no query execution. The produced [`RelationshipTable`] is
//! handed to the host ORM's relation-mapping surface, which interprets the
//! descriptors at query time.
//!
//! ```
//! use relmap::{Entity, EntityRef, RelationshipBuilder};
//!
//! struct Person;
//!
//! impl Entity for Person {
//!     fn table_name() -> &'static str {
//!         "persons"
//!     }
//! }
//!
//! struct Animal;
//!
//! impl Entity for Animal {
//!     fn table_name() -> &'static str {
//!         "animals"
//!     }
//! }
//!
//! # fn main() -> Result<(), relmap::RelationError> {
//! let mut builder = RelationshipBuilder::new(EntityRef::of::<Person>());
//! builder.has_many(EntityRef::of::<Animal>(), None)?;
//!
//! let animals = builder.relationships().get("animals").unwrap();
//! assert_eq!(animals.join.from, relmap::ColumnRef::from("persons.id"));
//! assert_eq!(animals.join.to, relmap::ColumnRef::from("animals.personId"));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod conventions;
pub mod entity;
pub mod error;
pub mod metadata;

// Re-export the main types
pub use builder::*;
pub use entity::*;
pub use error::*;
pub use metadata::*;
