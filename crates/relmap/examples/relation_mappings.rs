//! Example: Declaring relationship mappings by convention
//!
//! Builds the relationship table for a `persons`-backed entity and prints
//! the ORM-facing mapping as JSON.

use relmap::{Entity, EntityRef, RelationError, RelationshipBuilder, RelationshipOverrides};

struct Person;

impl Entity for Person {
    fn table_name() -> &'static str {
        "persons"
    }
}

struct Country;

impl Entity for Country {
    fn table_name() -> &'static str {
        "countries"
    }
}

struct Animal;

impl Entity for Animal {
    fn table_name() -> &'static str {
        "animals"
    }
}

struct Activity;

impl Entity for Activity {
    fn table_name() -> &'static str {
        "activities"
    }
}

fn main() -> Result<(), RelationError> {
    let mut builder = RelationshipBuilder::new(EntityRef::of::<Person>());
    builder
        .belongs_to_one(EntityRef::of::<Country>(), None)?
        .has_many(EntityRef::of::<Animal>(), None)?
        .many_to_many(EntityRef::of::<Activity>(), None)?
        .belongs_to_one(
            EntityRef::of::<Animal>(),
            RelationshipOverrides::new().with_relation_name("pet"),
        )?;

    let mapping = serde_json::to_string_pretty(builder.relationships()).unwrap();
    println!("{}", mapping);

    Ok(())
}
