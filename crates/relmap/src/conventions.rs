//! Naming conventions - Inference rules for relationship names, key fields, and join tables
//!
//! Every function here is a pure mapping from its inputs plus the static
//! irregular-plural table. Raw [`EntityRef::Table`] references always pass
//! through unchanged; inference only applies to typed references.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::entity::EntityRef;
use crate::metadata::RelationshipKind;

/// Irregular English plurals, consulted before the suffix rules.
/// Read-only after initialization.
static IRREGULAR_PLURALS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("person", "people"),
        ("child", "children"),
        ("man", "men"),
        ("woman", "women"),
        ("foot", "feet"),
        ("tooth", "teeth"),
        ("goose", "geese"),
        ("mouse", "mice"),
        ("ox", "oxen"),
    ])
});

/// Pluralize a word using the irregular table first, then suffix rules.
///
/// The rule set is deliberately small: `s`/`sh`/`ch`/`x`/`z` endings get
/// `es`, a trailing `y` becomes `ies`, everything else gets `s`. Vowel-`y`
/// words and `f`→`ves` nouns are not handled; add them to the irregular
/// table if a model name ever needs them.
pub fn pluralize(word: &str) -> String {
    if let Some(plural) = IRREGULAR_PLURALS.get(word) {
        return (*plural).to_string();
    }

    if word.ends_with('s')
        || word.ends_with("sh")
        || word.ends_with("ch")
        || word.ends_with('x')
        || word.ends_with('z')
    {
        format!("{}es", word)
    } else if word.ends_with('y') {
        format!("{}ies", &word[..word.len() - 1])
    } else {
        format!("{}s", word)
    }
}

/// Lowercase only the first character; the rest is kept as written.
/// Handles camel/Pascal-case type names.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The externally-visible name of a relationship towards `target`.
///
/// Collection kinds (HasMany, ManyToMany) pluralize the lowercased type
/// name; every other kind stays singular.
pub fn relationship_name(target: &EntityRef, kind: RelationshipKind) -> String {
    match target {
        EntityRef::Table(name) => name.clone(),
        EntityRef::Entity { type_name, .. } => {
            let base = lower_first(type_name);
            if kind.is_collection() {
                pluralize(&base)
            } else {
                base
            }
        }
    }
}

/// Conventional foreign-key column pointing at `entity` (`animalId` for an
/// `Animal` type).
pub fn foreign_key_field(entity: &EntityRef) -> String {
    match entity {
        EntityRef::Table(name) => name.clone(),
        EntityRef::Entity { type_name, .. } => format!("{}Id", lower_first(type_name)),
    }
}

/// Column on the owning side of the join. Only BelongsToOne places the
/// foreign key on the owner; every other kind joins from the primary key.
pub fn from_field(target: &EntityRef, kind: RelationshipKind) -> String {
    match kind {
        RelationshipKind::BelongsToOne => foreign_key_field(target),
        _ => "id".to_string(),
    }
}

/// Column on the target side of the join. HasMany and HasOne place the
/// foreign key on the target; every other kind joins to the primary key.
pub fn to_field(owner: &EntityRef, kind: RelationshipKind) -> String {
    match kind {
        RelationshipKind::HasMany | RelationshipKind::HasOne => foreign_key_field(owner),
        _ => "id".to_string(),
    }
}

/// Junction table name for the two sides, ordered lexicographically so both
/// declaration directions agree on the same table.
pub fn through_table_name(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}_{}", a, b)
    } else {
        format!("{}_{}", b, a)
    }
}
