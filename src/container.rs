//! The entity/parameter container collaborator (spec.md §6, "Container").
//!
//! The container is read-only from the tokenizer's perspective (spec.md
//! §5): it is populated by whatever higher layer tracks entity
//! declarations across the document, and this crate only ever looks
//! values up in it. [`SimpleEntityTable`] is a minimal concrete
//! implementation for embedders who don't already have their own table
//! (and for this crate's own tests).

use std::collections::HashMap;

/// A declared entity, as looked up through a [`Container`].
///
/// Only the replacement text matters to this crate; everything else
/// about an entity (its `EntityDecl` token, whether it is external,
/// NDATA notation, …) lives one layer up, in the DTD builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    node_value: String,
}

impl Entity {
    /// Creates an entity with the given replacement text.
    pub fn new(node_value: impl Into<String>) -> Self {
        Entity {
            node_value: node_value.into(),
        }
    }

    /// The entity's replacement text.
    pub fn node_value(&self) -> &str {
        &self.node_value
    }
}

/// Read-only lookup of declared parameter and general entities.
pub trait Container {
    /// Looks up a parameter entity (`%name;`) by name.
    fn get_parameter(&self, name: &str) -> Option<&Entity>;

    /// Looks up a general entity (`&name;`) by name.
    fn get_entity(&self, name: &str) -> Option<&Entity>;
}

/// A [`Container`] backed by two `HashMap`s.
#[derive(Clone, Debug, Default)]
pub struct SimpleEntityTable {
    parameters: HashMap<String, Entity>,
    entities: HashMap<String, Entity>,
}

impl SimpleEntityTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a parameter entity, overwriting any previous
    /// declaration under the same name.
    pub fn declare_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(name.into(), Entity::new(value));
    }

    /// Declares a general entity, overwriting any previous declaration
    /// under the same name.
    pub fn declare_entity(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entities.insert(name.into(), Entity::new(value));
    }
}

impl Container for SimpleEntityTable {
    fn get_parameter(&self, name: &str) -> Option<&Entity> {
        self.parameters.get(name)
    }

    fn get_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_declared_entities() {
        let mut table = SimpleEntityTable::new();
        table.declare_parameter("x", "abc");
        table.declare_entity("amp", "&");

        assert_eq!(table.get_parameter("x").map(Entity::node_value), Some("abc"));
        assert_eq!(table.get_entity("amp").map(Entity::node_value), Some("&"));
        assert!(table.get_parameter("y").is_none());
        assert!(table.get_entity("x").is_none());
    }
}
