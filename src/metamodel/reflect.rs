//! Host-reflection capability interface.
//!
//! The engine itself is host-agnostic: everything it needs to know about a native class
//! (its declared properties, its place in the class hierarchy) comes through the narrow
//! [`TypeReflector`] trait implemented per host runtime. The registry and factory depend only
//! on this interface, so the caching and ancestor-resolution logic stays portable.

use std::collections::{HashSet, VecDeque};

use crate::{metamodel::key::TypeKey, Result};

/// A declared property of a native class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    name: String,
    value_type: TypeKey,
}

impl Property {
    /// Creates a property with the given name and declared value type key.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: TypeKey) -> Self {
        Property {
            name: name.into(),
            value_type,
        }
    }

    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The native type key of the property value.
    #[must_use]
    pub fn value_type(&self) -> &TypeKey {
        &self.value_type
    }
}

/// The declared property set of a structured native class, with an optional identity hint.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySet {
    properties: Vec<Property>,
    id_property: Option<String>,
}

impl PropertySet {
    /// Creates a property set with no identity hint.
    #[must_use]
    pub fn new(properties: Vec<Property>) -> Self {
        PropertySet {
            properties,
            id_property: None,
        }
    }

    /// Marks the named property as the declared identity of the class.
    #[must_use]
    pub fn with_id_property(mut self, name: impl Into<String>) -> Self {
        self.id_property = Some(name.into());
        self
    }

    /// All declared properties, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// The declared identity property name, if the host declared one.
    #[must_use]
    pub fn id_property(&self) -> Option<&str> {
        self.id_property.as_deref()
    }

    /// Looks up a declared property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// Consumes the set, yielding the declared properties.
    #[must_use]
    pub fn into_properties(self) -> Vec<Property> {
        self.properties
    }
}

/// Structural shape of a native class, as reported by host reflection.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeShape {
    /// An atomic scalar with no declared properties; maps to a value descriptor.
    Scalar,
    /// A class with declared properties; maps to a managed descriptor.
    Structured(PropertySet),
}

/// Reflective access to the host application's native classes.
///
/// Implementations must be side-effect free with respect to the registry: the engine may
/// invoke them redundantly from racing threads and discard all but one result.
pub trait TypeReflector: Send + Sync {
    /// Extracts the declared structural shape of a native class.
    ///
    /// # Errors
    /// Returns [`UnsupportedShape`](crate::Error::UnsupportedShape) when the host cannot
    /// describe the type coherently.
    fn extract_shape(&self, key: &TypeKey) -> Result<NativeShape>;

    /// Direct supertypes of a class: its superclass plus implemented interfaces.
    ///
    /// Unknown classes yield an empty list.
    fn direct_supertypes(&self, class: &str) -> Vec<String>;

    /// Hierarchy distance between a concrete class and a candidate ancestor.
    ///
    /// Distance 0 is identity, 1 a direct supertype, increasing for deeper ancestors;
    /// `None` means the classes are unrelated. The provided implementation runs a
    /// breadth-first search over [`direct_supertypes`](TypeReflector::direct_supertypes),
    /// guarding against cyclic declarations.
    fn class_distance(&self, concrete: &str, candidate: &str) -> Option<u32> {
        if concrete == candidate {
            return Some(0);
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<(String, u32)> = VecDeque::new();
        visited.insert(concrete.to_string());
        frontier.push_back((concrete.to_string(), 0));

        while let Some((class, depth)) = frontier.pop_front() {
            for supertype in self.direct_supertypes(&class) {
                if supertype == candidate {
                    return Some(depth + 1);
                }
                if visited.insert(supertype.clone()) {
                    frontier.push_back((supertype, depth + 1));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::FixtureReflector;

    #[test]
    fn test_property_set_lookup() {
        let set = PropertySet::new(vec![
            Property::new("id", TypeKey::class("i64")),
            Property::new("name", TypeKey::class("string")),
        ])
        .with_id_property("id");

        assert_eq!(set.id_property(), Some("id"));
        assert_eq!(
            set.property("name").map(Property::value_type),
            Some(&TypeKey::class("string"))
        );
        assert!(set.property("missing").is_none());
    }

    #[test]
    fn test_class_distance_bfs() {
        let reflector = FixtureReflector::new()
            .class("A", &["B"], Vec::new())
            .class("B", &["C"], Vec::new())
            .class("C", &[], Vec::new())
            .class("Unrelated", &[], Vec::new());

        assert_eq!(reflector.class_distance("A", "A"), Some(0));
        assert_eq!(reflector.class_distance("A", "B"), Some(1));
        assert_eq!(reflector.class_distance("A", "C"), Some(2));
        assert_eq!(reflector.class_distance("A", "Unrelated"), None);
        assert_eq!(reflector.class_distance("C", "A"), None);
    }

    #[test]
    fn test_class_distance_shortest_path_over_interfaces() {
        // Diamond: D extends E and implements I; both reach Top, I directly.
        let reflector = FixtureReflector::new()
            .class("D", &["E", "I"], Vec::new())
            .class("E", &["Top"], Vec::new())
            .class("I", &["Top"], Vec::new())
            .class("Top", &[], Vec::new());

        assert_eq!(reflector.class_distance("D", "Top"), Some(2));
        assert_eq!(reflector.class_distance("D", "I"), Some(1));
    }

    #[test]
    fn test_class_distance_tolerates_cycles() {
        let reflector = FixtureReflector::new()
            .class("X", &["Y"], Vec::new())
            .class("Y", &["X"], Vec::new());

        assert_eq!(reflector.class_distance("X", "Y"), Some(1));
        assert_eq!(reflector.class_distance("X", "Z"), None);
    }
}
