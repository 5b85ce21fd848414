//! Shared fixtures used in unit tests: a hand-built host reflection over a fixed class
//! hierarchy.

use std::collections::HashMap;

use crate::{
    metamodel::{
        key::TypeKey,
        reflect::{NativeShape, Property, PropertySet, TypeReflector},
    },
    Error, Result,
};

struct FixtureClass {
    supertypes: Vec<String>,
    shape: NativeShape,
}

/// A [`TypeReflector`] over a hierarchy declared class by class in the test body.
///
/// Classes not declared here are unknown to the host: `extract_shape` fails for them and
/// they have no supertypes.
pub(crate) struct FixtureReflector {
    classes: HashMap<String, FixtureClass>,
}

impl FixtureReflector {
    pub(crate) fn new() -> Self {
        FixtureReflector {
            classes: HashMap::new(),
        }
    }

    /// Declares an atomic scalar class.
    pub(crate) fn scalar(mut self, name: &str) -> Self {
        self.classes.insert(
            name.to_string(),
            FixtureClass {
                supertypes: Vec::new(),
                shape: NativeShape::Scalar,
            },
        );
        self
    }

    /// Declares a structured class with the given direct supertypes and properties.
    pub(crate) fn class(mut self, name: &str, supertypes: &[&str], properties: Vec<Property>) -> Self {
        self.classes.insert(
            name.to_string(),
            FixtureClass {
                supertypes: supertypes.iter().map(ToString::to_string).collect(),
                shape: NativeShape::Structured(PropertySet::new(properties)),
            },
        );
        self
    }

    /// Declares a structured class whose shape hints `id_property` as its identity.
    pub(crate) fn entity(
        mut self,
        name: &str,
        supertypes: &[&str],
        properties: Vec<Property>,
        id_property: &str,
    ) -> Self {
        self.classes.insert(
            name.to_string(),
            FixtureClass {
                supertypes: supertypes.iter().map(ToString::to_string).collect(),
                shape: NativeShape::Structured(
                    PropertySet::new(properties).with_id_property(id_property),
                ),
            },
        );
        self
    }
}

impl TypeReflector for FixtureReflector {
    fn extract_shape(&self, key: &TypeKey) -> Result<NativeShape> {
        self.classes
            .get(key.erasure())
            .map(|class| class.shape.clone())
            .ok_or_else(|| Error::UnsupportedShape { key: key.clone() })
    }

    fn direct_supertypes(&self, class: &str) -> Vec<String> {
        self.classes
            .get(class)
            .map(|class| class.supertypes.clone())
            .unwrap_or_default()
    }
}
