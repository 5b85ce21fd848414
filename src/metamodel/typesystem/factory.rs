//! Descriptor inference.
//!
//! The [`TypeFactory`] builds a new semantic descriptor for a native type, seeded with the
//! nearest-ancestor prototype when one exists. Construction delegates all structural
//! knowledge to the host's [`TypeReflector`] and has no observable side effects besides its
//! return value, so racing threads may run it redundantly and discard the losers.

use std::sync::Arc;

use crate::{
    metamodel::{
        definition::ManagedDefinition,
        key::TypeKey,
        primitives::BuiltinKind,
        reflect::{NativeShape, PropertySet, TypeReflector},
        typesystem::{
            ContainerType, EntityType, ManagedClass, MapType, OptionalType, SemanticType,
            SemanticTypeRc, ValueObjectType,
        },
    },
    Error, Result,
};

/// Builds semantic descriptors from prototypes, extracted shapes, or explicit definitions.
pub struct TypeFactory {
    reflector: Arc<dyn TypeReflector>,
}

impl TypeFactory {
    /// Creates a factory over the given host reflection.
    pub(crate) fn new(reflector: Arc<dyn TypeReflector>) -> Self {
        TypeFactory { reflector }
    }

    /// Builds a descriptor for `key`, seeded with `prototype` when present.
    ///
    /// With a prototype, the new descriptor takes the prototype's variant, re-resolved
    /// against the key's own shape and generic arguments. Without one, the variant is
    /// inferred from the extracted shape alone.
    ///
    /// # Errors
    /// Surfaces [`Error::UnsupportedShape`] from the reflector unchanged, and
    /// [`Error::PropertyNotFound`] when an inherited identity property is absent from the
    /// key's own shape.
    pub fn infer(&self, key: &TypeKey, prototype: Option<SemanticTypeRc>) -> Result<SemanticTypeRc> {
        let inferred = match prototype {
            Some(prototype) => self.spawn(key, &prototype)?,
            None => Arc::new(self.infer_from_shape(key)?),
        };
        log::debug!("inferred {key} as {}", inferred.kind_name());
        Ok(inferred)
    }

    /// Builds a descriptor from an explicit managed-class definition.
    ///
    /// # Errors
    /// [`Error::EntityWithoutId`] when neither the definition nor the shape names an
    /// identity property; shape extraction errors are surfaced unchanged.
    pub fn create_from_definition(&self, definition: &ManagedDefinition) -> Result<SemanticType> {
        match definition {
            ManagedDefinition::Entity(entity) => self.spawn_entity(entity.key(), entity.id_property()),
            ManagedDefinition::ValueObject(value_object) => self.spawn_value_object(value_object.key()),
        }
    }

    /// Plain value wrapper for an entity's identity-property type.
    ///
    /// Deliberately shape-blind: the identity type must not trigger further inference.
    #[must_use]
    pub fn infer_id_property_type(&self, key: &TypeKey) -> SemanticType {
        SemanticType::Value(key.clone())
    }

    /// Spawns a descriptor in the prototype's variant for the given key.
    fn spawn(&self, key: &TypeKey, prototype: &SemanticTypeRc) -> Result<SemanticTypeRc> {
        Ok(match &**prototype {
            // All array shapes share the single built-in descriptor.
            SemanticType::Array(_) => prototype.clone(),
            SemanticType::Primitive(_) => Arc::new(SemanticType::Primitive(key.clone())),
            SemanticType::Value(_) => Arc::new(SemanticType::Value(key.clone())),
            SemanticType::Custom(_) => Arc::new(SemanticType::Custom(key.clone())),
            SemanticType::Entity(entity) => {
                Arc::new(self.spawn_entity(key, Some(entity.id_property().name()))?)
            }
            SemanticType::ValueObject(_) => Arc::new(self.spawn_value_object(key)?),
            SemanticType::Container(container) => Arc::new(SemanticType::Container(
                ContainerType::new(key.clone(), container.kind(), content_arg(key, 0)),
            )),
            SemanticType::Map(_) => Arc::new(SemanticType::Map(MapType::new(
                key.clone(),
                content_arg(key, 0),
                content_arg(key, 1),
            ))),
            SemanticType::Optional(_) => Arc::new(SemanticType::Optional(OptionalType::new(
                key.clone(),
                content_arg(key, 0),
            ))),
        })
    }

    /// Builds an entity descriptor, resolving the identity property against the key's own
    /// extracted shape. `id_override` takes precedence over the shape's declared hint.
    fn spawn_entity(&self, key: &TypeKey, id_override: Option<&str>) -> Result<SemanticType> {
        let shape = self.extract_structured(key)?;
        let id_name = match id_override {
            Some(name) => name.to_owned(),
            None => shape
                .id_property()
                .map(str::to_owned)
                .ok_or_else(|| Error::EntityWithoutId { key: key.clone() })?,
        };
        entity_from_shape(key, shape, &id_name)
    }

    /// Builds a value-object descriptor from the key's extracted shape.
    fn spawn_value_object(&self, key: &TypeKey) -> Result<SemanticType> {
        let shape = self.extract_structured(key)?;
        Ok(value_object_from_shape(key, shape))
    }

    /// Default mapping for a key with no prototype: scalars become values, structured
    /// shapes become entities (with an identity hint) or value objects (without).
    fn infer_from_shape(&self, key: &TypeKey) -> Result<SemanticType> {
        match self.reflector.extract_shape(key)? {
            NativeShape::Scalar => Ok(SemanticType::Value(key.clone())),
            NativeShape::Structured(shape) => match shape.id_property() {
                Some(id_name) => {
                    let id_name = id_name.to_owned();
                    entity_from_shape(key, shape, &id_name)
                }
                None => Ok(value_object_from_shape(key, shape)),
            },
        }
    }

    fn extract_structured(&self, key: &TypeKey) -> Result<PropertySet> {
        match self.reflector.extract_shape(key)? {
            NativeShape::Structured(shape) => Ok(shape),
            NativeShape::Scalar => Err(Error::UnsupportedShape { key: key.clone() }),
        }
    }
}

fn entity_from_shape(key: &TypeKey, shape: PropertySet, id_name: &str) -> Result<SemanticType> {
    let id_property = shape
        .property(id_name)
        .cloned()
        .ok_or_else(|| Error::PropertyNotFound {
            class: key.to_string(),
            property: id_name.to_owned(),
        })?;
    Ok(SemanticType::Entity(EntityType::new(
        key.clone(),
        ManagedClass::new(key.clone(), shape.into_properties()),
        id_property,
    )))
}

fn value_object_from_shape(key: &TypeKey, shape: PropertySet) -> SemanticType {
    SemanticType::ValueObject(ValueObjectType::new(
        key.clone(),
        ManagedClass::new(key.clone(), shape.into_properties()),
    ))
}

/// The content key bound to generic argument `index`, defaulting to `object` for raw keys.
fn content_arg(key: &TypeKey, index: usize) -> TypeKey {
    key.arg(index)
        .cloned()
        .unwrap_or_else(|| BuiltinKind::Object.key())
}
