//! Semantic type system for structural diffing.
//!
//! This module holds the closed set of semantic type descriptors the engine assigns to
//! native types, and the machinery that assigns them.
//!
//! # Key Components
//!
//! - [`SemanticType`]: the closed descriptor sum type, matched exhaustively by consumers
//! - [`TypeRegistry`]: concurrent, append-only cache from native key to descriptor
//! - [`TypeFactory`]: builds new descriptors from prototypes or extracted shapes
//! - [`MapContentType`]: transient resolved key/value descriptor pair for map traversal
//!
//! # Descriptor Variants
//!
//! Atomic variants (`Primitive`, `Value`, `Custom`) are compared by equality and never
//! traversed. Managed variants (`Entity`, `ValueObject`) own their declared-property
//! metadata and are traversed structurally; entities are additionally tracked by their
//! identity property. Shape variants (`Container`, `Map`, `Array`, `Optional`) carry the
//! native keys of their content, resolved lazily through the registry.

mod content;
mod dehydrate;
mod factory;
mod registry;
mod resolver;

use std::sync::Arc;

use strum::IntoStaticStr;

use crate::metamodel::{key::TypeKey, reflect::Property};

pub use content::MapContentType;
pub use factory::TypeFactory;
pub use registry::TypeRegistry;

/// Shared handle to an installed semantic type descriptor.
pub type SemanticTypeRc = Arc<SemanticType>;

/// The concrete kind of a managed descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ManagedKind {
    /// Structurally traversed, compared and tracked by identity.
    Entity,
    /// Structurally traversed, no identity.
    ValueObject,
}

/// Ordering discipline of a homogeneous container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Ordered container; positions are meaningful.
    List,
    /// Unordered container.
    Set,
}

/// Declared-property metadata owned by a managed descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedClass {
    class: TypeKey,
    properties: Vec<Property>,
}

impl ManagedClass {
    /// Creates managed-class metadata for the given class key and declared properties.
    #[must_use]
    pub fn new(class: TypeKey, properties: Vec<Property>) -> Self {
        ManagedClass { class, properties }
    }

    /// The native class key this metadata describes.
    #[must_use]
    pub fn class(&self) -> &TypeKey {
        &self.class
    }

    /// All declared properties, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Looks up a declared property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name() == name)
    }
}

/// A value-object descriptor: structurally traversed, no identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueObjectType {
    base: TypeKey,
    managed: ManagedClass,
}

impl ValueObjectType {
    /// Creates a value-object descriptor.
    #[must_use]
    pub fn new(base: TypeKey, managed: ManagedClass) -> Self {
        ValueObjectType { base, managed }
    }

    /// The native type key this descriptor is mapped from.
    #[must_use]
    pub fn base_key(&self) -> &TypeKey {
        &self.base
    }

    /// The owned declared-property metadata.
    #[must_use]
    pub fn managed_class(&self) -> &ManagedClass {
        &self.managed
    }
}

/// An entity descriptor: structurally traversed, compared and tracked by identity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityType {
    base: TypeKey,
    managed: ManagedClass,
    id_property: Property,
}

impl EntityType {
    /// Creates an entity descriptor with the given identity property.
    #[must_use]
    pub fn new(base: TypeKey, managed: ManagedClass, id_property: Property) -> Self {
        EntityType {
            base,
            managed,
            id_property,
        }
    }

    /// The native type key this descriptor is mapped from.
    #[must_use]
    pub fn base_key(&self) -> &TypeKey {
        &self.base
    }

    /// The owned declared-property metadata.
    #[must_use]
    pub fn managed_class(&self) -> &ManagedClass {
        &self.managed
    }

    /// The identity property.
    #[must_use]
    pub fn id_property(&self) -> &Property {
        &self.id_property
    }

    /// The native type key of the identity property value.
    #[must_use]
    pub fn id_property_type(&self) -> &TypeKey {
        self.id_property.value_type()
    }
}

/// A homogeneous container descriptor. The item key is resolved lazily on request.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerType {
    base: TypeKey,
    kind: ContainerKind,
    item: TypeKey,
}

impl ContainerType {
    /// Creates a container descriptor over the given item key.
    #[must_use]
    pub fn new(base: TypeKey, kind: ContainerKind, item: TypeKey) -> Self {
        ContainerType { base, kind, item }
    }

    /// The native type key this descriptor is mapped from.
    #[must_use]
    pub fn base_key(&self) -> &TypeKey {
        &self.base
    }

    /// Ordering discipline of the container.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// The native type key of the container items.
    #[must_use]
    pub fn item_type(&self) -> &TypeKey {
        &self.item
    }
}

/// An associative container descriptor. Key and value keys are resolved lazily on request.
#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    base: TypeKey,
    key: TypeKey,
    value: TypeKey,
}

impl MapType {
    /// Creates a map descriptor over the given key and value keys.
    #[must_use]
    pub fn new(base: TypeKey, key: TypeKey, value: TypeKey) -> Self {
        MapType { base, key, value }
    }

    /// The native type key this descriptor is mapped from.
    #[must_use]
    pub fn base_key(&self) -> &TypeKey {
        &self.base
    }

    /// The native type key of the map keys.
    #[must_use]
    pub fn key_type(&self) -> &TypeKey {
        &self.key
    }

    /// The native type key of the map values.
    #[must_use]
    pub fn value_type(&self) -> &TypeKey {
        &self.value
    }
}

/// A nullable-wrapper descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalType {
    base: TypeKey,
    inner: TypeKey,
}

impl OptionalType {
    /// Creates an optional descriptor over the given inner key.
    #[must_use]
    pub fn new(base: TypeKey, inner: TypeKey) -> Self {
        OptionalType { base, inner }
    }

    /// The native type key this descriptor is mapped from.
    #[must_use]
    pub fn base_key(&self) -> &TypeKey {
        &self.base
    }

    /// The native type key of the wrapped value.
    #[must_use]
    pub fn inner_type(&self) -> &TypeKey {
        &self.inner
    }
}

/// The semantic type descriptor assigned to a native type.
///
/// A closed sum type: consumers match exhaustively, and adding a variant is a deliberate,
/// centrally-reviewed change. Descriptors are pure data; variant-specific behavior lives
/// at the consumption sites.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum SemanticType {
    /// Scalar, string, or enum: atomic, never traversed.
    Primitive(TypeKey),
    /// Immutable atomic value compared by equality.
    Value(TypeKey),
    /// User-declared atomic value, opaque to the engine.
    Custom(TypeKey),
    /// Structurally traversed class without identity.
    ValueObject(ValueObjectType),
    /// Structurally traversed class tracked by identity.
    Entity(EntityType),
    /// Ordered or unordered homogeneous collection.
    Container(ContainerType),
    /// Associative collection.
    Map(MapType),
    /// Native fixed-shape sequence, mapped generically.
    Array(TypeKey),
    /// Nullable wrapper.
    Optional(OptionalType),
}

impl SemanticType {
    /// The native type key this descriptor is mapped from.
    #[must_use]
    pub fn base_key(&self) -> &TypeKey {
        match self {
            SemanticType::Primitive(key)
            | SemanticType::Value(key)
            | SemanticType::Custom(key)
            | SemanticType::Array(key) => key,
            SemanticType::ValueObject(value_object) => value_object.base_key(),
            SemanticType::Entity(entity) => entity.base_key(),
            SemanticType::Container(container) => container.base_key(),
            SemanticType::Map(map) => map.base_key(),
            SemanticType::Optional(optional) => optional.base_key(),
        }
    }

    /// The variant name, for diagnostics and error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.into()
    }

    /// The managed kind, if this is a managed descriptor.
    #[must_use]
    pub fn managed_kind(&self) -> Option<ManagedKind> {
        match self {
            SemanticType::Entity(_) => Some(ManagedKind::Entity),
            SemanticType::ValueObject(_) => Some(ManagedKind::ValueObject),
            _ => None,
        }
    }

    /// The owned declared-property metadata, if this is a managed descriptor.
    #[must_use]
    pub fn managed_class(&self) -> Option<&ManagedClass> {
        match self {
            SemanticType::Entity(entity) => Some(entity.managed_class()),
            SemanticType::ValueObject(value_object) => Some(value_object.managed_class()),
            _ => None,
        }
    }

    /// Returns `true` if this is a managed descriptor.
    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.managed_kind().is_some()
    }

    /// Whether an explicit re-registration with this descriptor is an idempotent no-op.
    ///
    /// Same variant is equivalent; entities must additionally agree on the identity
    /// property name.
    pub(crate) fn compatible(&self, other: &SemanticType) -> bool {
        match (self, other) {
            (SemanticType::Entity(a), SemanticType::Entity(b)) => {
                a.id_property().name() == b.id_property().name()
            }
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}
