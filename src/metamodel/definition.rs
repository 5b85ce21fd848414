use crate::metamodel::{key::TypeKey, typesystem::ManagedKind};

/// An application-declared entity class: structurally traversed, tracked by identity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDefinition {
    key: TypeKey,
    id_property: Option<String>,
}

impl EntityDefinition {
    /// Declares an entity; the identity property is taken from the extracted shape.
    #[must_use]
    pub fn new(key: TypeKey) -> Self {
        EntityDefinition {
            key,
            id_property: None,
        }
    }

    /// Overrides the identity property name, taking precedence over the shape's own hint.
    #[must_use]
    pub fn with_id_property(mut self, name: impl Into<String>) -> Self {
        self.id_property = Some(name.into());
        self
    }

    /// The native type key being declared.
    #[must_use]
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// The identity property override, if any.
    #[must_use]
    pub fn id_property(&self) -> Option<&str> {
        self.id_property.as_deref()
    }
}

/// An application-declared value-object class: structurally traversed, no identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueObjectDefinition {
    key: TypeKey,
}

impl ValueObjectDefinition {
    /// Declares a value object.
    #[must_use]
    pub fn new(key: TypeKey) -> Self {
        ValueObjectDefinition { key }
    }

    /// The native type key being declared.
    #[must_use]
    pub fn key(&self) -> &TypeKey {
        &self.key
    }
}

/// An explicit managed-class registration, bypassing prototype inference.
#[derive(Debug, Clone, PartialEq)]
pub enum ManagedDefinition {
    /// Register the key as an entity.
    Entity(EntityDefinition),
    /// Register the key as a value object.
    ValueObject(ValueObjectDefinition),
}

impl ManagedDefinition {
    /// The native type key being declared.
    #[must_use]
    pub fn key(&self) -> &TypeKey {
        match self {
            ManagedDefinition::Entity(definition) => definition.key(),
            ManagedDefinition::ValueObject(definition) => definition.key(),
        }
    }

    /// The managed kind this definition declares.
    #[must_use]
    pub fn kind(&self) -> ManagedKind {
        match self {
            ManagedDefinition::Entity(_) => ManagedKind::Entity,
            ManagedDefinition::ValueObject(_) => ManagedKind::ValueObject,
        }
    }
}
