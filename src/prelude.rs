//! # deltascope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the deltascope library. Import this module to get quick access to the essentials
//! for type mapping and resolution.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all deltascope operations
pub use crate::Error;

/// The result type used throughout deltascope
pub use crate::Result;

// ================================================================================================
// Native Type Keys and Built-ins
// ================================================================================================

/// Structural native-type key, the registry cache key
pub use crate::metamodel::key::TypeKey;

/// Built-in type kinds seeded at bootstrap
pub use crate::metamodel::primitives::BuiltinKind;

// ================================================================================================
// Host Reflection
// ================================================================================================

/// Host-reflection capability interface and shape model
pub use crate::metamodel::reflect::{NativeShape, Property, PropertySet, TypeReflector};

// ================================================================================================
// Explicit Registration
// ================================================================================================

/// Explicit managed-class registration definitions
pub use crate::metamodel::definition::{EntityDefinition, ManagedDefinition, ValueObjectDefinition};

// ================================================================================================
// Semantic Type System
// ================================================================================================

/// The semantic descriptor model and registry
pub use crate::metamodel::typesystem::{
    ContainerKind, ContainerType, EntityType, ManagedClass, ManagedKind, MapContentType, MapType,
    OptionalType, SemanticType, SemanticTypeRc, TypeFactory, TypeRegistry, ValueObjectType,
};
