//! Type metamodel: keys, built-ins, reflection interface, and the semantic type system.
//!
//! The metamodel is the engine's view of the host application's types. Native types are
//! identified by structural [`key::TypeKey`]s, described through the
//! [`reflect::TypeReflector`] capability, declared explicitly via
//! [`definition::ManagedDefinition`]s, and mapped to semantic descriptors by the
//! [`typesystem`] registry.

/// Explicit managed-class registration definitions.
pub mod definition;

/// Structural native-type keys, including generic parameterization.
pub mod key;

/// The built-in type vocabulary seeded into every registry at bootstrap.
pub mod primitives;

/// Host-reflection capability interface and the extracted shape model.
pub mod reflect;

/// The semantic descriptor model, registry, inference engine, and translators.
pub mod typesystem;
