use thiserror::Error;

use crate::metamodel::{key::TypeKey, typesystem::ManagedKind};

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible failure modes of type lookup, explicit registration, shape
/// inference, and content-type resolution. Each variant carries the offending native type key
/// (or path) so callers can report precise diagnostics.
///
/// # Error Categories
///
/// ## Lookup Errors
/// - [`Error::NotManaged`] - A managed descriptor was required but the key maps elsewhere
/// - [`Error::ManagedKindMismatch`] - Managed, but the wrong concrete kind
///
/// ## Registration Errors
/// - [`Error::AlreadyManaged`] - Explicit registration contradicts an existing mapping
/// - [`Error::EntityWithoutId`] - An entity definition names no identity property
///
/// ## Inference Errors
/// - [`Error::UnsupportedShape`] - Host reflection cannot describe the type
/// - [`Error::PropertyNotFound`] - A named property is absent from an extracted shape
///
/// ## Content Resolution Errors
/// - [`Error::CannotExtractContentType`] - A property does not lead to a value-object content
#[derive(Error, Debug)]
pub enum Error {
    // Lookup errors
    /// A managed (entity or value-object) descriptor was requested for a native type that is
    /// mapped to something else. The prior mapping is preserved.
    #[error("{key} is not managed, it is mapped to {actual}")]
    NotManaged {
        /// The requested native type key
        key: TypeKey,
        /// Variant name of the descriptor the key actually maps to
        actual: &'static str,
    },

    /// The native type is managed, but as the other concrete kind (entity vs value-object).
    #[error("{key} is managed as {actual}, expected {expected}")]
    ManagedKindMismatch {
        /// The requested native type key
        key: TypeKey,
        /// The managed kind the caller asked for
        expected: ManagedKind,
        /// The managed kind the key is mapped to
        actual: ManagedKind,
    },

    // Registration errors
    /// An explicit registration contradicts the mapping already installed for the key.
    /// The registration is aborted and the prior mapping preserved.
    #[error("{key} is already mapped to {existing}, refusing conflicting registration as {requested}")]
    AlreadyManaged {
        /// The native type key being registered
        key: TypeKey,
        /// Variant name of the installed descriptor
        existing: &'static str,
        /// Variant name of the conflicting registration
        requested: &'static str,
    },

    /// An entity was registered or inferred without an identity property, either in its
    /// definition or in its declared shape.
    #[error("entity {key} has no identity property in its definition or declared shape")]
    EntityWithoutId {
        /// The native type key of the entity
        key: TypeKey,
    },

    // Inference errors
    /// The host reflection collaborator cannot extract a coherent property shape for the
    /// native type. Nothing is installed for the key.
    #[error("host reflection cannot describe a property shape for {key}")]
    UnsupportedShape {
        /// The native type key that could not be described
        key: TypeKey,
    },

    /// A property referenced by name (an inherited identity property, or a content lookup)
    /// does not exist on the extracted shape of the class.
    #[error("property {property} not found on {class}")]
    PropertyNotFound {
        /// The class whose shape was searched
        class: String,
        /// The missing property name
        property: String,
    },

    // Content resolution errors
    /// Content-type resolution was invoked on a property that is not a value object and not a
    /// container of value objects. The path names the owner and property for diagnostics.
    #[error("cannot extract a content value object for {path}, found {found}")]
    CannotExtractContentType {
        /// Offending path, `Owner.property`
        path: String,
        /// Variant name of the descriptor actually found
        found: &'static str,
    },
}
