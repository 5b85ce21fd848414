//! Dehydrated (wire-facing) type translation.
//!
//! When a value is flattened for its wire representation, references to managed objects
//! are replaced by identity references, and containers carry the dehydrated form of their
//! content. This module derives the native key of that flattened shape. The translation is
//! a pure function of its input and the current registry state; all sub-lookups go back
//! through the registry, so results stay consistent with the live type model and are
//! stable once the touched types are registered.

use crate::{
    metamodel::{key::TypeKey, primitives::BuiltinKind, typesystem::SemanticType},
    Result,
};

use super::TypeRegistry;

impl TypeRegistry {
    /// The native key to use when producing or consuming the wire representation of `key`.
    ///
    /// Managed types dehydrate to the built-in `object-id` reference; arrays, containers,
    /// and maps rebuild their key around dehydrated content; everything else passes
    /// through unchanged.
    ///
    /// # Errors
    /// Inference failures for the key or its content types surface unchanged.
    pub fn dehydrated_type(&self, key: &TypeKey) -> Result<TypeKey> {
        let semantic = self.get_type(key)?;
        match &*semantic {
            SemanticType::Entity(_) | SemanticType::ValueObject(_) => Ok(BuiltinKind::ObjectId.key()),
            SemanticType::Array(_) => {
                let element = key.element().cloned().unwrap_or_else(|| BuiltinKind::Object.key());
                Ok(TypeKey::array(self.dehydrated_type(&element)?))
            }
            SemanticType::Container(container) => Ok(TypeKey::parameterized(
                key.erasure(),
                vec![self.dehydrated_type(container.item_type())?],
            )),
            SemanticType::Map(map) => Ok(TypeKey::parameterized(
                key.erasure(),
                vec![
                    self.dehydrated_type(map.key_type())?,
                    self.dehydrated_type(map.value_type())?,
                ],
            )),
            _ => Ok(key.clone()),
        }
    }
}
