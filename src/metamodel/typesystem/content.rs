//! On-demand content-type resolution for containers and maps.
//!
//! Container and map descriptors carry only the native keys of their content; the
//! descriptors behind those keys are resolved lazily, here, by going back through the
//! registry. The resolved pair itself is a transient value and is never cached; the
//! registry's own memoization of the sub-lookups is all the caching there is.

use crate::{
    metamodel::{
        primitives::BuiltinKind,
        typesystem::{
            ContainerType, EntityType, ManagedClass, MapType, SemanticType, SemanticTypeRc,
            TypeRegistry,
        },
    },
    Error, Result,
};

/// Resolved key and value descriptors of an associative (or position-indexed) container.
#[derive(Debug, Clone)]
pub struct MapContentType {
    key_type: SemanticTypeRc,
    value_type: SemanticTypeRc,
}

impl MapContentType {
    pub(crate) fn new(key_type: SemanticTypeRc, value_type: SemanticTypeRc) -> Self {
        MapContentType {
            key_type,
            value_type,
        }
    }

    /// The resolved descriptor of the keys.
    #[must_use]
    pub fn key_type(&self) -> &SemanticTypeRc {
        &self.key_type
    }

    /// The resolved descriptor of the values.
    #[must_use]
    pub fn value_type(&self) -> &SemanticTypeRc {
        &self.value_type
    }
}

impl TypeRegistry {
    /// Resolves the key and value descriptors of a map.
    ///
    /// # Errors
    /// Inference failures for the key or value type surface unchanged.
    pub fn map_content_type(&self, map_type: &MapType) -> Result<MapContentType> {
        Ok(MapContentType::new(
            self.get_type(map_type.key_type())?,
            self.get_type(map_type.value_type())?,
        ))
    }

    /// Resolves a container's content as a key/value pair for change appenders: the key is
    /// the built-in `i32` position type, the value the resolved item descriptor.
    ///
    /// # Errors
    /// Inference failures for the item type surface unchanged.
    pub fn container_content_type(&self, container: &ContainerType) -> Result<MapContentType> {
        Ok(MapContentType::new(
            self.get_type(&BuiltinKind::I32.key())?,
            self.get_type(container.item_type())?,
        ))
    }

    /// Resolves the element descriptor of a container.
    ///
    /// # Errors
    /// Inference failures for the item type surface unchanged.
    pub fn container_item_type(&self, container: &ContainerType) -> Result<SemanticTypeRc> {
        self.get_type(container.item_type())
    }

    /// Resolves a property of `owner` to the value-object class it contains, looking
    /// through one container level.
    ///
    /// # Errors
    /// [`Error::PropertyNotFound`] if `owner` declares no such property;
    /// [`Error::CannotExtractContentType`] with the offending `Owner.property` path when
    /// the property leads to anything other than a value object.
    pub fn child_value_object(
        &self,
        owner: &EntityType,
        property_name: &str,
    ) -> Result<ManagedClass> {
        let Some(property) = owner.managed_class().property(property_name) else {
            return Err(Error::PropertyNotFound {
                class: owner.base_key().to_string(),
                property: property_name.to_owned(),
            });
        };

        let semantic = self.get_type(property.value_type())?;
        if let SemanticType::ValueObject(value_object) = &*semantic {
            return Ok(value_object.managed_class().clone());
        }
        if let SemanticType::Container(container) = &*semantic {
            let content = self.get_type(container.item_type())?;
            if let SemanticType::ValueObject(value_object) = &*content {
                return Ok(value_object.managed_class().clone());
            }
        }

        Err(Error::CannotExtractContentType {
            path: format!("{}.{}", owner.base_key(), property_name),
            found: semantic.kind_name(),
        })
    }
}
