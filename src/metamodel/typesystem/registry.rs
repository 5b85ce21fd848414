//! Central type registry.
//!
//! This module provides the [`TypeRegistry`], a thread-safe, append-only cache mapping
//! native type keys to semantic descriptors. It is the one shared mutable resource of the
//! engine and the entry point every collaborator goes through, so each native type touched
//! by the system is resolved exactly once.
//!
//! # Registry Architecture
//!
//! - **Primary cache**: a concurrent hash map from [`TypeKey`] to installed descriptor
//! - **Ordered snapshot**: an append-only list in installation order, scanned by the
//!   prototype resolver; registration sequence doubles as the deterministic tie-break
//!   between equal-distance ancestors
//! - **Bootstrap**: built-in primitives, well-known values, raw containers, the generic
//!   array, and the optional wrapper are seeded at construction
//!
//! # Thread Safety
//!
//! The registry supports concurrent reads and concurrent first-writes without external
//! locking by callers:
//! - Lookups are lock-free reads of the sharded cache
//! - A cache miss runs inference *outside* any lock (reflection is side-effect free, so
//!   redundant racing computation is safe to discard) and installs insert-if-absent:
//!   the first successful writer wins and every racer converges on the stored instance
//! - The resolver's distance scan reads a live snapshot; entries installed mid-scan by
//!   other threads may be invisible to that scan and are picked up on a later miss
//!
//! # Lifecycle
//!
//! Installed descriptors are immutable and never replaced or evicted; the registry lives
//! for the lifetime of the owning session. Construct one registry per application
//! configuration rather than sharing a process-wide singleton, so isolated tests can hold
//! isolated registries.

use std::sync::Arc;

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    metamodel::{
        definition::ManagedDefinition,
        key::TypeKey,
        primitives::BuiltinKind,
        reflect::{Property, TypeReflector},
        typesystem::{
            resolver::PrototypeResolver, ContainerKind, ContainerType, ManagedKind, MapType,
            OptionalType, SemanticType, SemanticTypeRc, TypeFactory,
        },
    },
    Error, Result,
};

/// Concurrent, idempotent mapping from native type key to semantic descriptor.
///
/// Lookups are lock-free; a cache miss infers a descriptor from the nearest registered
/// ancestor and installs it insert-if-absent, so racing first lookups converge on one
/// stored instance per key. Installed descriptors are immutable and never evicted.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use deltascope::prelude::*;
///
/// struct Host;
///
/// impl TypeReflector for Host {
///     fn extract_shape(&self, _key: &TypeKey) -> deltascope::Result<NativeShape> {
///         Ok(NativeShape::Structured(PropertySet::new(vec![
///             Property::new("name", TypeKey::class("string")),
///         ])))
///     }
///
///     fn direct_supertypes(&self, _class: &str) -> Vec<String> {
///         Vec::new()
///     }
/// }
///
/// let registry = TypeRegistry::new(Arc::new(Host));
/// let animal = registry.get_type(&TypeKey::class("Animal"))?;
/// assert_eq!(animal.kind_name(), "ValueObject");
/// # Ok::<(), deltascope::Error>(())
/// ```
pub struct TypeRegistry {
    /// Primary cache: native key to installed descriptor.
    types: DashMap<TypeKey, SemanticTypeRc>,
    /// Descriptors in installation order, scanned by the prototype resolver.
    ordered: boxcar::Vec<SemanticTypeRc>,
    /// Inference engine for cache misses and explicit definitions.
    factory: TypeFactory,
    /// Host reflection capability.
    reflector: Arc<dyn TypeReflector>,
    /// Singleton mapping for the `object` top type, outside the general cache.
    object_type: SemanticTypeRc,
}

impl TypeRegistry {
    /// Creates a registry over the given host reflection, seeded with the built-ins.
    ///
    /// Seeds primitives (`bool`, `char`, the integer and float widths, `string`, `enum`),
    /// the generic array, the well-known value types (`decimal`, the date/time keys,
    /// `uuid`, `uri`, `url`, `path`, `object-id`), the raw `list`/`set`/`map` containers,
    /// and the raw `optional` wrapper.
    #[must_use]
    pub fn new(reflector: Arc<dyn TypeReflector>) -> Self {
        let registry = TypeRegistry {
            types: DashMap::new(),
            ordered: boxcar::Vec::new(),
            factory: TypeFactory::new(reflector.clone()),
            reflector,
            object_type: Arc::new(SemanticType::Value(BuiltinKind::Object.key())),
        };
        registry.initialize_builtins();
        registry
    }

    fn initialize_builtins(&self) {
        for kind in [
            BuiltinKind::Bool,
            BuiltinKind::Char,
            BuiltinKind::I8,
            BuiltinKind::I16,
            BuiltinKind::I32,
            BuiltinKind::I64,
            BuiltinKind::F32,
            BuiltinKind::F64,
            BuiltinKind::String,
            BuiltinKind::Enum,
        ] {
            self.install(kind.key(), Arc::new(SemanticType::Primitive(kind.key())));
        }

        self.install(
            BuiltinKind::Array.key(),
            Arc::new(SemanticType::Array(BuiltinKind::Array.key())),
        );

        for kind in [
            BuiltinKind::Decimal,
            BuiltinKind::Date,
            BuiltinKind::Time,
            BuiltinKind::DateTime,
            BuiltinKind::Instant,
            BuiltinKind::Duration,
            BuiltinKind::Uuid,
            BuiltinKind::Uri,
            BuiltinKind::Url,
            BuiltinKind::Path,
            BuiltinKind::ObjectId,
        ] {
            self.install(kind.key(), Arc::new(SemanticType::Value(kind.key())));
        }

        self.install(
            BuiltinKind::List.key(),
            Arc::new(SemanticType::Container(ContainerType::new(
                BuiltinKind::List.key(),
                ContainerKind::List,
                BuiltinKind::Object.key(),
            ))),
        );
        self.install(
            BuiltinKind::Set.key(),
            Arc::new(SemanticType::Container(ContainerType::new(
                BuiltinKind::Set.key(),
                ContainerKind::Set,
                BuiltinKind::Object.key(),
            ))),
        );
        self.install(
            BuiltinKind::Map.key(),
            Arc::new(SemanticType::Map(MapType::new(
                BuiltinKind::Map.key(),
                BuiltinKind::Object.key(),
                BuiltinKind::Object.key(),
            ))),
        );
        self.install(
            BuiltinKind::Optional.key(),
            Arc::new(SemanticType::Optional(OptionalType::new(
                BuiltinKind::Optional.key(),
                BuiltinKind::Object.key(),
            ))),
        );

        log::debug!("seeded {} built-in type mappings", self.types.len());
    }

    /// Returns the cached descriptor for `key`, inferring and installing one on a miss.
    ///
    /// The `object` top type is answered first from its singleton. On a miss, the nearest
    /// registered ancestor seeds inference; racing callers may compute redundantly, but
    /// exactly one result is installed per key and all callers receive that instance.
    /// Installing an entity additionally ensures its identity-property type is mapped
    /// (as a plain value if nothing richer claims it).
    ///
    /// # Errors
    /// Surfaces inference failures ([`Error::UnsupportedShape`],
    /// [`Error::PropertyNotFound`]) unchanged; nothing partial is installed.
    pub fn get_type(&self, key: &TypeKey) -> Result<SemanticTypeRc> {
        if is_object_key(key) {
            return Ok(self.object_type.clone());
        }

        if let Some(found) = self.types.get(key) {
            return Ok(found.clone());
        }

        let prototype = PrototypeResolver::new(self).find_nearest(key);
        // Inference runs without any registry lock held.
        let inferred = self.factory.infer(key, prototype)?;
        let installed = self.install(key.clone(), inferred);
        self.ensure_id_property_type(&installed);
        Ok(installed)
    }

    /// Returns the managed descriptor for `key`, checking its concrete kind.
    ///
    /// # Errors
    /// [`Error::NotManaged`] if the key maps to a non-managed descriptor,
    /// [`Error::ManagedKindMismatch`] if it is managed as the other kind; inference
    /// failures surface as in [`get_type`](Self::get_type).
    pub fn get_managed_type(&self, key: &TypeKey, expected: ManagedKind) -> Result<SemanticTypeRc> {
        let semantic = self.get_type(key)?;
        match semantic.managed_kind() {
            None => Err(Error::NotManaged {
                key: key.clone(),
                actual: semantic.kind_name(),
            }),
            Some(actual) if actual != expected => Err(Error::ManagedKindMismatch {
                key: key.clone(),
                expected,
                actual,
            }),
            Some(_) => Ok(semantic),
        }
    }

    /// Returns `true` if `key` maps to a value-object descriptor.
    ///
    /// # Errors
    /// Inference failures surface as in [`get_type`](Self::get_type).
    pub fn is_value_object(&self, key: &TypeKey) -> Result<bool> {
        Ok(matches!(
            &*self.get_type(key)?,
            SemanticType::ValueObject(_)
        ))
    }

    /// Resolves the descriptor of a declared property's value type.
    ///
    /// # Errors
    /// Inference failures surface as in [`get_type`](Self::get_type).
    pub fn get_property_type(&self, property: &Property) -> Result<SemanticTypeRc> {
        self.get_type(property.value_type())
    }

    /// Explicitly registers an application-declared entity or value-object class.
    ///
    /// Idempotent for an equivalent existing mapping.
    ///
    /// # Errors
    /// [`Error::AlreadyManaged`] if the key is already mapped incompatibly;
    /// [`Error::EntityWithoutId`] and shape-extraction failures from building the
    /// definition. The prior mapping is preserved on every failure.
    pub fn register_managed(&self, definition: &ManagedDefinition) -> Result<()> {
        // Built outside any lock; reflection must stay side-effect free.
        let built = self.factory.create_from_definition(definition)?;
        self.register_explicit(Arc::new(built))
    }

    /// Explicitly registers `key` as an immutable atomic value.
    ///
    /// # Errors
    /// [`Error::AlreadyManaged`] if the key is already mapped to a different variant.
    pub fn register_value(&self, key: TypeKey) -> Result<()> {
        self.register_explicit(Arc::new(SemanticType::Value(key)))
    }

    /// Explicitly registers `key` as a user-declared custom value, opaque to the engine.
    ///
    /// # Errors
    /// [`Error::AlreadyManaged`] if the key is already mapped to a different variant.
    pub fn register_custom(&self, key: TypeKey) -> Result<()> {
        self.register_explicit(Arc::new(SemanticType::Custom(key)))
    }

    /// The singleton descriptor of the `object` top type.
    #[must_use]
    pub fn object_type(&self) -> SemanticTypeRc {
        self.object_type.clone()
    }

    /// Number of installed mappings (built-ins included, the top type excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no mapping is installed; never true after construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Installed descriptor for `key`, without triggering inference.
    pub(crate) fn lookup(&self, key: &TypeKey) -> Option<SemanticTypeRc> {
        self.types.get(key).map(|found| found.clone())
    }

    /// The host reflection capability.
    pub(crate) fn reflector(&self) -> &dyn TypeReflector {
        self.reflector.as_ref()
    }

    /// Live snapshot of installed descriptors in installation order.
    pub(crate) fn prototype_candidates(&self) -> impl Iterator<Item = SemanticTypeRc> + '_ {
        self.ordered.iter().map(|(_, candidate)| candidate.clone())
    }

    /// Insert-if-absent installation. The first writer wins; every caller receives the
    /// stored instance.
    fn install(&self, key: TypeKey, new_type: SemanticTypeRc) -> SemanticTypeRc {
        match self.types.entry(key) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => {
                self.ordered.push(new_type.clone());
                slot.insert(new_type.clone());
                new_type
            }
        }
    }

    /// Insert-if-absent with the explicit-registration conflict rule.
    fn register_explicit(&self, new_type: SemanticTypeRc) -> Result<()> {
        let key = new_type.base_key().clone();
        let installed = match self.types.entry(key) {
            Entry::Occupied(existing) => {
                if !existing.get().compatible(&new_type) {
                    return Err(Error::AlreadyManaged {
                        key: new_type.base_key().clone(),
                        existing: existing.get().kind_name(),
                        requested: new_type.kind_name(),
                    });
                }
                existing.get().clone()
            }
            Entry::Vacant(slot) => {
                log::debug!(
                    "registered {} as {}",
                    new_type.base_key(),
                    new_type.kind_name()
                );
                self.ordered.push(new_type.clone());
                slot.insert(new_type.clone());
                new_type
            }
        };
        self.ensure_id_property_type(&installed);
        Ok(())
    }

    /// Maps an installed entity's identity-property type as a plain value if nothing else
    /// claims it. Never overwrites a richer mapping and never re-enters inference.
    fn ensure_id_property_type(&self, installed: &SemanticType) {
        let SemanticType::Entity(entity) = installed else {
            return;
        };
        let id_key = entity.id_property_type();
        if self.types.contains_key(id_key) {
            return;
        }
        self.install(
            id_key.clone(),
            Arc::new(self.factory.infer_id_property_type(id_key)),
        );
    }
}

fn is_object_key(key: &TypeKey) -> bool {
    !key.is_array() && !key.is_parameterized() && key.erasure() == BuiltinKind::Object.name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metamodel::definition::{EntityDefinition, ValueObjectDefinition},
        test::FixtureReflector,
    };

    fn registry(reflector: FixtureReflector) -> TypeRegistry {
        TypeRegistry::new(Arc::new(reflector))
    }

    #[test]
    fn test_builtins_seeded() {
        let registry = registry(FixtureReflector::new());

        let boolean = registry.get_type(&BuiltinKind::Bool.key()).unwrap();
        assert_eq!(boolean.kind_name(), "Primitive");

        let uuid = registry.get_type(&BuiltinKind::Uuid.key()).unwrap();
        assert_eq!(uuid.kind_name(), "Value");

        let list = registry.get_type(&BuiltinKind::List.key()).unwrap();
        assert_eq!(list.kind_name(), "Container");

        assert!(!registry.is_empty());
    }

    #[test]
    fn test_object_top_type_is_singleton() {
        let registry = registry(FixtureReflector::new());

        let first = registry.get_type(&TypeKey::class("object")).unwrap();
        let second = registry.get_type(&TypeKey::class("object")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &registry.object_type()));

        // The singleton never enters the general cache.
        assert!(registry.lookup(&TypeKey::class("object")).is_none());
    }

    #[test]
    fn test_get_type_is_idempotent() {
        let reflector = FixtureReflector::new().class(
            "Address",
            &[],
            vec![Property::new("city", TypeKey::class("string"))],
        );
        let registry = registry(reflector);

        let first = registry.get_type(&TypeKey::class("Address")).unwrap();
        let second = registry.get_type(&TypeKey::class("Address")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_spawn_from_value_object_prototype() {
        // Animal is registered; Dog extends Animal and resolves through it, but the
        // returned descriptor is shaped for Dog itself.
        let reflector = FixtureReflector::new()
            .class(
                "Animal",
                &[],
                vec![Property::new("name", TypeKey::class("string"))],
            )
            .class(
                "Dog",
                &["Animal"],
                vec![
                    Property::new("name", TypeKey::class("string")),
                    Property::new("breed", TypeKey::class("string")),
                ],
            );
        let registry = registry(reflector);
        registry
            .register_managed(&ManagedDefinition::ValueObject(ValueObjectDefinition::new(
                TypeKey::class("Animal"),
            )))
            .unwrap();

        let dog = registry.get_type(&TypeKey::class("Dog")).unwrap();
        let SemanticType::ValueObject(value_object) = &*dog else {
            panic!("expected value object, got {}", dog.kind_name());
        };
        assert_eq!(value_object.base_key(), &TypeKey::class("Dog"));
        assert_eq!(value_object.managed_class().properties().len(), 2);
    }

    #[test]
    fn test_no_ancestor_builds_fresh_descriptor() {
        let reflector = FixtureReflector::new().class(
            "Standalone",
            &[],
            vec![Property::new("field", TypeKey::class("i32"))],
        );
        let registry = registry(reflector);

        let standalone = registry.get_type(&TypeKey::class("Standalone")).unwrap();
        assert_eq!(standalone.kind_name(), "ValueObject");
    }

    #[test]
    fn test_inference_failure_installs_nothing() {
        let registry = registry(FixtureReflector::new());

        let result = registry.get_type(&TypeKey::class("Unknown"));
        assert!(matches!(result, Err(Error::UnsupportedShape { .. })));
        assert!(registry.lookup(&TypeKey::class("Unknown")).is_none());
    }

    #[test]
    fn test_array_keys_share_single_descriptor() {
        let registry = registry(FixtureReflector::new());

        let generic = registry.get_type(&BuiltinKind::Array.key()).unwrap();
        let ints = registry
            .get_type(&TypeKey::array(TypeKey::class("i32")))
            .unwrap();
        let nested = registry
            .get_type(&TypeKey::array(TypeKey::array(TypeKey::class("Foo"))))
            .unwrap();

        assert!(Arc::ptr_eq(&generic, &ints));
        assert!(Arc::ptr_eq(&generic, &nested));
    }

    #[test]
    fn test_register_value_and_custom_conflicts() {
        let registry = registry(FixtureReflector::new());

        registry.register_value(TypeKey::class("Money")).unwrap();
        // Re-registering identically is a no-op.
        registry.register_value(TypeKey::class("Money")).unwrap();

        let conflict = registry.register_custom(TypeKey::class("Money"));
        assert!(matches!(conflict, Err(Error::AlreadyManaged { .. })));

        let money = registry.get_type(&TypeKey::class("Money")).unwrap();
        assert_eq!(money.kind_name(), "Value");
    }

    #[test]
    fn test_register_managed_conflicts() {
        let reflector = FixtureReflector::new().entity(
            "Person",
            &[],
            vec![
                Property::new("id", TypeKey::class("i64")),
                Property::new("name", TypeKey::class("string")),
            ],
            "id",
        );
        let registry = registry(reflector);

        let as_entity = ManagedDefinition::Entity(EntityDefinition::new(TypeKey::class("Person")));
        registry.register_managed(&as_entity).unwrap();
        registry.register_managed(&as_entity).unwrap();

        let as_value_object =
            ManagedDefinition::ValueObject(ValueObjectDefinition::new(TypeKey::class("Person")));
        let conflict = registry.register_managed(&as_value_object);
        assert!(matches!(conflict, Err(Error::AlreadyManaged { .. })));

        // A different identity property is a conflict too.
        let other_id = ManagedDefinition::Entity(
            EntityDefinition::new(TypeKey::class("Person")).with_id_property("name"),
        );
        assert!(matches!(
            registry.register_managed(&other_id),
            Err(Error::AlreadyManaged { .. })
        ));
    }

    #[test]
    fn test_entity_registers_id_property_type() {
        let reflector = FixtureReflector::new().entity(
            "Person",
            &[],
            vec![Property::new("id", TypeKey::class("PersonId"))],
            "id",
        );
        let registry = registry(reflector);

        registry
            .register_managed(&ManagedDefinition::Entity(EntityDefinition::new(
                TypeKey::class("Person"),
            )))
            .unwrap();

        // PersonId was never described to the reflector; it is mapped as a plain value.
        let id_type = registry.lookup(&TypeKey::class("PersonId")).unwrap();
        assert_eq!(id_type.kind_name(), "Value");
    }

    #[test]
    fn test_id_property_type_never_overwrites_richer_mapping() {
        let reflector = FixtureReflector::new().entity(
            "Person",
            &[],
            vec![Property::new("id", TypeKey::class("PersonId"))],
            "id",
        );
        let registry = registry(reflector);

        registry.register_custom(TypeKey::class("PersonId")).unwrap();
        registry
            .register_managed(&ManagedDefinition::Entity(EntityDefinition::new(
                TypeKey::class("Person"),
            )))
            .unwrap();

        let id_type = registry.get_type(&TypeKey::class("PersonId")).unwrap();
        assert_eq!(id_type.kind_name(), "Custom");
    }

    #[test]
    fn test_get_managed_type_kind_checks() {
        let reflector = FixtureReflector::new().class(
            "Address",
            &[],
            vec![Property::new("city", TypeKey::class("string"))],
        );
        let registry = registry(reflector);

        let not_managed = registry.get_managed_type(&BuiltinKind::Uuid.key(), ManagedKind::Entity);
        assert!(matches!(not_managed, Err(Error::NotManaged { .. })));

        let mismatch = registry.get_managed_type(&TypeKey::class("Address"), ManagedKind::Entity);
        assert!(matches!(
            mismatch,
            Err(Error::ManagedKindMismatch {
                expected: ManagedKind::Entity,
                actual: ManagedKind::ValueObject,
                ..
            })
        ));

        let found = registry
            .get_managed_type(&TypeKey::class("Address"), ManagedKind::ValueObject)
            .unwrap();
        assert!(found.is_managed());
    }

    #[test]
    fn test_is_value_object() {
        let reflector = FixtureReflector::new().class(
            "Address",
            &[],
            vec![Property::new("city", TypeKey::class("string"))],
        );
        let registry = registry(reflector);

        assert!(registry.is_value_object(&TypeKey::class("Address")).unwrap());
        assert!(!registry.is_value_object(&BuiltinKind::Uuid.key()).unwrap());
    }

    #[test]
    fn test_optional_wrapper_binds_inner_key() {
        let reflector = FixtureReflector::new().class(
            "Address",
            &[],
            vec![Property::new("city", TypeKey::class("string"))],
        );
        let registry = registry(reflector);

        let optional = registry
            .get_type(&TypeKey::parameterized(
                "optional",
                vec![TypeKey::class("Address")],
            ))
            .unwrap();
        let SemanticType::Optional(optional_type) = &*optional else {
            panic!("expected optional, got {}", optional.kind_name());
        };
        assert_eq!(optional_type.inner_type(), &TypeKey::class("Address"));
    }

    #[test]
    fn test_parameterized_keys_cached_independently() {
        let reflector = FixtureReflector::new()
            .class("Foo", &[], vec![Property::new("x", TypeKey::class("i32"))])
            .class("Bar", &[], vec![Property::new("y", TypeKey::class("i32"))]);
        let registry = registry(reflector);

        let list_foo = registry
            .get_type(&TypeKey::parameterized("list", vec![TypeKey::class("Foo")]))
            .unwrap();
        let list_bar = registry
            .get_type(&TypeKey::parameterized("list", vec![TypeKey::class("Bar")]))
            .unwrap();

        let SemanticType::Container(foo_container) = &*list_foo else {
            panic!("expected container");
        };
        let SemanticType::Container(bar_container) = &*list_bar else {
            panic!("expected container");
        };
        assert_eq!(foo_container.item_type(), &TypeKey::class("Foo"));
        assert_eq!(bar_container.item_type(), &TypeKey::class("Bar"));
    }
}
