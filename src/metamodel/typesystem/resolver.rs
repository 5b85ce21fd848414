use crate::metamodel::{
    key::TypeKey,
    primitives::BuiltinKind,
    reflect::TypeReflector,
    typesystem::{SemanticTypeRc, TypeRegistry},
};

/// A registered descriptor paired with its hierarchy distance from a concrete class.
///
/// `None` is the "unrelated" sentinel and sorts after every real distance.
struct DistancePair {
    distance: Option<u32>,
    candidate: SemanticTypeRc,
}

impl DistancePair {
    fn sort_key(&self) -> u32 {
        self.distance.unwrap_or(u32::MAX)
    }
}

/// Selects the best existing descriptor to seed inference for an unmapped native type.
pub(crate) struct PrototypeResolver<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> PrototypeResolver<'a> {
    pub(crate) fn new(registry: &'a TypeRegistry) -> Self {
        PrototypeResolver { registry }
    }

    /// Finds the nearest registered ancestor of `key`, or `None` if nothing is related.
    ///
    /// Arrays short-circuit to the built-in generic array descriptor; reflective array
    /// typing is too irregular across hosts to participate in the distance search. For
    /// everything else the scan walks a live snapshot of the registry in registration
    /// order: a direct supertype (distance 1) returns immediately, otherwise the minimum
    /// distance wins and ties keep the first-registered candidate.
    pub(crate) fn find_nearest(&self, key: &TypeKey) -> Option<SemanticTypeRc> {
        if key.is_array() {
            return self.registry.lookup(&BuiltinKind::Array.key());
        }

        let concrete = key.erasure();
        let reflector: &dyn TypeReflector = self.registry.reflector();
        let mut distances: Vec<DistancePair> = Vec::new();

        for candidate in self.registry.prototype_candidates() {
            let distance = reflector.class_distance(concrete, candidate.base_key().erasure());

            // A direct supertype is always optimal, no need to scan further.
            if distance == Some(1) {
                return Some(candidate);
            }

            distances.push(DistancePair { distance, candidate });
        }

        // Stable sort keeps registration order among equal distances.
        distances.sort_by_key(DistancePair::sort_key);

        distances
            .into_iter()
            .next()
            .filter(|nearest| nearest.distance.is_some())
            .map(|nearest| nearest.candidate)
    }
}
