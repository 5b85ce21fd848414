// Copyright 2026 the deltascope contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]

//! # deltascope
//!
//! A thread-safe type-mapping and class-hierarchy-resolution engine for structural object
//! diffing. Given an arbitrary set of application-declared native types, possibly generic
//! and possibly related by inheritance, `deltascope` builds and caches a mapping from each
//! native type to a semantic descriptor capturing its role (primitive, value, entity,
//! value-object, collection, map, custom) and the information a structural-diff algorithm
//! needs: identity property, element and content types, and the dehydrated wire shape.
//!
//! ## Features
//!
//! - **Lazy resolution** - Unregistered types are inferred on first use from their
//!   nearest registered ancestor, with a deterministic tie-break over non-linear class
//!   hierarchies
//! - **Concurrent by design** - Lock-free lookups, at-most-once installation per type key
//!   under racing first lookups, no locks held across host reflection
//! - **Host-agnostic** - All structural knowledge flows through one narrow reflection
//!   trait implemented per host runtime
//! - **Closed descriptor model** - Consumers match exhaustively over a sealed sum type;
//!   no "unknown" fallback
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use deltascope::prelude::*;
//!
//! // Host reflection: here a toy host where every class has one string property.
//! struct Host;
//!
//! impl TypeReflector for Host {
//!     fn extract_shape(&self, _key: &TypeKey) -> deltascope::Result<NativeShape> {
//!         Ok(NativeShape::Structured(PropertySet::new(vec![
//!             Property::new("name", TypeKey::class("string")),
//!         ])))
//!     }
//!
//!     fn direct_supertypes(&self, _class: &str) -> Vec<String> {
//!         Vec::new()
//!     }
//! }
//!
//! let registry = TypeRegistry::new(Arc::new(Host));
//!
//! // First use infers and caches; later uses return the same installed descriptor.
//! let animal = registry.get_type(&TypeKey::class("Animal"))?;
//! assert_eq!(animal.kind_name(), "ValueObject");
//! assert!(registry.is_value_object(&TypeKey::class("Animal"))?);
//! # Ok::<(), deltascope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metamodel::key`] - Structural native-type keys, including generic parameterization
//! - [`metamodel::primitives`] - The built-in type vocabulary seeded at bootstrap
//! - [`metamodel::reflect`] - The host-reflection capability interface
//! - [`metamodel::typesystem`] - The semantic descriptor model, registry, inference
//!   engine, content-type resolution, and dehydration translation
//! - [`Error`] and [`Result`] - Failure taxonomy; nothing is swallowed or retried, and no
//!   partial descriptor is ever published
//!
//! The registry is the single shared mutable resource. Construct one per application
//! session and hand it (by reference or `Arc`) to every collaborator that needs type
//! resolution; isolated tests hold isolated registries.

pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

pub use error::Error;

/// The result type used throughout deltascope.
pub type Result<T> = std::result::Result<T, Error>;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

/// Type metamodel: keys, built-ins, reflection interface, and the semantic type system.
pub mod metamodel;
