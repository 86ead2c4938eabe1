//! Runtime-validated homogeneous collections.
//!
//! A [`TypedList`] holds values of one declared type; a [`TypedMap`] holds ordered
//! (key, value) pairs with a declared key type and a declared value type. Types are
//! declared by name (`"int"`, `"string"`, `"KeyClass"`) and resolved once against a
//! [`TypeRegistry`]. Every insertion is checked, and a raw value headed for a
//! class-typed slot is run through that class's constructor before it is stored.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  types.rs   │────▶│ registry.rs  │────▶│ validate.rs │
//! │ (Primitive, │     │  (resolve)   │     │ (validate,  │
//! │  Descriptor)│     │              │     │  coercion)  │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        ▲                                   │       │
//!        │                                   ▼       ▼
//! ┌─────────────┐                    ┌──────────┐ ┌─────────┐
//! │  value.rs   │                    │ list.rs  │ │ map.rs  │
//! │  class.rs   │                    │TypedList │ │TypedMap │
//! └─────────────┘                    └──────────┘ └─────────┘
//!                                           │       │
//!                                           ▼       ▼
//!                                   ┌─────────────────────┐
//!                                   │    contracts.rs     │
//!                                   │ (debug invariants)  │
//!                                   └─────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use typed_array::{testing::int_wrapper, TypeRegistry, TypedList, TypedMap};
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(int_wrapper("KeyClass"));
//!
//! let mut list = TypedList::new(&registry, "int", 1..=3)?;
//! list.add(4)?;
//!
//! let map = TypedMap::new(&registry, "KeyClass", "string", [1, 2], ["a", "b"])?;
//! assert_eq!(map.get(1)?.as_str(), Some("a"));
//! ```
//!
//! Containers are single-threaded data structures. Mutation is a multi-step
//! update of one or two vectors; wrap a container in a lock before sharing it.

pub mod class;
pub mod contracts;
mod error;
mod list;
mod map;
mod registry;
pub mod testing;
mod types;
pub mod validate;
mod value;

pub use class::{ClassDef, ConstructibleFrom, DisplayFn};
pub use error::{ConstructError, TypedError};
pub use list::TypedList;
pub use map::{DuplicateKeyPolicy, IntoKeyItem, Iter as MapIter, KeyItem, MapOptions, TypedMap};
pub use registry::TypeRegistry;
pub use types::{normalize_alias, Primitive, TypeDescriptor, TypeKind};
pub use value::{Fields, Instance, Value};
