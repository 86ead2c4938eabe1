//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixture classes to avoid duplication.

#![doc(hidden)]

use crate::class::ClassDef;
use crate::error::ConstructError;
use crate::registry::TypeRegistry;
use crate::value::{Fields, Instance, Value};

/// A class whose constructor wraps an integer into a `value` field.
pub fn int_wrapper(name: &str) -> ClassDef {
    ClassDef::new(name).constructor(|raw: &Value| -> Result<Fields, ConstructError> {
        match raw {
            Value::Integer(i) => Ok(single("value", Value::Integer(*i))),
            other => Err(ConstructError::new(format!(
                "expected integer, got {}",
                other.type_name()
            ))),
        }
    })
}

/// A class whose constructor wraps any value into a `value` field.
pub fn mixed_wrapper(name: &str) -> ClassDef {
    ClassDef::new(name).constructor(|raw: &Value| -> Result<Fields, ConstructError> {
        Ok(single("value", raw.clone()))
    })
}

fn single(name: &str, value: Value) -> Fields {
    let mut fields = Fields::new();
    fields.insert(name.to_string(), value);
    fields
}

/// Registry with the fixture classes used throughout the tests:
///
/// - `KeyClass`, `ValueClass`: integer wrappers
/// - `TestClass`: wraps anything
/// - `TestInterface`: interface, never constructible
/// - `KeyClassWithToString`, `ValueClassWithToString`: subclasses with a display hook
/// - `Pair`: plain class with no constructor, used as a `key`/`item` carrier
pub fn fixture_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    let key = registry.register(int_wrapper("KeyClass"));
    let value = registry.register(int_wrapper("ValueClass"));
    registry.register(mixed_wrapper("TestClass"));
    registry.register(ClassDef::interface("TestInterface"));
    registry.register(
        ClassDef::new("KeyClassWithToString")
            .extends(&key)
            .display(show_value),
    );
    registry.register(
        ClassDef::new("ValueClassWithToString")
            .extends(&value)
            .display(show_value),
    );
    registry.register(ClassDef::new("Pair"));
    registry
}

fn show_value(instance: &Instance) -> String {
    instance
        .field("value")
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Build an instance of a fixture class with a single `value` field.
///
/// Panics if the class is not registered; fixtures only.
pub fn make(registry: &TypeRegistry, class: &str, value: impl Into<Value>) -> Value {
    let def = registry
        .class(class)
        .unwrap_or_else(|| panic!("fixture class {} not registered", class));
    Value::Object(Instance::with_field(def, "value", value))
}

/// Build a `Pair { key, item }` instance, the loose shape a key/item callback may return.
pub fn make_pair(registry: &TypeRegistry, key: impl Into<Value>, item: impl Into<Value>) -> Value {
    let def = registry
        .class("Pair")
        .unwrap_or_else(|| panic!("fixture class Pair not registered"));
    let mut fields = Fields::new();
    fields.insert("key".to_string(), key.into());
    fields.insert("item".to_string(), item.into());
    Value::Object(Instance::new(def, fields))
}

/// Read the integer `value` field of a fixture instance.
pub fn value_of(v: &Value) -> Option<i64> {
    v.as_instance()?.field("value")?.as_integer()
}
