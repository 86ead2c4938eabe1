// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `TypedMap`: ordered (key, value) pairs with independently typed keys and values.
//!
//! Storage is two parallel vectors, `keys[i]` paired with `values[i]`. Insertion order
//! is the iteration order. Keys are compared by value, never by identity, and a lookup
//! key goes through the same coercion as an inserted key: `get(1)` on a map keyed by
//! an integer-wrapping class finds the pair whose key wraps `1`.
//!
//! # Duplicate keys
//!
//! | Path          | Behavior                                                  |
//! |---------------|-----------------------------------------------------------|
//! | construction  | rejected with `DuplicateKey`                              |
//! | `add`         | per [`DuplicateKeyPolicy`]: append (default) or replace   |
//! | `merge`       | `other` wins, in `other`'s order                          |
//! | derived maps  | replayed through the receiver's policy, like `add`        |
//!
//! `get`/`exists`/`unset` always act on the first matching pair.

use log::debug;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::contracts::{check_all_conform, check_keys_distinct, check_map_aligned};
use crate::error::TypedError;
use crate::registry::TypeRegistry;
use crate::types::TypeDescriptor;
use crate::validate::{validate, validate_all};
use crate::value::{quote, Value};

/// What `add` does when the key is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKeyPolicy {
    /// Append a second pair. Lookups still see the first one.
    #[default]
    Append,
    /// Overwrite the existing pair's value in place.
    Replace,
}

/// Map behavior knobs. Derived maps inherit the receiver's options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub duplicate_keys: DuplicateKeyPolicy,
}

/// Explicit result shape for key/item-producing callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyItem {
    pub key: Value,
    pub item: Value,
}

impl KeyItem {
    pub fn new(key: impl Into<Value>, item: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            item: item.into(),
        }
    }
}

/// Anything a `map_with_keys_and_*` callback may return.
///
/// `KeyItem` and `(key, item)` tuples always convert. A bare `Value` converts only
/// when it is an instance with both a `key` and an `item` field; anything else is a
/// [`TypedError::Shape`].
pub trait IntoKeyItem {
    fn into_key_item(self) -> Result<KeyItem, TypedError>;
}

impl IntoKeyItem for KeyItem {
    fn into_key_item(self) -> Result<KeyItem, TypedError> {
        Ok(self)
    }
}

impl<K: Into<Value>, V: Into<Value>> IntoKeyItem for (K, V) {
    fn into_key_item(self) -> Result<KeyItem, TypedError> {
        Ok(KeyItem::new(self.0, self.1))
    }
}

impl IntoKeyItem for Value {
    fn into_key_item(self) -> Result<KeyItem, TypedError> {
        let Value::Object(instance) = self else {
            return Err(TypedError::Shape { missing: "key" });
        };
        let key = instance
            .field("key")
            .cloned()
            .ok_or(TypedError::Shape { missing: "key" })?;
        let item = instance
            .field("item")
            .cloned()
            .ok_or(TypedError::Shape { missing: "item" })?;
        Ok(KeyItem { key, item })
    }
}

/// Iterator over `(key, value)` pairs in insertion order.
pub type Iter<'a> = std::iter::Zip<std::slice::Iter<'a, Value>, std::slice::Iter<'a, Value>>;

#[derive(Debug, Clone, PartialEq)]
pub struct TypedMap {
    key_descriptor: TypeDescriptor,
    value_descriptor: TypeDescriptor,
    keys: Vec<Value>,
    values: Vec<Value>,
    options: MapOptions,
}

impl TypedMap {
    /// Resolve both type names and build a map from parallel batches.
    pub fn new<K, V>(
        registry: &TypeRegistry,
        key_type: &str,
        value_type: &str,
        keys: K,
        values: V,
    ) -> Result<Self, TypedError>
    where
        K: IntoIterator,
        K::Item: Into<Value>,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        let keys: Vec<Value> = keys.into_iter().map(Into::into).collect();
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        // Length is checked before resolution so a bad batch fails the same way
        // regardless of the declared types.
        check_lengths(&keys, &values)?;
        let key_descriptor = registry.resolve(key_type)?;
        let value_descriptor = registry.resolve(value_type)?;
        Self::from_descriptors(key_descriptor, value_descriptor, keys, values)
    }

    /// An empty map.
    pub fn empty(
        registry: &TypeRegistry,
        key_type: &str,
        value_type: &str,
    ) -> Result<Self, TypedError> {
        Self::new(
            registry,
            key_type,
            value_type,
            Vec::<Value>::new(),
            Vec::<Value>::new(),
        )
    }

    /// Build a map over already-resolved descriptors.
    ///
    /// Checks lengths, validates every key then every value, then rejects duplicate
    /// keys (compared after coercion).
    pub fn from_descriptors<K, V>(
        key_descriptor: TypeDescriptor,
        value_descriptor: TypeDescriptor,
        keys: K,
        values: V,
    ) -> Result<Self, TypedError>
    where
        K: IntoIterator,
        K::Item: Into<Value>,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        let keys: Vec<Value> = keys.into_iter().map(Into::into).collect();
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        check_lengths(&keys, &values)?;

        let keys = validate_all(&key_descriptor, keys)?;
        let values = validate_all(&value_descriptor, values)?;
        for (i, key) in keys.iter().enumerate() {
            if keys[..i].contains(key) {
                return Err(TypedError::DuplicateKey {
                    key: key.export(),
                });
            }
        }

        check_map_aligned(&keys, &values);
        check_keys_distinct(&keys);
        check_all_conform(&key_descriptor, &keys);
        check_all_conform(&value_descriptor, &values);
        Ok(Self {
            key_descriptor,
            value_descriptor,
            keys,
            values,
            options: MapOptions::default(),
        })
    }

    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> MapOptions {
        self.options
    }

    pub fn key_descriptor(&self) -> &TypeDescriptor {
        &self.key_descriptor
    }

    pub fn value_descriptor(&self) -> &TypeDescriptor {
        &self.value_descriptor
    }

    pub fn key_type(&self) -> &str {
        self.key_descriptor.name()
    }

    pub fn value_type(&self) -> &str {
        self.value_descriptor.name()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Validate both sides and store the pair.
    ///
    /// With the default policy the pair is always appended, even if the key exists.
    pub fn add(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<(), TypedError> {
        let key = validate(&self.key_descriptor, key.into())?;
        let value = validate(&self.value_descriptor, value.into())?;

        self.insert(key, value);
        check_map_aligned(&self.keys, &self.values);
        Ok(())
    }

    /// Store an already-validated pair according to the duplicate-key policy.
    fn insert(&mut self, key: Value, value: Value) {
        match (self.options.duplicate_keys, self.position(&key)) {
            (DuplicateKeyPolicy::Replace, Some(index)) => {
                debug!("replacing value for existing key {}", key.export());
                self.values[index] = value;
            }
            (DuplicateKeyPolicy::Append, Some(_)) => {
                debug!("appending duplicate key {}", key.export());
                self.keys.push(key);
                self.values.push(value);
            }
            (_, None) => {
                self.keys.push(key);
                self.values.push(value);
            }
        }
    }

    /// Remove the first pair matching `key` and return its value.
    pub fn unset(&mut self, key: impl Into<Value>) -> Result<Value, TypedError> {
        let key = validate(&self.key_descriptor, key.into())?;
        let index = self.position(&key).ok_or_else(|| not_found(&key))?;
        self.keys.remove(index);
        let value = self.values.remove(index);
        check_map_aligned(&self.keys, &self.values);
        Ok(value)
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// Value paired with `key`. The key is coerced before the search.
    pub fn get(&self, key: impl Into<Value>) -> Result<&Value, TypedError> {
        let key = validate(&self.key_descriptor, key.into())?;
        match self.position(&key) {
            Some(index) => Ok(&self.values[index]),
            None => Err(not_found(&key)),
        }
    }

    /// Whether `key` is present. Fails only if `key` cannot be a key of this map.
    pub fn exists(&self, key: impl Into<Value>) -> Result<bool, TypedError> {
        let key = validate(&self.key_descriptor, key.into())?;
        Ok(self.position(&key).is_some())
    }

    /// First value matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&Value>
    where
        P: FnMut(&Value) -> bool,
    {
        self.values.iter().find(|value| predicate(value))
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.keys.iter().zip(self.values.iter())
    }

    pub fn each_with_keys<F>(&self, mut f: F)
    where
        F: FnMut(&Value, &Value),
    {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Display rendering of every pair, as an ordered list of `(key, value)` strings.
    ///
    /// Not collapsed into a string-keyed map: two distinct keys that render the same
    /// (two display-hook instances, say) stay as two entries, in insertion order.
    /// Meant for logs only.
    pub fn to_array(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    // ========================================================================
    // DERIVED MAPS
    // ========================================================================

    /// Pairs whose value satisfies `predicate`.
    pub fn filter<P>(&self, mut predicate: P) -> Result<Self, TypedError>
    where
        P: FnMut(&Value) -> bool,
    {
        self.filter_with_keys(|_, value| predicate(value))
    }

    /// Pairs satisfying `predicate(key, value)`.
    pub fn filter_with_keys<P>(&self, mut predicate: P) -> Result<Self, TypedError>
    where
        P: FnMut(&Value, &Value) -> bool,
    {
        let (keys, values): (Vec<Value>, Vec<Value>) = self
            .iter()
            .filter(|(key, value)| predicate(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .unzip();
        self.derive(keys, values)
    }

    /// Untyped transform of every pair. The receiver is untouched.
    pub fn map_with_keys<U, F>(&self, mut f: F) -> Vec<U>
    where
        F: FnMut(&Value, &Value) -> U,
    {
        self.iter().map(|(key, value)| f(key, value)).collect()
    }

    /// Transform into a map with new key and value types.
    pub fn map_with_keys_and_types<R, F>(
        &self,
        registry: &TypeRegistry,
        key_type: &str,
        value_type: &str,
        f: F,
    ) -> Result<Self, TypedError>
    where
        R: IntoKeyItem,
        F: FnMut(&Value, &Value) -> R,
    {
        let key_descriptor = registry.resolve(key_type)?;
        let value_descriptor = registry.resolve(value_type)?;
        self.map_with_keys_and_descriptors(key_descriptor, value_descriptor, f)
    }

    /// Transform into a map over already-resolved descriptors.
    pub fn map_with_keys_and_descriptors<R, F>(
        &self,
        key_descriptor: TypeDescriptor,
        value_descriptor: TypeDescriptor,
        mut f: F,
    ) -> Result<Self, TypedError>
    where
        R: IntoKeyItem,
        F: FnMut(&Value, &Value) -> R,
    {
        let mut keys = Vec::with_capacity(self.count());
        let mut values = Vec::with_capacity(self.count());
        for (key, value) in self.iter() {
            let KeyItem { key, item } = f(key, value).into_key_item()?;
            keys.push(key);
            values.push(item);
        }
        self.rebuild(key_descriptor, value_descriptor, keys, values)
    }

    /// Transform into a map with the same key and value types.
    pub fn map_with_keys_and_same_types<R, F>(&self, f: F) -> Result<Self, TypedError>
    where
        R: IntoKeyItem,
        F: FnMut(&Value, &Value) -> R,
    {
        self.map_with_keys_and_descriptors(
            self.key_descriptor.clone(),
            self.value_descriptor.clone(),
            f,
        )
    }

    /// New map with `other`'s pairs laid over the receiver's.
    ///
    /// An existing key gets `other`'s value in place; a new key is appended. Both
    /// inputs are left as they were. `other`'s pairs are re-validated against the
    /// receiver's types.
    pub fn merge(&self, other: &TypedMap) -> Result<Self, TypedError> {
        let mut keys = self.keys.clone();
        let mut values = self.values.clone();
        for (key, value) in other.iter() {
            let key = validate(&self.key_descriptor, key.clone())?;
            match keys.iter().position(|k| *k == key) {
                Some(index) => values[index] = value.clone(),
                None => {
                    keys.push(key);
                    values.push(value.clone());
                }
            }
        }
        self.derive(keys, values)
    }

    fn derive(&self, keys: Vec<Value>, values: Vec<Value>) -> Result<Self, TypedError> {
        self.rebuild(
            self.key_descriptor.clone(),
            self.value_descriptor.clone(),
            keys,
            values,
        )
    }

    /// Validate a derived batch and replay it under the receiver's options.
    ///
    /// Unlike construction, repeated keys are not an error here: they follow the
    /// duplicate-key policy, the same as `add`.
    fn rebuild(
        &self,
        key_descriptor: TypeDescriptor,
        value_descriptor: TypeDescriptor,
        keys: Vec<Value>,
        values: Vec<Value>,
    ) -> Result<Self, TypedError> {
        check_lengths(&keys, &values)?;
        let keys = validate_all(&key_descriptor, keys)?;
        let values = validate_all(&value_descriptor, values)?;

        let mut derived = Self {
            key_descriptor,
            value_descriptor,
            keys: Vec::with_capacity(keys.len()),
            values: Vec::with_capacity(values.len()),
            options: self.options,
        };
        for (key, value) in keys.into_iter().zip(values) {
            derived.insert(key, value);
        }
        check_map_aligned(&derived.keys, &derived.values);
        check_all_conform(&derived.key_descriptor, &derived.keys);
        check_all_conform(&derived.value_descriptor, &derived.values);
        Ok(derived)
    }
}

fn check_lengths(keys: &[Value], values: &[Value]) -> Result<(), TypedError> {
    if keys.len() == values.len() {
        Ok(())
    } else {
        Err(TypedError::LengthMismatch {
            keys_len: keys.len(),
            values_len: values.len(),
        })
    }
}

fn not_found(key: &Value) -> TypedError {
    TypedError::KeyNotFound { key: key.export() }
}

impl<'a> IntoIterator for &'a TypedMap {
    type Item = (&'a Value, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Associative dump of `to_array`, in the `array ( 'k' => 'v', )` style.
impl fmt::Display for TypedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "array (")?;
        for (key, value) in self.to_array() {
            writeln!(f, "  {} => {},", quote(&key), quote(&value))?;
        }
        write!(f, ")")
    }
}

/// Serialized as a sequence of `[key, value]` pairs so order and non-string keys survive.
impl Serialize for TypedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.count()))?;
        for pair in self.iter() {
            seq.serialize_element(&pair)?;
        }
        seq.end()
    }
}
