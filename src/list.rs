// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `TypedList`: an ordered, dense, 0-indexed sequence of validated values.
//!
//! Every way into the list goes through [`validate`](crate::validate::validate):
//! construction, `add`, `push`, `unshift` and `set`. Derived lists (`filter`, `reverse`,
//! `unique`, `merge`, the typed maps) are built by the same construction path, so they
//! re-validate rather than trusting their parent.
//!
//! Batch inserts are atomic: the whole batch is validated before any of it lands.
//!
//! # Example
//!
//! ```ignore
//! let registry = TypeRegistry::new();
//! let mut list = TypedList::new(&registry, "int", [1, 2, 3])?;
//! list.add(4)?;
//! assert!(list.add("five").is_err());
//! let evens = list.filter(|v| v.as_integer().is_some_and(|i| i % 2 == 0))?;
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

use crate::contracts::{check_all_conform, check_item_conforms};
use crate::error::TypedError;
use crate::registry::TypeRegistry;
use crate::types::TypeDescriptor;
use crate::validate::{validate, validate_all};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct TypedList {
    descriptor: TypeDescriptor,
    items: Vec<Value>,
}

impl TypedList {
    /// Resolve `type_name` and build a list from `items`.
    pub fn new<I>(registry: &TypeRegistry, type_name: &str, items: I) -> Result<Self, TypedError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let descriptor = registry.resolve(type_name)?;
        Self::from_descriptor(descriptor, items)
    }

    /// An empty list of `type_name`.
    pub fn empty(registry: &TypeRegistry, type_name: &str) -> Result<Self, TypedError> {
        Self::new(registry, type_name, Vec::<Value>::new())
    }

    /// Build a list over an already-resolved descriptor.
    ///
    /// Fails on the first invalid item; no list is returned in that case.
    pub fn from_descriptor<I>(descriptor: TypeDescriptor, items: I) -> Result<Self, TypedError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let items = validate_all(&descriptor, items)?;
        check_all_conform(&descriptor, &items);
        Ok(Self { descriptor, items })
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Canonical name of the element type.
    pub fn item_type(&self) -> &str {
        self.descriptor.name()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Validate and append one item.
    pub fn add(&mut self, item: impl Into<Value>) -> Result<(), TypedError> {
        let item = validate(&self.descriptor, item.into())?;
        check_item_conforms(&self.descriptor, &item);
        self.items.push(item);
        Ok(())
    }

    /// Validate and append a batch, in argument order.
    pub fn push<I>(&mut self, items: I) -> Result<(), TypedError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let items = validate_all(&self.descriptor, items)?;
        self.items.extend(items);
        Ok(())
    }

    /// Validate a batch and prepend it; the first argument becomes the new first element.
    pub fn unshift<I>(&mut self, items: I) -> Result<(), TypedError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let items = validate_all(&self.descriptor, items)?;
        self.items.splice(0..0, items);
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Result<Value, TypedError> {
        self.items
            .pop()
            .ok_or(TypedError::EmptyContainer { operation: "pop" })
    }

    /// Remove and return the first element. Linear: everything shifts down.
    pub fn shift(&mut self) -> Result<Value, TypedError> {
        if self.items.is_empty() {
            return Err(TypedError::EmptyContainer { operation: "shift" });
        }
        Ok(self.items.remove(0))
    }

    /// Overwrite the element at `index`, or append when `index == count()`.
    ///
    /// Anything past the append slot is rejected: the list never has gaps.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<(), TypedError> {
        let len = self.items.len();
        if index > len {
            return Err(TypedError::OutOfBounds { index, len });
        }
        let value = validate(&self.descriptor, value.into())?;
        if index == len {
            self.items.push(value);
        } else {
            self.items[index] = value;
        }
        Ok(())
    }

    /// Delete the element at `index`; later elements move down one slot.
    pub fn remove(&mut self, index: usize) -> Result<Value, TypedError> {
        if index >= self.items.len() {
            return Err(self.out_of_bounds(index));
        }
        Ok(self.items.remove(index))
    }

    // ========================================================================
    // ACCESS
    // ========================================================================

    pub fn get(&self, index: usize) -> Result<&Value, TypedError> {
        self.items.get(index).ok_or_else(|| self.out_of_bounds(index))
    }

    /// Whether `index` currently holds an element.
    pub fn has(&self, index: usize) -> bool {
        index < self.items.len()
    }

    pub fn first(&self) -> Result<&Value, TypedError> {
        self.items
            .first()
            .ok_or(TypedError::EmptyContainer { operation: "first" })
    }

    pub fn last(&self) -> Result<&Value, TypedError> {
        self.items
            .last()
            .ok_or(TypedError::EmptyContainer { operation: "last" })
    }

    /// First element matching `predicate`, in order.
    pub fn find<P>(&self, mut predicate: P) -> Option<&Value>
    where
        P: FnMut(&Value) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Snapshot copy of the elements.
    pub fn to_array(&self) -> Vec<Value> {
        self.items.clone()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Call `f` on every element in order.
    pub fn each<F>(&self, f: F)
    where
        F: FnMut(&Value),
    {
        self.items.iter().for_each(f);
    }

    // ========================================================================
    // DERIVED LISTS
    // ========================================================================

    /// Elements satisfying `predicate`, relative order kept.
    pub fn filter<P>(&self, mut predicate: P) -> Result<Self, TypedError>
    where
        P: FnMut(&Value) -> bool,
    {
        let kept: Vec<Value> = self
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect();
        self.derive(kept)
    }

    /// Untyped transform. The result is plain data, outside the type discipline.
    pub fn map<U, F>(&self, f: F) -> Vec<U>
    where
        F: FnMut(&Value) -> U,
    {
        self.items.iter().map(f).collect()
    }

    /// Transform into a list of `type_name`, validating every result.
    pub fn map_with_type<V, F>(
        &self,
        registry: &TypeRegistry,
        type_name: &str,
        f: F,
    ) -> Result<Self, TypedError>
    where
        V: Into<Value>,
        F: FnMut(&Value) -> V,
    {
        let descriptor = registry.resolve(type_name)?;
        self.map_with_descriptor(descriptor, f)
    }

    /// Transform into a list over an already-resolved descriptor.
    pub fn map_with_descriptor<V, F>(
        &self,
        descriptor: TypeDescriptor,
        f: F,
    ) -> Result<Self, TypedError>
    where
        V: Into<Value>,
        F: FnMut(&Value) -> V,
    {
        Self::from_descriptor(descriptor, self.items.iter().map(f))
    }

    /// Transform into a list of the same element type.
    pub fn map_with_same_type<V, F>(&self, f: F) -> Result<Self, TypedError>
    where
        V: Into<Value>,
        F: FnMut(&Value) -> V,
    {
        self.map_with_descriptor(self.descriptor.clone(), f)
    }

    /// Receiver followed by `other`. Both must hold the same element type.
    pub fn merge(&self, other: &TypedList) -> Result<Self, TypedError> {
        if other.descriptor != self.descriptor {
            return Err(TypedError::TypeMismatch {
                expected: self.item_type().to_string(),
                found: other.item_type().to_string(),
            });
        }
        let merged: Vec<Value> = self.items.iter().chain(&other.items).cloned().collect();
        self.derive(merged)
    }

    pub fn reverse(&self) -> Result<Self, TypedError> {
        self.derive(self.items.iter().rev().cloned().collect())
    }

    /// First occurrence of each distinct value, original order kept.
    ///
    /// Values are compared structurally, so this is quadratic in the worst case.
    pub fn unique(&self) -> Result<Self, TypedError> {
        let mut seen: Vec<Value> = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.contains(item) {
                seen.push(item.clone());
            }
        }
        self.derive(seen)
    }

    fn derive(&self, items: Vec<Value>) -> Result<Self, TypedError> {
        Self::from_descriptor(self.descriptor.clone(), items)
    }

    fn out_of_bounds(&self, index: usize) -> TypedError {
        TypedError::OutOfBounds {
            index,
            len: self.items.len(),
        }
    }
}

impl<'a> IntoIterator for &'a TypedList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for TypedList {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Associative dump for logs, in the `array ( 0 => 'foo', )` style.
impl fmt::Display for TypedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "array (")?;
        for (i, item) in self.items.iter().enumerate() {
            writeln!(f, "  {} => {},", i, item.export())?;
        }
        write!(f, ")")
    }
}

impl Serialize for TypedList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}
