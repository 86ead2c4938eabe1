// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Registry of class-like types, the host environment that declared names resolve in.
//!
//! Primitive names are a fixed table and need no registration. Everything else must be
//! registered before a container can be declared over it. Registering a name twice
//! replaces the earlier definition for future resolutions; descriptors that were
//! already resolved keep pointing at the old one.

use log::trace;
use std::collections::HashMap;
use std::sync::Arc;

use crate::class::ClassDef;
use crate::error::TypedError;
use crate::types::{normalize_alias, Primitive, TypeDescriptor};

#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    classes: HashMap<String, Arc<ClassDef>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class and hand back the shared definition.
    ///
    /// Keep the returned `Arc` around to build instances or subclasses.
    pub fn register(&mut self, class: ClassDef) -> Arc<ClassDef> {
        let class = Arc::new(class);
        self.classes
            .insert(class.name().to_string(), Arc::clone(&class));
        class
    }

    pub fn class(&self, name: &str) -> Option<&Arc<ClassDef>> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Resolve a declared type name.
    ///
    /// Aliases are normalized first, then the primitive table is checked, then the
    /// class table. Primitives win a name clash with a registered class.
    pub fn resolve(&self, declared: &str) -> Result<TypeDescriptor, TypedError> {
        let name = normalize_alias(declared);
        if let Some(primitive) = Primitive::from_name(name) {
            trace!("resolved {:?} to primitive {}", declared, primitive);
            return Ok(TypeDescriptor::Primitive(primitive));
        }
        match self.classes.get(name) {
            Some(class) => {
                trace!("resolved {:?} to class {}", declared, class.name());
                Ok(TypeDescriptor::Class(Arc::clone(class)))
            }
            None => Err(TypedError::UnknownType {
                name: name.to_string(),
            }),
        }
    }
}
