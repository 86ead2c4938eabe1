// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type descriptors: the resolved form of a declared type name.
//!
//! A declared name like `"int"` or `"KeyClass"` is resolved exactly once, when a
//! container is built. After that the container only ever looks at its
//! [`TypeDescriptor`], never at the string again.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::class::ClassDef;

/// The closed set of primitive kinds.
///
/// A value's runtime tag is always exactly one of these. Class instances carry
/// the `Object` tag in addition to their class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Integer,
    Float,
    Boolean,
    Array,
    Object,
    Null,
    /// Never produced by a value. A list of `unknown` only accepts nothing.
    Unknown,
}

/// Short names accepted at resolution time, mapped to canonical names.
const ALIASES: &[(&str, &str)] = &[
    ("int", "integer"),
    ("double", "float"),
    ("floating-point", "float"),
    ("bool", "boolean"),
    ("NULL", "null"),
];

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::String,
        Primitive::Integer,
        Primitive::Float,
        Primitive::Boolean,
        Primitive::Array,
        Primitive::Object,
        Primitive::Null,
        Primitive::Unknown,
    ];

    /// Canonical name of this primitive.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Integer => "integer",
            Primitive::Float => "float",
            Primitive::Boolean => "boolean",
            Primitive::Array => "array",
            Primitive::Object => "object",
            Primitive::Null => "null",
            Primitive::Unknown => "unknown",
        }
    }

    /// Look up a primitive by canonical name or alias.
    pub fn from_name(name: &str) -> Option<Self> {
        let canonical = normalize_alias(name);
        Self::ALL.iter().copied().find(|p| p.name() == canonical)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map an alias to its canonical name. Unknown names pass through untouched.
pub fn normalize_alias(name: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, canonical)| canonical)
}

/// Which side of the type world a descriptor lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Class,
}

/// Resolved, immutable representation of a declared element/key/value type.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    Class(Arc<ClassDef>),
}

impl TypeDescriptor {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDescriptor::Primitive(_) => TypeKind::Primitive,
            TypeDescriptor::Class(_) => TypeKind::Class,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.kind() == TypeKind::Primitive
    }

    /// Canonical name: the primitive name or the class name.
    pub fn name(&self) -> &str {
        match self {
            TypeDescriptor::Primitive(p) => p.name(),
            TypeDescriptor::Class(class) => class.name(),
        }
    }

    pub fn as_class(&self) -> Option<&Arc<ClassDef>> {
        match self {
            TypeDescriptor::Class(class) => Some(class),
            TypeDescriptor::Primitive(_) => None,
        }
    }
}

impl From<Primitive> for TypeDescriptor {
    fn from(primitive: Primitive) -> Self {
        TypeDescriptor::Primitive(primitive)
    }
}

impl From<Arc<ClassDef>> for TypeDescriptor {
    fn from(class: Arc<ClassDef>) -> Self {
        TypeDescriptor::Class(class)
    }
}

/// Two descriptors are the same type when kind and canonical name agree.
impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.name() == other.name()
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
