// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime values stored in the containers.
//!
//! `Value` is the dynamic side of the crate: every element, key and item is one of
//! these. Equality is structural everywhere, including for class instances, which
//! compare by class name and field contents rather than by identity.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::class::ClassDef;
use crate::types::Primitive;

/// Named fields of a class instance, ordered by name.
pub type Fields = BTreeMap<String, Value>;

/// A dynamically typed value.
///
/// Equality is structural. Floats compare numerically except that every NaN equals
/// every other NaN, so a NaN key can be found again and a NaN item survives `unique`.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(Instance),
}

impl Value {
    /// Runtime type tag, compared against primitive descriptors.
    pub fn type_tag(&self) -> Primitive {
        match self {
            Value::Null => Primitive::Null,
            Value::Boolean(_) => Primitive::Boolean,
            Value::Integer(_) => Primitive::Integer,
            Value::Float(_) => Primitive::Float,
            Value::String(_) => Primitive::String,
            Value::Array(_) => Primitive::Array,
            Value::Object(_) => Primitive::Object,
        }
    }

    /// Name used in error messages: the class name for instances, the tag otherwise.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Object(instance) => instance.class_name(),
            other => other.type_tag().name(),
        }
    }

    pub fn is_instance_of(&self, class: &str) -> bool {
        matches!(self, Value::Object(instance) if instance.is_instance_of(class))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Literal form used by the associative dumps (`array ( 0 => 'foo', )`).
    ///
    /// Strings are single-quoted, instances render through their display hook when
    /// the class has one and as `Class(field => value, ...)` otherwise.
    pub fn export(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format!("{:?}", f),
            Value::String(s) => quote(s),
            Value::Array(items) => {
                let body: Vec<String> = items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| format!("{} => {}", i, v.export()))
                    .collect();
                format!("array ({})", body.join(", "))
            }
            Value::Object(instance) => match instance.custom_display() {
                Some(shown) => quote(&shown),
                None => {
                    let body: Vec<String> = instance
                        .fields()
                        .iter()
                        .map(|(name, v)| format!("{} => {}", name, v.export()))
                        .collect();
                    format!("{}({})", instance.class_name(), body.join(", "))
                }
            },
        }
    }
}

pub(crate) fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Display string used by `to_array`.
///
/// Lossy on purpose. Instances without a display hook fall back to an
/// identity label (`Class@0x...`), so two equal instances at different
/// addresses render differently.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(instance) => match instance.custom_display() {
                Some(shown) => f.write_str(&shown),
                None => write!(f, "{}@{:p}", instance.class_name(), instance),
            },
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Object(instance)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Object(instance) => instance.serialize(serializer),
        }
    }
}

/// An instance of a registered class.
///
/// Carries its class definition, so `is_instance_of` needs no registry lookup.
#[derive(Clone)]
pub struct Instance {
    class: Arc<ClassDef>,
    fields: Fields,
}

impl Instance {
    pub fn new(class: &Arc<ClassDef>, fields: Fields) -> Self {
        Self {
            class: Arc::clone(class),
            fields,
        }
    }

    /// Instance with a single field, the common shape for wrapper classes.
    pub fn with_field(class: &Arc<ClassDef>, name: &str, value: impl Into<Value>) -> Self {
        let mut fields = Fields::new();
        fields.insert(name.to_string(), value.into());
        Self::new(class, fields)
    }

    pub fn class(&self) -> &Arc<ClassDef> {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// True if this instance's class is `class`, inherits from it, or implements it.
    pub fn is_instance_of(&self, class: &str) -> bool {
        self.class.is_subtype_of(class)
    }

    /// Rendering through the class display hook, if the class defines one.
    pub fn custom_display(&self) -> Option<String> {
        self.class.render(self)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.class_name() == other.class_name() && self.fields == other.fields
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.class_name());
        for (name, value) in &self.fields {
            s.field(name, value);
        }
        s.finish()
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Instance", 2)?;
        s.serialize_field("class", self.class_name())?;
        s.serialize_field("fields", &self.fields)?;
        s.end()
    }
}
