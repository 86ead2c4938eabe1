// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The validation engine every insertion path funnels through.
//!
//! Primitive descriptors compare runtime tags exactly: an integer is not a float,
//! and a string holding digits is not an integer. Class descriptors accept any
//! instance of the class (including subclasses and implementors) unchanged, and
//! otherwise try exactly one coercion through the class constructor.

use log::{debug, trace};

use crate::error::TypedError;
use crate::types::TypeDescriptor;
use crate::value::Value;

/// Validate `value` against `descriptor`, coercing into the class if needed.
///
/// Returns the value to store: the input itself, or the constructed instance.
/// A constructor failure is reported as `TypeMismatch` naming the class; the
/// constructor's own message only reaches the debug log.
pub fn validate(descriptor: &TypeDescriptor, value: Value) -> Result<Value, TypedError> {
    match descriptor {
        TypeDescriptor::Primitive(primitive) => {
            if value.type_tag() == *primitive {
                trace!("accepted {} as {}", value.type_name(), primitive);
                Ok(value)
            } else {
                Err(mismatch(descriptor, &value))
            }
        }
        TypeDescriptor::Class(class) => {
            if value.is_instance_of(class.name()) {
                trace!("accepted {} as {}", value.type_name(), class.name());
                return Ok(value);
            }
            if !class.is_constructible() {
                return Err(mismatch(descriptor, &value));
            }
            debug!("coercing {} into {}", value.type_name(), class.name());
            match class.construct(&value) {
                Ok(instance) => Ok(Value::Object(instance)),
                Err(e) => {
                    debug!("coercion into {} failed: {}", class.name(), e);
                    Err(mismatch(descriptor, &value))
                }
            }
        }
    }
}

/// Validate a batch in order, failing on the first bad item.
///
/// Nothing is returned on failure, so a caller building a container from the
/// result never observes a partial batch.
pub fn validate_all<I>(descriptor: &TypeDescriptor, items: I) -> Result<Vec<Value>, TypedError>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    items
        .into_iter()
        .map(|item| validate(descriptor, item.into()))
        .collect()
}

/// Whether `value` already satisfies `descriptor` without any coercion.
pub fn conforms(descriptor: &TypeDescriptor, value: &Value) -> bool {
    match descriptor {
        TypeDescriptor::Primitive(primitive) => value.type_tag() == *primitive,
        TypeDescriptor::Class(class) => value.is_instance_of(class.name()),
    }
}

fn mismatch(descriptor: &TypeDescriptor, value: &Value) -> TypedError {
    TypedError::TypeMismatch {
        expected: descriptor.name().to_string(),
        found: value.type_name().to_string(),
    }
}
