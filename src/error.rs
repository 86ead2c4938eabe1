// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type shared by the validator and both containers.
//!
//! Every failure is local and synchronous. Nothing here is transient, so there is no
//! retry story: a caller either fixes the input or gives up on the operation.

use std::fmt;

/// Error type for container operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedError {
    /// Declared type name is neither a primitive nor a registered class.
    UnknownType { name: String },
    /// A value (or its coerced construction) does not satisfy a descriptor.
    TypeMismatch { expected: String, found: String },
    /// Key and value batches have different lengths.
    LengthMismatch { keys_len: usize, values_len: usize },
    /// Two keys in a construction batch compare equal.
    DuplicateKey { key: String },
    /// Lookup or removal by a key that is not present.
    KeyNotFound { key: String },
    /// Indexed access beyond current bounds.
    OutOfBounds { index: usize, len: usize },
    /// `first`/`last`/`pop`/`shift` on an empty list.
    EmptyContainer { operation: &'static str },
    /// A key/item callback returned something without both fields.
    Shape { missing: &'static str },
}

impl fmt::Display for TypedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedError::UnknownType { name } => write!(f, "type {} does not exist", name),
            TypedError::TypeMismatch { expected, found } => {
                write!(f, "item must be of type {}, got {}", expected, found)
            }
            TypedError::LengthMismatch {
                keys_len,
                values_len,
            } => {
                write!(
                    f,
                    "keys and items must be of equal length: {} != {}",
                    keys_len, values_len
                )
            }
            TypedError::DuplicateKey { key } => write!(f, "duplicate key: {}", key),
            TypedError::KeyNotFound { key } => write!(f, "key does not exist: {}", key),
            TypedError::OutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for length {}", index, len)
            }
            TypedError::EmptyContainer { operation } => {
                write!(f, "{}() called on an empty list", operation)
            }
            TypedError::Shape { missing } => {
                write!(
                    f,
                    "callback must return a value with \"key\" and \"item\", missing \"{}\"",
                    missing
                )
            }
        }
    }
}

impl std::error::Error for TypedError {}

/// Failure raised by a class constructor during coercion.
///
/// Never escapes the crate on its own: the validator replaces it with
/// [`TypedError::TypeMismatch`] naming the target class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructError {
    pub message: String,
}

impl ConstructError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "construction failed: {}", self.message)
    }
}

impl std::error::Error for ConstructError {}
