//! Runtime contracts for the container invariants.
//!
//! These are debug-mode assertions layered under the real error checks. The
//! public operations already return `Err` for bad input; the contracts catch the
//! case where a bug in this crate stores something the validator never saw.
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Provide **early failure detection** during development
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function        | Invariant                                        |
//! |--------------------------|--------------------------------------------------|
//! | `check_item_conforms`    | a stored value satisfies its descriptor          |
//! | `check_all_conform`      | every stored value satisfies its descriptor      |
//! | `check_map_aligned`      | `keys.len() == values.len()`                     |
//! | `check_keys_distinct`    | no two keys compare equal (construction only)    |

use crate::types::TypeDescriptor;
use crate::validate::conforms;
use crate::value::Value;

// ============================================================================
// ELEMENT CONTRACTS
// ============================================================================

/// Check that one stored value satisfies the descriptor without coercion.
///
/// # Panics (debug builds only)
/// Panics if the value's tag or class does not match.
#[inline]
pub fn check_item_conforms(descriptor: &TypeDescriptor, item: &Value) {
    debug_assert!(
        conforms(descriptor, item),
        "Contract violation: stored {} does not satisfy {}",
        item.type_name(),
        descriptor.name()
    );
}

/// Check that every stored value satisfies the descriptor.
#[inline]
pub fn check_all_conform(descriptor: &TypeDescriptor, items: &[Value]) {
    for (i, item) in items.iter().enumerate() {
        debug_assert!(
            conforms(descriptor, item),
            "Contract violation: items[{}] is {} but the container holds {}",
            i,
            item.type_name(),
            descriptor.name()
        );
    }
}

// ============================================================================
// MAP CONTRACTS
// ============================================================================

/// Check that the parallel key/value sequences are the same length.
#[inline]
pub fn check_map_aligned(keys: &[Value], values: &[Value]) {
    debug_assert_eq!(
        keys.len(),
        values.len(),
        "Contract violation: keys.len() {} != values.len() {}",
        keys.len(),
        values.len()
    );
}

/// Check that keys are pairwise distinct under value equality.
///
/// Quadratic; only called where construction already proved it.
#[inline]
pub fn check_keys_distinct(keys: &[Value]) {
    #[cfg(debug_assertions)]
    for (i, key) in keys.iter().enumerate() {
        debug_assert!(
            !keys[..i].contains(key),
            "Contract violation: keys[{}] duplicates an earlier key",
            i
        );
    }
    #[cfg(not(debug_assertions))]
    let _ = keys;
}
