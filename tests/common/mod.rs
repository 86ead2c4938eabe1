//! Shared test utilities and fixtures.

#![allow(dead_code)]

use typed_array::validate::conforms;
use typed_array::{TypeRegistry, TypedList, TypedMap, Value};

// Re-export canonical fixtures from typed_array::testing
pub use typed_array::testing::{fixture_registry, make, make_pair, value_of};

// ============================================================================
// BUILDERS
// ============================================================================

/// Integer list over `1..=n`, the shape of the sample workload.
pub fn int_range(n: i64) -> TypedList {
    TypedList::new(&TypeRegistry::new(), "int", 1..=n).expect("integers always validate")
}

/// String list from literals.
pub fn string_list(items: &[&str]) -> TypedList {
    TypedList::new(&TypeRegistry::new(), "string", items.iter().copied())
        .expect("strings always validate")
}

/// `KeyClass -> ValueClass` map built from integer pairs.
pub fn class_map(registry: &TypeRegistry, pairs: &[(i64, i64)]) -> TypedMap {
    TypedMap::new(
        registry,
        "KeyClass",
        "ValueClass",
        pairs.iter().map(|(k, _)| make(registry, "KeyClass", *k)),
        pairs.iter().map(|(_, v)| make(registry, "ValueClass", *v)),
    )
    .expect("fixture map must build")
}

/// Integer contents of a `ValueClass`/`KeyClass` sequence.
pub fn wrapped_ints(values: &[Value]) -> Vec<i64> {
    values.iter().filter_map(value_of).collect()
}

// ============================================================================
// INVARIANT ASSERTIONS
// ============================================================================

/// Every element satisfies the list's descriptor and iteration matches the snapshot.
pub fn assert_list_well_formed(list: &TypedList) {
    for (i, item) in list.iter().enumerate() {
        assert!(
            conforms(list.descriptor(), item),
            "items[{}] is {} in a list of {}",
            i,
            item.type_name(),
            list.item_type()
        );
    }
    assert_eq!(list.to_array().len(), list.count());
    assert!(list.to_array().iter().eq(list.iter()));
}

/// Keys and values are aligned and every entry satisfies its descriptor.
pub fn assert_map_well_formed(map: &TypedMap) {
    assert_eq!(map.keys().len(), map.values().len());
    assert_eq!(map.iter().count(), map.count());
    for (key, value) in map.iter() {
        assert!(conforms(map.key_descriptor(), key));
        assert!(conforms(map.value_descriptor(), value));
    }
}
