//! `TypedMap` behavior: construction rules, lookup by coerced key, derived maps.

use super::common::{
    assert_map_well_formed, class_map, fixture_registry, make, make_pair, value_of, wrapped_ints,
};
use typed_array::{DuplicateKeyPolicy, KeyItem, MapOptions, TypeRegistry, TypedError, TypedMap, Value};

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_construct_string_map() {
    let map = TypedMap::new(
        &TypeRegistry::new(),
        "string",
        "string",
        ["one", "two"],
        ["foo", "bar"],
    )
    .unwrap();
    assert_eq!(map.count(), 2);
    assert_eq!(map.key_type(), "string");
    assert_eq!(map.value_type(), "string");
    assert_map_well_formed(&map);
}

#[test]
fn test_construct_checks_lengths_before_types() {
    // "nope" is not a known type, but the length mismatch is reported first.
    let err = TypedMap::new(&TypeRegistry::new(), "nope", "int", ["a"], Vec::<Value>::new());
    assert_eq!(
        err,
        Err(TypedError::LengthMismatch {
            keys_len: 1,
            values_len: 0
        })
    );
}

#[test]
fn test_construct_unknown_key_type() {
    let err = TypedMap::empty(&TypeRegistry::new(), "Missing", "int");
    assert_eq!(
        err,
        Err(TypedError::UnknownType {
            name: "Missing".into()
        })
    );
}

#[test]
fn test_construct_rejects_duplicate_keys() {
    let err = TypedMap::new(&TypeRegistry::new(), "int", "string", [1, 1], ["a", "b"]);
    assert_eq!(err, Err(TypedError::DuplicateKey { key: "1".into() }));
}

#[test]
fn test_construct_rejects_bad_value() {
    let registry = fixture_registry();
    let err = TypedMap::new(&registry, "KeyClass", "ValueClass", [1, 2], vec![
        Value::from(1),
        Value::from("two"),
    ]);
    assert!(matches!(err, Err(TypedError::TypeMismatch { .. })));
}

// ============================================================================
// LOOKUP
// ============================================================================

#[test]
fn test_get_by_raw_integer_key_scenario() {
    let registry = fixture_registry();
    let map = TypedMap::new(
        &registry,
        "KeyClass",
        "int",
        [make(&registry, "KeyClass", 1), make(&registry, "KeyClass", 2)],
        [1, 2],
    )
    .unwrap();
    assert_eq!(map.get(1), Ok(&Value::Integer(1)));
    assert_eq!(map.get(2), Ok(&Value::Integer(2)));
}

#[test]
fn test_exists_accepts_instances_and_raw_keys() {
    let registry = fixture_registry();
    let map = class_map(&registry, &[(1, 1), (2, 2)]);
    assert!(map.exists(make(&registry, "KeyClass", 1)).unwrap());
    assert!(map.exists(2).unwrap());
    assert!(!map.exists(make(&registry, "KeyClass", 3)).unwrap());
}

#[test]
fn test_get_missing_key() {
    let registry = fixture_registry();
    let map = class_map(&registry, &[(1, 1)]);
    match map.get(5) {
        Err(TypedError::KeyNotFound { key }) => assert!(key.contains("KeyClass")),
        other => panic!("expected KeyNotFound, got {:?}", other),
    }
}

#[test]
fn test_unset_removes_and_compacts() {
    let registry = fixture_registry();
    let mut map = class_map(&registry, &[(1, 10), (2, 20), (3, 30)]);
    map.unset(make(&registry, "KeyClass", 1)).unwrap();
    assert!(!map.exists(1).unwrap());
    assert_eq!(wrapped_ints(map.keys()), vec![2, 3]);
    assert_eq!(wrapped_ints(map.values()), vec![20, 30]);
    assert_map_well_formed(&map);
}

// ============================================================================
// DUPLICATE KEY POLICY
// ============================================================================

#[test]
fn test_add_appends_duplicate_by_default() {
    let mut map = TypedMap::new(&TypeRegistry::new(), "int", "string", [1], ["a"]).unwrap();
    map.add(1, "b").unwrap();
    assert_eq!(map.count(), 2);
    assert_eq!(map.get(1), Ok(&Value::from("a")));
    let seen: Vec<String> = map.map_with_keys(|_, v| v.to_string());
    assert_eq!(seen, vec!["a", "b"]);
    // Derived maps keep the appended pair instead of rejecting it.
    assert_eq!(map.filter(|_| true).unwrap(), map);
    let empty = TypedMap::empty(&TypeRegistry::new(), "int", "string").unwrap();
    assert_eq!(map.merge(&empty).unwrap(), map);
}

#[test]
fn test_merge_into_map_with_duplicates_replaces_first_pair() {
    let mut map = TypedMap::new(&TypeRegistry::new(), "int", "string", [1], ["a"]).unwrap();
    map.add(1, "b").unwrap();
    let other = TypedMap::new(&TypeRegistry::new(), "int", "string", [1, 2], ["z", "c"]).unwrap();
    let merged = map.merge(&other).unwrap();
    let seen: Vec<String> = merged.map_with_keys(|k, v| format!("{}={}", k, v));
    assert_eq!(seen, vec!["1=z", "1=b", "2=c"]);
}

#[test]
fn test_nan_keys_behave_like_any_other_key() {
    let registry = TypeRegistry::new();
    let err = TypedMap::new(&registry, "float", "int", [f64::NAN, f64::NAN], [1, 2]);
    assert!(matches!(err, Err(TypedError::DuplicateKey { .. })));

    let map = TypedMap::new(&registry, "float", "int", [f64::NAN, 1.5], [1, 2]).unwrap();
    assert_eq!(map.get(f64::NAN), Ok(&Value::Integer(1)));
    assert!(map.exists(f64::NAN).unwrap());
    assert_eq!(map.filter(|_| true).unwrap(), map);
}

#[test]
fn test_add_replaces_under_replace_policy() {
    let mut map = TypedMap::new(&TypeRegistry::new(), "int", "string", [1], ["a"])
        .unwrap()
        .with_options(MapOptions {
            duplicate_keys: DuplicateKeyPolicy::Replace,
        });
    map.add(1, "b").unwrap();
    map.add(2, "c").unwrap();
    assert_eq!(map.count(), 2);
    assert_eq!(map.get(1), Ok(&Value::from("b")));
    // Options carry into derived maps.
    let filtered = map.filter(|_| true).unwrap();
    assert_eq!(filtered.options().duplicate_keys, DuplicateKeyPolicy::Replace);
}

// ============================================================================
// DERIVED MAPS
// ============================================================================

#[test]
fn test_filter_preserves_order() {
    let registry = fixture_registry();
    let map = class_map(&registry, &[(1, 1), (2, 2), (3, 3), (4, 4)]);
    let odd = map.filter(|v| value_of(v).is_some_and(|i| i % 2 == 1)).unwrap();
    assert_eq!(wrapped_ints(odd.keys()), vec![1, 3]);
    let by_key = map
        .filter_with_keys(|k, _| value_of(k).is_some_and(|i| i > 2))
        .unwrap();
    assert_eq!(wrapped_ints(by_key.values()), vec![3, 4]);
}

#[test]
fn test_map_with_keys_and_types_variants() {
    let registry = fixture_registry();
    let map = class_map(&registry, &[(1, 3), (2, 4)]);

    let tuples = map
        .map_with_keys_and_types(&registry, "string", "int", |k, v| {
            (format!("k{}", value_of(k).unwrap()), value_of(v).unwrap())
        })
        .unwrap();
    assert_eq!(tuples.get("k1"), Ok(&Value::Integer(3)));

    let pairs = map
        .map_with_keys_and_types(&registry, "string", "string", |k, v| {
            make_pair(
                &registry,
                format!("key: {}", value_of(k).unwrap()),
                format!("value: {}", value_of(v).unwrap()),
            )
        })
        .unwrap();
    assert_eq!(pairs.get("key: 2"), Ok(&Value::from("value: 4")));
    // Receiver is untouched.
    assert_eq!(map.key_type(), "KeyClass");
}

#[test]
fn test_map_with_keys_and_types_revalidates() {
    let registry = fixture_registry();
    let map = class_map(&registry, &[(1, 3)]);
    let err = map.map_with_keys_and_types(&registry, "int", "int", |_, _| KeyItem::new("x", 1));
    assert!(matches!(err, Err(TypedError::TypeMismatch { .. })));
}

#[test]
fn test_map_with_keys_and_types_missing_item() {
    let registry = fixture_registry();
    let map = class_map(&registry, &[(1, 3)]);
    let key_only = registry.class("Pair").unwrap().clone();
    let err = map.map_with_keys_and_types(&registry, "int", "int", |_, _| {
        Value::from(typed_array::Instance::with_field(&key_only, "key", 1))
    });
    assert_eq!(err, Err(TypedError::Shape { missing: "item" }));
}

#[test]
fn test_map_with_keys_and_same_types_doubles_values() {
    let registry = fixture_registry();
    let map = class_map(&registry, &[(1, 3), (2, 4)]);
    let doubled = map
        .map_with_keys_and_same_types(|k, v| {
            KeyItem::new(
                make(&registry, "KeyClass", value_of(k).unwrap()),
                make(&registry, "ValueClass", value_of(v).unwrap() * 2),
            )
        })
        .unwrap();
    assert_eq!(value_of(doubled.get(1).unwrap()), Some(6));
    assert_eq!(value_of(doubled.get(2).unwrap()), Some(8));
}

#[test]
fn test_merge_overrides_and_appends() {
    let registry = fixture_registry();
    let base = class_map(&registry, &[(1, 3), (2, 4)]);
    let other = class_map(&registry, &[(2, 5), (3, 6), (4, 7)]);
    let merged = base.merge(&other).unwrap();
    assert_eq!(wrapped_ints(merged.keys()), vec![1, 2, 3, 4]);
    assert_eq!(wrapped_ints(merged.values()), vec![3, 5, 6, 7]);
    assert_eq!(wrapped_ints(base.values()), vec![3, 4]);
    assert_map_well_formed(&merged);
}

#[test]
fn test_merge_with_empty_is_identity() {
    let registry = fixture_registry();
    let base = class_map(&registry, &[(1, 3), (2, 4)]);
    let empty = TypedMap::empty(&registry, "KeyClass", "ValueClass").unwrap();
    assert_eq!(base.merge(&empty).unwrap(), base);
}

#[test]
fn test_iteration_yields_pairs_in_order() {
    let registry = fixture_registry();
    let map = class_map(&registry, &[(5, 50), (1, 10)]);
    let pairs: Vec<(i64, i64)> = map
        .iter()
        .map(|(k, v)| (value_of(k).unwrap(), value_of(v).unwrap()))
        .collect();
    assert_eq!(pairs, vec![(5, 50), (1, 10)]);
    assert_eq!((&map).into_iter().count(), 2);
}

#[test]
fn test_display_dump() {
    let map = TypedMap::new(&TypeRegistry::new(), "string", "int", ["a"], [1]).unwrap();
    assert_eq!(map.to_string(), "array (\n  'a' => '1',\n)");
}
