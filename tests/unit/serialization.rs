//! JSON shape of containers, for reports and logs.

use super::common::{class_map, fixture_registry, make, string_list};
use serde_json::json;
use typed_array::{DuplicateKeyPolicy, MapOptions, TypeRegistry, TypedList, TypedMap, Value};

#[test]
fn test_list_serializes_as_array() {
    let list = string_list(&["foo", "bar"]);
    assert_eq!(serde_json::to_value(&list).unwrap(), json!(["foo", "bar"]));
}

#[test]
fn test_instances_serialize_with_class_name() {
    let registry = fixture_registry();
    let list = TypedList::new(&registry, "KeyClass", [1]).unwrap();
    assert_eq!(
        serde_json::to_value(&list).unwrap(),
        json!([{ "class": "KeyClass", "fields": { "value": 1 } }])
    );
}

#[test]
fn test_map_serializes_as_ordered_pairs() {
    let map = TypedMap::new(&TypeRegistry::new(), "int", "string", [2, 1], ["b", "a"]).unwrap();
    assert_eq!(
        serde_json::to_value(&map).unwrap(),
        json!([[2, "b"], [1, "a"]])
    );
}

#[test]
fn test_class_keyed_map_keeps_structured_keys() {
    let registry = fixture_registry();
    let map = class_map(&registry, &[(1, 10)]);
    let encoded = serde_json::to_value(&map).unwrap();
    assert_eq!(encoded[0][0]["class"], "KeyClass");
    assert_eq!(encoded[0][1]["fields"]["value"], 10);
}

#[test]
fn test_nested_values() {
    let registry = fixture_registry();
    let mut list = TypedList::empty(&registry, "array").unwrap();
    list.add(vec![Value::Null, Value::from(true), Value::from(1.5)])
        .unwrap();
    list.add(vec![make(&registry, "TestClass", "x")]).unwrap();
    assert_eq!(
        serde_json::to_value(&list).unwrap(),
        json!([
            [null, true, 1.5],
            [{ "class": "TestClass", "fields": { "value": "x" } }]
        ])
    );
}

#[test]
fn test_map_options_round_trip_through_json() {
    let options: MapOptions = serde_json::from_str(r#"{"duplicate_keys":"replace"}"#).unwrap();
    assert_eq!(options.duplicate_keys, DuplicateKeyPolicy::Replace);
    let defaulted: MapOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(defaulted, MapOptions::default());
    assert_eq!(
        serde_json::to_value(options).unwrap(),
        json!({ "duplicate_keys": "replace" })
    );
}
