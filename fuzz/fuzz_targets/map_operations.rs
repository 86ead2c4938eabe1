// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary add/unset/merge sequences against a class-keyed map.
//!
//! Keys and values must stay aligned, a key that `add` just stored must be visible
//! to `exists`, and `merge` must succeed whatever duplicates `add` left behind.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use typed_array::testing::fixture_registry;
use typed_array::{DuplicateKeyPolicy, MapOptions, TypedMap};

#[derive(Debug, Arbitrary)]
enum Op {
    Add(i8, i64),
    AddString(i8, String),
    Unset(i8),
    Merge(Vec<(i8, i64)>),
}

#[derive(Debug, Arbitrary)]
struct Input {
    replace: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let registry = fixture_registry();
    let Ok(map) = TypedMap::empty(&registry, "KeyClass", "ValueClass") else {
        return;
    };
    let policy = if input.replace {
        DuplicateKeyPolicy::Replace
    } else {
        DuplicateKeyPolicy::Append
    };
    let mut map = map.with_options(MapOptions {
        duplicate_keys: policy,
    });

    for op in input.ops {
        match op {
            Op::Add(k, v) => {
                let had = map.exists(i64::from(k)).unwrap_or(false);
                let before = map.count();
                assert!(map.add(i64::from(k), v).is_ok());
                assert!(map.exists(i64::from(k)).unwrap_or(false));
                if had && policy == DuplicateKeyPolicy::Replace {
                    assert_eq!(map.count(), before);
                }
            }
            Op::AddString(k, v) => {
                let before = map.count();
                assert!(map.add(i64::from(k), v).is_err());
                assert_eq!(map.count(), before);
            }
            Op::Unset(k) => {
                let _ = map.unset(i64::from(k));
            }
            Op::Merge(pairs) => {
                let (keys, values): (Vec<i64>, Vec<i64>) =
                    pairs.into_iter().map(|(k, v)| (i64::from(k), v)).unzip();
                if let Ok(other) = TypedMap::new(&registry, "KeyClass", "ValueClass", keys, values) {
                    let merged = map
                        .merge(&other)
                        .unwrap_or_else(|e| panic!("merge failed: {}", e));
                    assert!(merged.count() >= other.count());
                    if let Ok(empty) = TypedMap::empty(&registry, "KeyClass", "ValueClass") {
                        assert_eq!(map.merge(&empty).as_ref(), Ok(&map));
                    }
                }
            }
        }
        assert_eq!(map.keys().len(), map.values().len());
    }
});
