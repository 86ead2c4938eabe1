// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary mutation sequences against an integer list and a class list.
//!
//! Every operation either succeeds or returns `Err`; none may panic. After each
//! step the list must still hold only values of its declared type.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use typed_array::testing::fixture_registry;
use typed_array::validate::conforms;
use typed_array::{TypedList, Value};

#[derive(Debug, Arbitrary)]
enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<RawValue> for Value {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::from(b),
            RawValue::Int(i) => Value::from(i),
            RawValue::Float(f) => Value::from(f),
            RawValue::Str(s) => Value::from(s),
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    Add(RawValue),
    Push(Vec<RawValue>),
    Unshift(Vec<RawValue>),
    Pop,
    Shift,
    Set(u8, RawValue),
    Remove(u8),
    Get(u8),
    Filter,
    Reverse,
    Unique,
}

#[derive(Debug, Arbitrary)]
struct Input {
    class_typed: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let registry = fixture_registry();
    let type_name = if input.class_typed { "KeyClass" } else { "int" };
    let Ok(mut list) = TypedList::empty(&registry, type_name) else {
        return;
    };

    for op in input.ops {
        let before = list.count();
        let ok = match op {
            Op::Add(v) => list.add(v).is_ok(),
            Op::Push(vs) => list.push(vs).is_ok(),
            Op::Unshift(vs) => list.unshift(vs).is_ok(),
            Op::Pop => list.pop().is_ok(),
            Op::Shift => list.shift().is_ok(),
            Op::Set(i, v) => list.set(usize::from(i), v).is_ok(),
            Op::Remove(i) => list.remove(usize::from(i)).is_ok(),
            Op::Get(i) => {
                assert_eq!(list.get(usize::from(i)).is_ok(), list.has(usize::from(i)));
                true
            }
            Op::Filter => list
                .filter(|v| !v.is_null())
                .map(|filtered| assert_eq!(filtered.count(), before))
                .is_ok(),
            Op::Reverse => list.reverse().is_ok(),
            Op::Unique => list
                .unique()
                .map(|unique| assert!(unique.count() <= before))
                .is_ok(),
        };
        if !ok {
            // Failed operations leave the list as it was.
            assert_eq!(list.count(), before);
        }
        for item in list.iter() {
            assert!(conforms(list.descriptor(), item));
        }
    }
});
