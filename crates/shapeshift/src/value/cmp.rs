// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Equality, hashing and total order for [`Value`].
//!
//! Floats compare by bit pattern so values can be map keys. Sets and maps
//! compare without regard to iteration order; the order below agrees with
//! that equality.

use super::{CollectionValue, MapValue, Value};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Char(_) => 2,
            Value::I8(_) => 3,
            Value::I16(_) => 4,
            Value::I32(_) => 5,
            Value::I64(_) => 6,
            Value::U8(_) => 7,
            Value::U16(_) => 8,
            Value::U32(_) => 9,
            Value::U64(_) => 10,
            Value::F32(_) => 11,
            Value::F64(_) => 12,
            Value::String(_) => 13,
            Value::DateTime(_) => 14,
            Value::Enum(_) => 15,
            Value::Array(_) => 16,
            Value::Collection(_) => 17,
            Value::Map(_) => 18,
            Value::Bean(_) => 19,
            Value::Wrapper(_) => 20,
        }
    }
}

fn collection_eq(a: &CollectionValue, b: &CollectionValue) -> bool {
    if a.kind().is_set() != b.kind().is_set() || a.len() != b.len() || a.props != b.props {
        return false;
    }
    if a.kind().is_set() {
        a.items().iter().all(|x| b.contains(x))
    } else {
        a.items() == b.items()
    }
}

fn map_eq(a: &MapValue, b: &MapValue) -> bool {
    a.entries() == b.entries() && a.props == b.props
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a.class == b.class && a.ordinal == b.ordinal,
            (Value::Array(a), Value::Array(b)) => a.items == b.items,
            (Value::Collection(a), Value::Collection(b)) => collection_eq(a, b),
            (Value::Map(a), Value::Map(b)) => map_eq(a, b),
            (Value::Bean(a), Value::Bean(b)) => a.class == b.class && a.props == b.props,
            (Value::Wrapper(a), Value::Wrapper(b)) => a.kind == b.kind && a.inner == b.inner,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::Char(v) => v.hash(state),
            Value::I8(v) => v.hash(state),
            Value::I16(v) => v.hash(state),
            Value::I32(v) => v.hash(state),
            Value::I64(v) => v.hash(state),
            Value::U8(v) => v.hash(state),
            Value::U16(v) => v.hash(state),
            Value::U32(v) => v.hash(state),
            Value::U64(v) => v.hash(state),
            Value::F32(v) => v.to_bits().hash(state),
            Value::F64(v) => v.to_bits().hash(state),
            Value::String(v) => v.hash(state),
            Value::DateTime(v) => v.hash(state),
            Value::Enum(e) => {
                e.class.hash(state);
                e.ordinal.hash(state);
            }
            Value::Array(a) => a.items.hash(state),
            Value::Collection(c) => {
                c.kind().is_set().hash(state);
                c.len().hash(state);
                if !c.kind().is_set() {
                    c.items().hash(state);
                }
            }
            // Order-insensitive equality: hash only the size.
            Value::Map(m) => m.len().hash(state),
            Value::Bean(b) => {
                b.class.hash(state);
                b.props.len().hash(state);
            }
            Value::Wrapper(w) => {
                w.kind.hash(state);
                w.inner.hash(state);
            }
        }
    }
}

fn sorted_props(props: &IndexMap<String, Value>) -> Vec<(&String, &Value)> {
    let mut out: Vec<_> = props.iter().collect();
    out.sort();
    out
}

fn sorted_items(items: &[Value]) -> Vec<&Value> {
    let mut out: Vec<_> = items.iter().collect();
    out.sort();
    out
}

fn collection_cmp(a: &CollectionValue, b: &CollectionValue) -> Ordering {
    let set = a.kind().is_set();
    set.cmp(&b.kind().is_set())
        .then_with(|| {
            if set {
                sorted_items(a.items()).cmp(&sorted_items(b.items()))
            } else {
                a.items().cmp(b.items())
            }
        })
        .then_with(|| sorted_props(&a.props).cmp(&sorted_props(&b.props)))
}

fn map_cmp(a: &MapValue, b: &MapValue) -> Ordering {
    let mut ea: Vec<_> = a.iter().collect();
    let mut eb: Vec<_> = b.iter().collect();
    ea.sort();
    eb.sort();
    ea.cmp(&eb)
        .then_with(|| sorted_props(&a.props).cmp(&sorted_props(&b.props)))
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Char(a), Value::Char(b)) => a.cmp(b),
            (Value::I8(a), Value::I8(b)) => a.cmp(b),
            (Value::I16(a), Value::I16(b)) => a.cmp(b),
            (Value::I32(a), Value::I32(b)) => a.cmp(b),
            (Value::I64(a), Value::I64(b)) => a.cmp(b),
            (Value::U8(a), Value::U8(b)) => a.cmp(b),
            (Value::U16(a), Value::U16(b)) => a.cmp(b),
            (Value::U32(a), Value::U32(b)) => a.cmp(b),
            (Value::U64(a), Value::U64(b)) => a.cmp(b),
            (Value::F32(a), Value::F32(b)) => a.total_cmp(b),
            (Value::F64(a), Value::F64(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Enum(a), Value::Enum(b)) => {
                a.class.cmp(&b.class).then(a.ordinal.cmp(&b.ordinal))
            }
            (Value::Array(a), Value::Array(b)) => a.items.cmp(&b.items),
            (Value::Collection(a), Value::Collection(b)) => collection_cmp(a, b),
            (Value::Map(a), Value::Map(b)) => map_cmp(a, b),
            (Value::Bean(a), Value::Bean(b)) => a
                .class
                .cmp(&b.class)
                .then_with(|| sorted_props(&a.props).cmp(&sorted_props(&b.props))),
            (Value::Wrapper(a), Value::Wrapper(b)) => (a.kind as u8)
                .cmp(&(b.kind as u8))
                .then_with(|| a.inner.cmp(&b.inner)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassId, CollectionKind};
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(v: &Value) -> u64 {
        let mut h = DefaultHasher::new();
        v.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_float_equality_by_bits() {
        assert_eq!(Value::F64(f64::NAN), Value::F64(f64::NAN));
        assert_ne!(Value::F64(0.0), Value::F64(-0.0));
        assert_eq!(Value::F64(-0.0).cmp(&Value::F64(0.0)), Ordering::Less);
    }

    #[test]
    fn test_sets_ignore_order() {
        let a = CollectionValue::with_items(
            ClassId::INDEX_SET,
            CollectionKind::IndexSet,
            [Value::I32(1), Value::I32(2)],
        );
        let b = CollectionValue::with_items(
            ClassId::HASH_SET,
            CollectionKind::HashSet,
            [Value::I32(2), Value::I32(1)],
        );
        let (a, b) = (Value::Collection(a), Value::Collection(b));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_maps_ignore_order() {
        let mut a = MapValue::ordered();
        a.insert(Value::from("x"), Value::I32(1));
        a.insert(Value::from("y"), Value::I32(2));
        let mut b = MapValue::ordered();
        b.insert(Value::from("y"), Value::I32(2));
        b.insert(Value::from("x"), Value::I32(1));
        assert_eq!(Value::Map(a.clone()), Value::Map(b.clone()));
        assert_eq!(Value::Map(a).cmp(&Value::Map(b)), Ordering::Equal);
    }

    #[test]
    fn test_cross_variant_order_is_stable() {
        assert!(Value::Null < Value::Bool(false));
        assert!(Value::I32(i32::MAX) < Value::I64(i64::MIN));
        assert_ne!(Value::I32(1), Value::I64(1));
    }
}
