// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic value model.
//!
//! A [`Value`] is the runtime representation every converter consumes and
//! produces. Its variants mirror the structural shapes of the type system:
//! scalars, enums, arrays, collections, maps, beans and wrappers.
//!
//! # Example
//!
//! ```rust
//! use shapeshift::value::{BeanValue, Value};
//! use shapeshift::types::ClassId;
//!
//! let list = Value::from(vec![1i32, 2, 3]);
//! assert_eq!(list.len(), Some(3));
//!
//! let bean = BeanValue::new(ClassId::OBJECT).with("name", "probe");
//! assert_eq!(bean.get("name").and_then(Value::as_str), Some("probe"));
//! ```

mod cmp;
mod container;

pub use container::{ArrayValue, BeanValue, CollectionValue, EnumValue, MapValue, WrapperValue};

use crate::types::{ClassId, ScalarKind, Type};
use chrono::NaiveDateTime;

/// A dynamic value of any shape.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    DateTime(NaiveDateTime),
    Enum(EnumValue),
    Array(ArrayValue),
    Collection(CollectionValue),
    Map(MapValue),
    Bean(BeanValue),
    Wrapper(WrapperValue),
}

impl Value {
    /// Zero value of a scalar kind. Nullable kinds yield `Null`.
    pub fn zero(kind: ScalarKind) -> Value {
        match kind {
            ScalarKind::Bool => Value::Bool(false),
            ScalarKind::Char => Value::Char('\0'),
            ScalarKind::I8 => Value::I8(0),
            ScalarKind::I16 => Value::I16(0),
            ScalarKind::I32 => Value::I32(0),
            ScalarKind::I64 => Value::I64(0),
            ScalarKind::U8 => Value::U8(0),
            ScalarKind::U16 => Value::U16(0),
            ScalarKind::U32 => Value::U32(0),
            ScalarKind::U64 => Value::U64(0),
            ScalarKind::F32 => Value::F32(0.0),
            ScalarKind::F64 => Value::F64(0.0),
            ScalarKind::String | ScalarKind::DateTime => Value::Null,
        }
    }

    /// `Vec<T>` holding `items`.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Collection(CollectionValue::seq(items.into_iter().collect()))
    }

    /// Array of `component` holding `items`.
    pub fn array(component: Type, items: impl IntoIterator<Item = Value>) -> Value {
        Value::Array(ArrayValue::new(component, items.into_iter().collect()))
    }

    /// Insertion-ordered map.
    pub fn map_of<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Value
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut map = MapValue::ordered();
        for (k, v) in entries {
            map.insert(k.into(), v.into());
        }
        Value::Map(map)
    }

    pub fn some(value: impl Into<Value>) -> Value {
        Value::Wrapper(WrapperValue::some(value.into()))
    }

    pub fn none() -> Value {
        Value::Wrapper(WrapperValue::none())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime class. `Null` reports `Object`.
    pub fn class_id(&self) -> ClassId {
        match self {
            Value::Null => ClassId::OBJECT,
            Value::Bool(_) => ClassId::BOOL,
            Value::Char(_) => ClassId::CHAR,
            Value::I8(_) => ClassId::I8,
            Value::I16(_) => ClassId::I16,
            Value::I32(_) => ClassId::I32,
            Value::I64(_) => ClassId::I64,
            Value::U8(_) => ClassId::U8,
            Value::U16(_) => ClassId::U16,
            Value::U32(_) => ClassId::U32,
            Value::U64(_) => ClassId::U64,
            Value::F32(_) => ClassId::F32,
            Value::F64(_) => ClassId::F64,
            Value::String(_) => ClassId::STRING,
            Value::DateTime(_) => ClassId::DATETIME,
            Value::Enum(e) => e.class,
            Value::Array(_) => ClassId::ARRAY,
            Value::Collection(c) => c.class(),
            Value::Map(m) => m.class(),
            Value::Bean(b) => b.class,
            Value::Wrapper(w) => w.class,
        }
    }

    /// Runtime type. Arrays keep their component; containers report their
    /// bare class since element types are not recorded on the value.
    pub fn runtime_type(&self) -> Type {
        match self {
            Value::Array(a) => Type::array(a.component.clone()),
            other => Type::Class(other.class_id()),
        }
    }

    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        let kind = match self {
            Value::Bool(_) => ScalarKind::Bool,
            Value::Char(_) => ScalarKind::Char,
            Value::I8(_) => ScalarKind::I8,
            Value::I16(_) => ScalarKind::I16,
            Value::I32(_) => ScalarKind::I32,
            Value::I64(_) => ScalarKind::I64,
            Value::U8(_) => ScalarKind::U8,
            Value::U16(_) => ScalarKind::U16,
            Value::U32(_) => ScalarKind::U32,
            Value::U64(_) => ScalarKind::U64,
            Value::F32(_) => ScalarKind::F32,
            Value::F64(_) => ScalarKind::F64,
            Value::String(_) => ScalarKind::String,
            Value::DateTime(_) => ScalarKind::DateTime,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(v) => Some(*v),
            _ => None,
        }
    }

    /// Any integer variant that fits in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(v) => Some(i64::from(*v)),
            Value::I16(v) => Some(i64::from(*v)),
            Value::I32(v) => Some(i64::from(*v)),
            Value::I64(v) => Some(*v),
            Value::U8(v) => Some(i64::from(*v)),
            Value::U16(v) => Some(i64::from(*v)),
            Value::U32(v) => Some(i64::from(*v)),
            Value::U64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Any numeric variant, widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(v) => Some(f64::from(*v)),
            Value::F64(v) => Some(*v),
            Value::U64(v) => Some(*v as f64),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Value::Enum(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bean(&self) -> Option<&BeanValue> {
        match self {
            Value::Bean(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bean_mut(&mut self) -> Option<&mut BeanValue> {
        match self {
            Value::Bean(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut MapValue> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&CollectionValue> {
        match self {
            Value::Collection(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_wrapper(&self) -> Option<&WrapperValue> {
        match self {
            Value::Wrapper(v) => Some(v),
            _ => None,
        }
    }

    /// Elements of an array or collection.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(&a.items),
            Value::Collection(c) => Some(c.items()),
            _ => None,
        }
    }

    /// Element/entry count of a container; `None` for non-containers.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(a) => Some(a.len()),
            Value::Collection(c) => Some(c.len()),
            Value::Map(m) => Some(m.len()),
            _ => None,
        }
    }

    /// Named properties of beans and bean-like containers.
    pub fn props(&self) -> Option<&indexmap::IndexMap<String, Value>> {
        match self {
            Value::Bean(b) => Some(&b.props),
            Value::Collection(c) => Some(&c.props),
            Value::Map(m) => Some(&m.props),
            _ => None,
        }
    }

    pub fn props_mut(&mut self) -> Option<&mut indexmap::IndexMap<String, Value>> {
        match self {
            Value::Bean(b) => Some(&mut b.props),
            Value::Collection(c) => Some(&mut c.props),
            Value::Map(m) => Some(&mut m.props),
            _ => None,
        }
    }

    /// Text used when the value becomes a map key or property name.
    pub fn key_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Char(c) => Some(c.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Enum(e) => Some(e.name.to_string()),
            Value::F32(v) => Some(v.to_string()),
            Value::F64(v) => Some(v.to_string()),
            Value::U64(v) => Some(v.to_string()),
            other => other.as_i64().map(|v| v.to_string()),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    NaiveDateTime => DateTime,
    EnumValue => Enum,
    ArrayValue => Array,
    CollectionValue => Collection,
    MapValue => Map,
    BeanValue => Bean,
    WrapperValue => Wrapper,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v.into_iter().map(Into::into))
    }
}
