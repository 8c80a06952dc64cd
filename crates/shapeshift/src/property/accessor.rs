// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cascading property reads and writes.
//!
//! Reads walk the path and yield `Null` as soon as an intermediate value is
//! null. Writes create missing intermediates from their declared type and
//! convert the written value to the declared type of the final slot.

use super::copy::{is_open_bean, owner_descriptor};
use super::path::{PropertyPath, Segment};
use crate::convert::Session;
use crate::error::{ConvertError, Result};
use crate::types::{Type, TypeDescriptor, TypeSystem};
use crate::value::Value;
use std::sync::Arc;

fn describe(types: &TypeSystem, value: &Value) -> String {
    types.display(&value.runtime_type())
}

/// Read `path` from `value`.
///
/// Map-like values are looked up by literal key first, then by named
/// property. Reading a declared but unset property yields `Null`; an
/// undeclared one is an error.
pub fn get_property(types: &TypeSystem, value: &Value, path: &PropertyPath) -> Result<Value> {
    let mut current = value;
    for segment in path.segments() {
        match step(types, current, segment, path)? {
            Some(next) => current = next,
            None => return Ok(Value::Null),
        }
    }
    Ok(current.clone())
}

fn step<'v>(
    types: &TypeSystem,
    value: &'v Value,
    segment: &Segment,
    path: &PropertyPath,
) -> Result<Option<&'v Value>> {
    let fail = |reason: String| ConvertError::property(describe(types, value), path.as_str(), reason);
    match (value, segment) {
        (Value::Null, _) => Ok(None),
        (Value::Wrapper(w), _) => match w.get() {
            Some(inner) => step(types, inner, segment, path),
            None => Ok(None),
        },
        (Value::Map(m), Segment::Name(name)) => Ok(m
            .get_str(name)
            .or_else(|| {
                m.iter()
                    .find(|(k, _)| k.key_text().as_deref() == Some(name.as_str()))
                    .map(|(_, v)| v)
            })
            .or_else(|| m.props.get(name))),
        (Value::Map(m), Segment::Index(i)) => {
            let key = i.to_string();
            Ok(m
                .iter()
                .find(|(k, _)| k.key_text().as_deref() == Some(key.as_str()))
                .map(|(_, v)| v))
        }
        (Value::Bean(_) | Value::Collection(_), Segment::Name(name)) => {
            let declared = types.properties(value.class_id());
            let slot = value.props().and_then(|p| p.get(name));
            match (declared.get(name), slot) {
                (Some(meta), _) if !meta.is_readable() => {
                    Err(fail(format!("'{name}' is not readable")))
                }
                (Some(_), slot) => Ok(slot),
                (None, Some(slot)) => Ok(Some(slot)),
                (None, None) if matches!(value, Value::Bean(b) if is_open_bean(types, b.class)) => {
                    Ok(None)
                }
                (None, None) => Err(fail(format!("no property '{name}'"))),
            }
        }
        (Value::Array(_) | Value::Collection(_), Segment::Index(i)) => {
            let items = value.items().unwrap_or_default();
            items
                .get(*i)
                .map(Some)
                .ok_or_else(|| fail(format!("index {i} out of bounds for length {}", items.len())))
        }
        (_, Segment::Name(name)) => Err(fail(format!("cannot read '{name}'"))),
        (_, Segment::Index(i)) => Err(fail(format!("cannot index [{i}]"))),
    }
}

/// Write `value` at `path`, creating null intermediates from their
/// declared types.
pub fn set_property(
    cx: &mut Session<'_>,
    target: &mut Value,
    path: &PropertyPath,
    value: Value,
) -> Result<()> {
    let root = cx.descriptor(None, &target.runtime_type());
    set_at(cx, target, &root, path.segments(), value, path)
}

fn set_at(
    cx: &mut Session<'_>,
    slot: &mut Value,
    declared: &Arc<TypeDescriptor>,
    segments: &[Segment],
    value: Value,
    path: &PropertyPath,
) -> Result<()> {
    let types = cx.types();
    let Some((segment, rest)) = segments.split_first() else {
        *slot = cx.convert(value, declared)?;
        return Ok(());
    };

    if slot.is_null() {
        *slot = types.instantiate(&declared.concrete_type(types))?;
    }
    if let Value::Wrapper(w) = slot {
        let item = declared.item_descriptor(types);
        let inner = match w.inner.take() {
            Some(inner) => inner,
            None => Box::new(types.instantiate(&item.concrete_type(types))?),
        };
        let inner = w.inner.insert(inner);
        return set_at(cx, inner, &item, segments, value, path);
    }

    let owner = owner_descriptor(types, slot, declared);
    let fail = |slot: &Value, reason: String| {
        ConvertError::property(describe(types, slot), path.as_str(), reason)
    };

    match segment {
        Segment::Name(name) => {
            let props = types.properties(slot.class_id());
            if let Some(meta) = props.get(name) {
                if rest.is_empty() && !meta.is_writable() {
                    return Err(fail(slot, format!("'{name}' is read-only")));
                }
                let child_desc = owner.member_descriptor(types, &meta.ty);
                let Some(slots) = slot.props_mut() else {
                    return Err(fail(slot, format!("cannot set '{name}'")));
                };
                let child = slots.entry(name.clone()).or_insert(Value::Null);
                return set_at(cx, child, &child_desc, rest, value, path);
            }
            match slot {
                Value::Map(m) => {
                    let key = cx.convert(Value::String(name.clone()), &owner.key_descriptor(types))?;
                    let child_desc = owner.value_descriptor(types);
                    let child = m.slot(key, || Value::Null);
                    set_at(cx, child, &child_desc, rest, value, path)
                }
                Value::Bean(b) if is_open_bean(types, b.class) => {
                    let child_desc = types.descriptor(None, &Type::OBJECT);
                    let child = b.props.entry(name.clone()).or_insert(Value::Null);
                    set_at(cx, child, &child_desc, rest, value, path)
                }
                other => Err(fail(other, format!("no property '{name}'"))),
            }
        }
        Segment::Index(i) => {
            let i = *i;
            match slot {
                Value::Collection(c) if c.kind().is_set() => Err(ConvertError::property(
                    types.display(&Type::Class(c.class())),
                    path.as_str(),
                    format!("cannot index [{i}] into a set"),
                )),
                Value::Collection(c) => {
                    let limit = c.len().saturating_add(cx.config().max_index_padding);
                    let Some(len) = i.checked_add(1).filter(|&n| n <= limit) else {
                        return Err(ConvertError::property(
                            types.display(&Type::Class(c.class())),
                            path.as_str(),
                            format!("index {i} is too far past length {}", c.len()),
                        ));
                    };
                    let child_desc = owner.item_descriptor(types);
                    let zero = types.zero_value(&child_desc.concrete_type(types));
                    c.pad_to(len, || zero.clone());
                    match c.get_mut(i) {
                        Some(child) => set_at(cx, child, &child_desc, rest, value, path),
                        None => Err(ConvertError::property(
                            types.display(&Type::Class(c.class())),
                            path.as_str(),
                            format!("index {i} not writable"),
                        )),
                    }
                }
                Value::Array(a) => {
                    let len = a.items.len();
                    let child_desc = owner.item_descriptor(types);
                    match a.items.get_mut(i) {
                        Some(child) => set_at(cx, child, &child_desc, rest, value, path),
                        None => Err(ConvertError::property(
                            types.display(&Type::array(a.component.clone())),
                            path.as_str(),
                            format!("index {i} out of bounds for length {len}"),
                        )),
                    }
                }
                Value::Map(m) => {
                    let key = cx.convert(Value::String(i.to_string()), &owner.key_descriptor(types))?;
                    let child_desc = owner.value_descriptor(types);
                    let child = m.slot(key, || Value::Null);
                    set_at(cx, child, &child_desc, rest, value, path)
                }
                other => Err(fail(other, format!("cannot index [{i}]"))),
            }
        }
    }
}
