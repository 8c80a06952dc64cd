// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array, collection and map rules.

use super::into_items;
use crate::convert::{NestedConverter, Session};
use crate::error::{ConvertError, Result};
use crate::property::copy::convert_member;
use crate::types::{Shape, TypeDescriptor};
use crate::value::{ArrayValue, Value};
use indexmap::IndexMap;
use std::sync::Arc;

fn convert_items(
    cx: &mut Session<'_>,
    items: Vec<Value>,
    item: &Arc<TypeDescriptor>,
) -> Result<Vec<Value>> {
    items
        .into_iter()
        .map(|v| cx.convert(v, item))
        .collect()
}

/// Sequence to array. Elements convert against the component type; a null
/// element takes the component's zero value.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayRule;

impl NestedConverter for ArrayRule {
    fn name(&self) -> &str {
        "array"
    }

    fn priority(&self) -> i32 {
        -30
    }

    fn supports(
        &self,
        cx: &Session<'_>,
        _value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        let types = cx.types();
        target.is_array(types) && source.shape(types).is_sequence()
    }

    fn convert(
        &self,
        cx: &mut Session<'_>,
        value: Value,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        let types = cx.types();
        let item = target.item_descriptor(types);
        let component = types.erase(&item.concrete_type(types));
        let items = into_items(value).unwrap_or_default();
        let items = convert_items(cx, items, &item)?;
        Ok(Value::Array(ArrayValue::new(component, items)))
    }
}

/// Sequence to collection of the target's concrete class.
///
/// Abstract targets instantiate their default class (`Vec`, `IndexSet`,
/// ...). Named properties of a bean-like source collection are carried over
/// when the target declares them.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionRule;

impl NestedConverter for CollectionRule {
    fn name(&self) -> &str {
        "collection"
    }

    fn priority(&self) -> i32 {
        -20
    }

    fn supports(
        &self,
        cx: &Session<'_>,
        _value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        let types = cx.types();
        target.is_collection(types) && source.shape(types).is_sequence()
    }

    fn convert(
        &self,
        cx: &mut Session<'_>,
        value: Value,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        let types = cx.types();
        let mut out = types.instantiate(&target.concrete_type(types))?;
        let source_props = match &value {
            Value::Collection(c) => c.props.clone(),
            _ => IndexMap::new(),
        };
        let item = target.item_descriptor(types);
        let items = into_items(value).unwrap_or_default();
        let items = convert_items(cx, items, &item)?;

        let Value::Collection(c) = &mut out else {
            return Err(ConvertError::unsupported(
                "sequence",
                types.display(target.actual_type(types)),
            ));
        };
        c.extend(items);

        let declared = types.properties(c.class());
        for (name, v) in source_props {
            let Some(meta) = declared.get(&name).filter(|m| m.is_writable()) else {
                continue;
            };
            let converted = convert_member(cx, target, &meta.ty, v)?;
            c.props.insert(name, converted);
        }
        Ok(out)
    }
}

/// Map or bean to a map of the target's concrete class.
///
/// Keys and values convert against the target's key and value types. Named
/// properties of the source land in the target's declared properties when it
/// has a writable one of that name, otherwise they become entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapRule;

impl NestedConverter for MapRule {
    fn name(&self) -> &str {
        "map"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn supports(
        &self,
        cx: &Session<'_>,
        _value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        let types = cx.types();
        target.is_map(types) && matches!(source.shape(types), Shape::Map(_) | Shape::Bean)
    }

    fn convert(
        &self,
        cx: &mut Session<'_>,
        value: Value,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        let types = cx.types();
        let source_class = value.class_id();
        let (entries, props) = match value {
            Value::Map(m) => {
                let props = m.props.clone();
                (m.into_entries(), props)
            }
            Value::Bean(b) => {
                let readable = types.properties(b.class);
                let props = b
                    .props
                    .into_iter()
                    .filter(|(name, _)| readable.get(name).map_or(true, |m| m.is_readable()))
                    .collect();
                (IndexMap::new(), props)
            }
            other => return Err(cx.unsupported(&other, target)),
        };

        let mut out = types.instantiate(&target.concrete_type(types))?;
        let Value::Map(map) = &mut out else {
            return Err(ConvertError::unsupported(
                types.class_name(source_class),
                types.display(target.actual_type(types)),
            ));
        };
        let key_desc = target.key_descriptor(types);
        let value_desc = target.value_descriptor(types);
        for (k, v) in entries {
            let k = cx.convert(k, &key_desc)?;
            let v = cx.convert(v, &value_desc)?;
            map.insert(k, v);
        }

        let declared = types.properties(map.class());
        for (name, v) in props {
            if let Some(meta) = declared.get(&name).filter(|m| m.is_writable()) {
                let converted = convert_member(cx, target, &meta.ty, v)?;
                map.props.insert(name, converted);
            } else {
                let k = cx.convert(Value::String(name), &key_desc)?;
                let v = cx.convert(v, &value_desc)?;
                map.insert(k, v);
            }
        }
        Ok(out)
    }
}

/// One-element sequences to leaves, and leaves to one-element sequences.
///
/// A sequence of any other length never collapses to a leaf: it fails with
/// [`ConvertError::Cardinality`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleElementRule;

impl NestedConverter for SingleElementRule {
    fn name(&self) -> &str {
        "single-element"
    }

    fn supports(
        &self,
        cx: &Session<'_>,
        _value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        let types = cx.types();
        let (s, t) = (source.shape(types), target.shape(types));
        (s.is_sequence() && t.is_leaf()) || (s.is_leaf() && t.is_sequence())
    }

    fn convert(
        &self,
        cx: &mut Session<'_>,
        value: Value,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        let types = cx.types();
        let from = types.display(&value.runtime_type());
        let target_shape = target.shape(types);
        if value.items().is_some() {
            let mut items = into_items(value).unwrap_or_default();
            if items.len() != 1 {
                return Err(ConvertError::Cardinality {
                    len: items.len(),
                    from,
                    to: types.display(target.actual_type(types)),
                });
            }
            let single = items.remove(0);
            return cx.convert(single, target);
        }

        let item = target.item_descriptor(types);
        let single = cx.convert(value, &item)?;
        match target_shape {
            Shape::Array => Ok(Value::Array(ArrayValue::new(
                types.erase(&item.concrete_type(types)),
                vec![single],
            ))),
            _ => {
                let mut out = types.instantiate(&target.concrete_type(types))?;
                if let Value::Collection(c) = &mut out {
                    c.push(single);
                }
                Ok(out)
            }
        }
    }
}
