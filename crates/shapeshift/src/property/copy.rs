// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Common-property mapping and bulk copy between bean-like values.
//!
//! A source exposes its readable declared properties, the undeclared
//! properties it carries, its map keys (optional) and, for arrays and
//! collections, its element positions. A target accepts its writable
//! declared properties; maps and virtual beans accept any name on top.

use crate::config::CopyDefaults;
use crate::convert::Session;
use crate::error::{ConvertError, Result};
use crate::types::{ClassId, Shape, Type, TypeDescriptor, TypeSystem};
use crate::value::{MapValue, Value};
use indexmap::IndexMap;
use std::sync::Arc;

/// Knobs for [`copy_into`] and the bean/map helpers built on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOptions {
    /// Skip source properties whose value is null.
    pub ignore_null: bool,
    /// Names excluded on both sides (mapping keys or physical names).
    pub ignore_names: Vec<String>,
    /// Log and skip a property that fails instead of aborting the copy.
    pub ignore_errors: bool,
    /// Offer the source's map keys as property names.
    pub include_map_keys: bool,
    /// Overwrite target properties that already hold a non-null value.
    pub override_existing: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            ignore_null: false,
            ignore_names: Vec::new(),
            ignore_errors: false,
            include_map_keys: true,
            override_existing: true,
        }
    }
}

impl CopyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_defaults(defaults: &CopyDefaults) -> Self {
        Self {
            ignore_null: defaults.ignore_null,
            ignore_errors: defaults.ignore_errors,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn ignore_null(mut self, on: bool) -> Self {
        self.ignore_null = on;
        self
    }

    #[must_use]
    pub fn ignore_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn ignore_errors(mut self, on: bool) -> Self {
        self.ignore_errors = on;
        self
    }

    #[must_use]
    pub fn include_map_keys(mut self, on: bool) -> Self {
        self.include_map_keys = on;
        self
    }

    #[must_use]
    pub fn override_existing(mut self, on: bool) -> Self {
        self.override_existing = on;
        self
    }
}

/// Beans of an abstract class (virtual beans) and untyped beans store any
/// property.
pub(crate) fn is_open_bean(types: &TypeSystem, class: ClassId) -> bool {
    let class = types.class(class);
    class.is_abstract() || !matches!(class.shape(), Shape::Bean)
}

fn accepts_any_property(types: &TypeSystem, value: &Value) -> bool {
    match value {
        Value::Map(_) => true,
        Value::Bean(b) => is_open_bean(types, b.class),
        _ => false,
    }
}

/// Readable `(mapping key, physical name)` pairs of a source value.
fn source_keys(types: &TypeSystem, source: &Value, include_map_keys: bool) -> Vec<(String, String)> {
    let mut keys = Vec::new();
    if let (Value::Map(m), true) = (source, include_map_keys) {
        keys.extend(m.iter().filter_map(|(k, _)| k.key_text()).map(|k| (k.clone(), k)));
    }
    if let Some(props) = source.props() {
        let declared = types.properties(source.class_id());
        for meta in declared.readable() {
            keys.push((meta.mapping_key(false), meta.name.to_string()));
        }
        for name in props.keys() {
            if !declared.contains(name) {
                keys.push((name.clone(), name.clone()));
            }
        }
    }
    if let Some(items) = source.items() {
        keys.extend((0..items.len()).map(|i| (i.to_string(), i.to_string())));
    }
    keys
}

/// Parallel lists of source and target names: `source[i]` feeds `target[i]`.
///
/// Names listed in `ignore_names` are dropped from both sides. Write-only
/// properties never appear on the source side, read-only ones never on the
/// target side. Alias and index overrides take precedence over the physical
/// name when matching; the returned lists hold physical names.
pub fn common_mapping<S: AsRef<str>>(
    types: &TypeSystem,
    source: &Value,
    target: &Value,
    include_map_keys: bool,
    ignore_names: &[S],
) -> (Vec<String>, Vec<String>) {
    let ignored = |name: &str| ignore_names.iter().any(|n| n.as_ref() == name);
    let positional = source.items().is_some();

    let mut accepted: IndexMap<String, String> = IndexMap::new();
    if target.props().is_some() {
        for meta in types.properties(target.class_id()).writable() {
            accepted
                .entry(meta.mapping_key(positional))
                .or_insert_with(|| meta.name.to_string());
        }
    }
    let open = accepts_any_property(types, target);

    let mut seen = std::collections::HashSet::new();
    let (mut from, mut to) = (Vec::new(), Vec::new());
    for (key, physical) in source_keys(types, source, include_map_keys) {
        if !seen.insert(key.clone()) || ignored(&key) || ignored(&physical) {
            continue;
        }
        let target_name = match accepted.get(&key) {
            Some(name) => name.clone(),
            None if open => key,
            None => continue,
        };
        if ignored(&target_name) {
            continue;
        }
        from.push(physical);
        to.push(target_name);
    }
    (from, to)
}

/// Current value of a physical slot; `None` when the value has no such slot.
pub(crate) fn read_slot(source: &Value, name: &str) -> Option<Value> {
    match source {
        Value::Map(m) => m
            .get_str(name)
            .or_else(|| {
                m.iter()
                    .find(|(k, _)| k.key_text().as_deref() == Some(name))
                    .map(|(_, v)| v)
            })
            .or_else(|| m.props.get(name))
            .cloned(),
        Value::Bean(b) => b.props.get(name).cloned(),
        Value::Collection(c) => match name.parse::<usize>() {
            Ok(i) => c.get(i).cloned(),
            Err(_) => c.props.get(name).cloned(),
        },
        Value::Array(a) => name.parse::<usize>().ok().and_then(|i| a.items.get(i).cloned()),
        Value::Wrapper(w) => w.get().and_then(|inner| read_slot(inner, name)),
        _ => None,
    }
}

/// Descriptor `target` is accessed through: `declared` when the value's
/// class conforms to it, otherwise the value's runtime type.
pub(crate) fn owner_descriptor(
    types: &TypeSystem,
    target: &Value,
    declared: &Arc<TypeDescriptor>,
) -> Arc<TypeDescriptor> {
    let class = declared.actual_class(types);
    if class != ClassId::OBJECT && types.is_assignable(class, target.class_id()) {
        Arc::clone(declared)
    } else {
        types.descriptor(None, &target.runtime_type())
    }
}

/// Convert `value` to the declared type of a property of `owner`.
pub(crate) fn convert_member(
    cx: &mut Session<'_>,
    owner: &TypeDescriptor,
    ty: &Type,
    value: Value,
) -> Result<Value> {
    let declared = owner.member_descriptor(cx.types(), ty);
    cx.convert(value, &declared)
}

/// Store `value` under `name`, converting it to the slot's declared type.
pub(crate) fn write_slot(
    cx: &mut Session<'_>,
    target: &mut Value,
    owner: &Arc<TypeDescriptor>,
    name: &str,
    value: Value,
) -> Result<()> {
    let types = cx.types();
    let owner = owner_descriptor(types, target, owner);
    let props = types.properties(target.class_id());
    if let Some(meta) = props.get(name) {
        if !meta.is_writable() {
            return Err(ConvertError::property(
                types.display(&target.runtime_type()),
                name,
                "property is not writable",
            ));
        }
        if target.props().is_none() {
            return Err(ConvertError::property(
                types.display(&target.runtime_type()),
                name,
                "value has no property slots",
            ));
        }
        let converted = convert_member(cx, &owner, &meta.ty, value)?;
        if let Some(slots) = target.props_mut() {
            slots.insert(name.to_string(), converted);
        }
        return Ok(());
    }

    match target {
        Value::Map(m) => {
            let key = cx.convert(Value::String(name.to_string()), &owner.key_descriptor(types))?;
            let value = cx.convert(value, &owner.value_descriptor(types))?;
            m.insert(key, value);
            Ok(())
        }
        Value::Bean(b) if is_open_bean(types, b.class) => {
            b.props.insert(name.to_string(), value);
            Ok(())
        }
        Value::Collection(c) => {
            let Ok(index) = name.parse::<usize>() else {
                return Err(ConvertError::property(
                    types.display(&Type::Class(c.class())),
                    name,
                    "no writable property",
                ));
            };
            let item = cx.convert(value, &owner.item_descriptor(types))?;
            if !c.replace(index, item) {
                return Err(ConvertError::property(
                    types.display(&Type::Class(c.class())),
                    name,
                    "index out of bounds",
                ));
            }
            Ok(())
        }
        other => Err(ConvertError::property(
            types.display(&other.runtime_type()),
            name,
            "no writable property",
        )),
    }
}

/// Copy `source_names[i]` of `source` to `target_names[i]` of `target`.
pub(crate) fn copy_pairs(
    cx: &mut Session<'_>,
    source: &Value,
    target: &mut Value,
    owner: &Arc<TypeDescriptor>,
    pairs: impl IntoIterator<Item = (String, String)>,
    opts: &CopyOptions,
) -> Result<()> {
    for (from, to) in pairs {
        let value = read_slot(source, &from).unwrap_or(Value::Null);
        if value.is_null() && opts.ignore_null {
            continue;
        }
        if !opts.override_existing && read_slot(target, &to).is_some_and(|v| !v.is_null()) {
            continue;
        }
        match write_slot(cx, target, owner, &to, value) {
            Ok(()) => {}
            Err(e) if opts.ignore_errors => {
                log::debug!("[copy] skipping '{}' -> '{}': {}", from, to, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Copy every common property of `source` into `target`.
pub fn copy_into(
    cx: &mut Session<'_>,
    source: &Value,
    target: &mut Value,
    owner: &Arc<TypeDescriptor>,
    opts: &CopyOptions,
) -> Result<()> {
    let (from, to) = common_mapping(
        cx.types(),
        source,
        target,
        opts.include_map_keys,
        opts.ignore_names.as_slice(),
    );
    copy_pairs(cx, source, target, owner, from.into_iter().zip(to), opts)
}

/// Positional copy of explicitly named property pairs.
pub fn copy_mapped<S: AsRef<str>>(
    cx: &mut Session<'_>,
    source: &Value,
    source_names: &[S],
    target: &mut Value,
    target_names: &[S],
    opts: &CopyOptions,
) -> Result<()> {
    if source_names.len() != target_names.len() {
        return Err(ConvertError::invalid(format!(
            "{} source names but {} target names",
            source_names.len(),
            target_names.len()
        )));
    }
    let owner = cx.descriptor(None, &target.runtime_type());
    let pairs: Vec<(String, String)> = source_names
        .iter()
        .zip(target_names)
        .map(|(s, t)| (s.as_ref().to_string(), t.as_ref().to_string()))
        .filter(|(s, t)| !opts.ignore_names.iter().any(|n| n == s || n == t))
        .collect();
    copy_pairs(cx, source, target, &owner, pairs, opts)
}

/// New instance of `ty` populated from the common properties of `source`.
pub fn to_bean(cx: &mut Session<'_>, source: &Value, ty: &Type, opts: &CopyOptions) -> Result<Value> {
    if source.is_null() {
        return Ok(Value::Null);
    }
    let mut target = cx.types().instantiate(ty)?;
    let owner = cx.descriptor(None, ty);
    copy_into(cx, source, &mut target, &owner, opts)?;
    Ok(target)
}

/// Insertion-ordered `String`-keyed map of the readable properties of a
/// bean or map.
pub fn to_map(cx: &mut Session<'_>, source: &Value, opts: &CopyOptions) -> Result<Value> {
    match source {
        Value::Null => return Ok(Value::Null),
        Value::Bean(_) | Value::Map(_) => {}
        other => {
            return Err(ConvertError::invalid(format!(
                "{} is not bean-like",
                cx.types().display(&other.runtime_type())
            )))
        }
    }
    let mut target = Value::Map(MapValue::ordered());
    let owner = cx.descriptor(None, &Type::map(Type::STRING, Type::OBJECT));
    copy_into(cx, source, &mut target, &owner, opts)?;
    Ok(target)
}
