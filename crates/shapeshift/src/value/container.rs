// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Composite value payloads.
//!
//! Collections and maps keep their storage private so the set (no
//! duplicates) and sorted-kind invariants hold after every mutation.

use super::Value;
use crate::types::{ClassId, CollectionKind, MapKind, Type, WrapperKind};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// Enumeration constant.
#[derive(Debug, Clone)]
pub struct EnumValue {
    pub class: ClassId,
    pub name: Arc<str>,
    pub ordinal: usize,
}

/// Fixed-length array with a declared component type.
#[derive(Debug, Clone)]
pub struct ArrayValue {
    pub component: Type,
    pub items: Vec<Value>,
}

impl ArrayValue {
    pub fn new(component: Type, items: Vec<Value>) -> Self {
        Self { component, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Collection instance of a concrete collection class.
///
/// `props` holds the named properties of bean-like collection subclasses.
/// Hash-set kinds keep a membership index next to `items`.
#[derive(Debug, Clone)]
pub struct CollectionValue {
    class: ClassId,
    kind: CollectionKind,
    items: Vec<Value>,
    members: IndexSet<Value>,
    pub props: IndexMap<String, Value>,
}

impl CollectionValue {
    pub fn new(class: ClassId, kind: CollectionKind) -> Self {
        Self {
            class,
            kind,
            items: Vec::new(),
            members: IndexSet::new(),
            props: IndexMap::new(),
        }
    }

    /// `Vec<T>` with the given items.
    pub fn seq(items: Vec<Value>) -> Self {
        Self {
            class: ClassId::VEC,
            kind: CollectionKind::Seq,
            items,
            members: IndexSet::new(),
            props: IndexMap::new(),
        }
    }

    pub fn with_items(
        class: ClassId,
        kind: CollectionKind,
        items: impl IntoIterator<Item = Value>,
    ) -> Self {
        let mut out = Self::new(class, kind);
        out.extend(items);
        out
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn contains(&self, value: &Value) -> bool {
        match self.kind {
            CollectionKind::HashSet | CollectionKind::IndexSet => self.members.contains(value),
            CollectionKind::SortedSet => self.items.binary_search(value).is_ok(),
            CollectionKind::Seq | CollectionKind::Deque => self.items.contains(value),
        }
    }

    /// Mutable slot access. Sets return `None`: an in-place edit could
    /// break uniqueness or ordering.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        if self.kind.is_set() {
            return None;
        }
        self.items.get_mut(index)
    }

    /// Append (sequences) or insert (sets). Returns `false` if a set already
    /// contained the value.
    pub fn push(&mut self, value: Value) -> bool {
        match self.kind {
            CollectionKind::Seq | CollectionKind::Deque => {
                self.items.push(value);
                true
            }
            CollectionKind::HashSet | CollectionKind::IndexSet => {
                if !self.members.insert(value.clone()) {
                    return false;
                }
                self.items.push(value);
                true
            }
            CollectionKind::SortedSet => match self.items.binary_search(&value) {
                Ok(_) => false,
                Err(pos) => {
                    self.items.insert(pos, value);
                    true
                }
            },
        }
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        for v in values {
            self.push(v);
        }
    }

    /// Replace the element at `index`. Sets remove the old element and
    /// insert the new one at its natural position.
    pub fn replace(&mut self, index: usize, value: Value) -> bool {
        if index >= self.items.len() {
            return false;
        }
        if self.kind.is_set() {
            let old = self.items.remove(index);
            self.members.swap_remove(&old);
            self.push(value);
        } else {
            self.items[index] = value;
        }
        true
    }

    /// Grow a sequence to `len` elements using `fill`. No-op for sets.
    pub fn pad_to(&mut self, len: usize, mut fill: impl FnMut() -> Value) {
        if self.kind.is_set() {
            return;
        }
        while self.items.len() < len {
            self.items.push(fill());
        }
    }
}

/// Map instance of a concrete map class.
///
/// `props` holds the named properties of bean-like map subclasses; they are
/// not counted by [`MapValue::len`].
#[derive(Debug, Clone)]
pub struct MapValue {
    class: ClassId,
    kind: MapKind,
    entries: IndexMap<Value, Value>,
    pub props: IndexMap<String, Value>,
}

impl MapValue {
    pub fn new(class: ClassId, kind: MapKind) -> Self {
        Self {
            class,
            kind,
            entries: IndexMap::new(),
            props: IndexMap::new(),
        }
    }

    /// Insertion-ordered `IndexMap<K, V>`.
    pub fn ordered() -> Self {
        Self::new(ClassId::INDEX_MAP, MapKind::Index)
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    pub fn entries(&self) -> &IndexMap<Value, Value> {
        &self.entries
    }

    pub fn into_entries(self) -> IndexMap<Value, Value> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Lookup by textual key.
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.entries.get(&Value::String(key.to_owned()))
    }

    pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.entries.iter()
    }

    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        if !self.kind.is_sorted() {
            return self.entries.insert(key, value);
        }
        match self.entries.binary_search_keys(&key) {
            Ok(i) => self
                .entries
                .get_index_mut(i)
                .map(|(_, slot)| std::mem::replace(slot, value)),
            Err(i) => {
                self.entries.shift_insert(i, key, value);
                None
            }
        }
    }

    /// Slot for `key`, inserting `default()` when absent.
    pub fn slot(&mut self, key: Value, default: impl FnOnce() -> Value) -> &mut Value {
        if !self.entries.contains_key(&key) {
            self.insert(key.clone(), default());
        }
        self.entries.entry(key).or_insert(Value::Null)
    }
}

/// Record instance. Virtual beans carry an abstract (interface) class.
#[derive(Debug, Clone)]
pub struct BeanValue {
    pub class: ClassId,
    pub props: IndexMap<String, Value>,
}

impl BeanValue {
    pub fn new(class: ClassId) -> Self {
        Self {
            class,
            props: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.props.insert(name.into(), value.into())
    }
}

/// `Option<T>` / `Ref<T>` holder.
#[derive(Debug, Clone)]
pub struct WrapperValue {
    pub class: ClassId,
    pub kind: WrapperKind,
    pub inner: Option<Box<Value>>,
}

impl WrapperValue {
    pub fn some(value: Value) -> Self {
        Self {
            class: ClassId::OPTION,
            kind: WrapperKind::Optional,
            inner: Some(Box::new(value)),
        }
    }

    pub fn none() -> Self {
        Self {
            class: ClassId::OPTION,
            kind: WrapperKind::Optional,
            inner: None,
        }
    }

    pub fn get(&self) -> Option<&Value> {
        self.inner.as_deref()
    }
}
