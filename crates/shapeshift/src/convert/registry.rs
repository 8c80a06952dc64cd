// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Three-tier converter registry.
//!
//! Built once from an ordered list of providers, then read-only. Leaf
//! (Dynamic/Specific) selections are memoized per `(source, target)` class
//! pair in a bounded LRU; Nested rules are re-selected per call.

use super::{
    ConverterProvider, DynamicConverter, NestedConverter, Session, SpecificConverter,
};
use crate::config::DEFAULT_LOOKUP_CACHE_CAPACITY;
use crate::error::{ConvertError, Result};
use crate::types::{ClassId, TypeDescriptor, TypeSystem};
use crate::value::Value;
use lru::LruCache;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Leaf lookup cache statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
    /// Class pairs currently cached.
    pub cached: usize,
}

#[derive(Clone)]
enum LeafChoice {
    Dynamic(usize),
    Specific(Arc<dyn SpecificConverter>),
    Unsupported,
}

/// Collects converters from providers.
pub struct RegistryBuilder {
    specific: HashMap<(ClassId, ClassId), Arc<dyn SpecificConverter>>,
    dynamic: Vec<Arc<dyn DynamicConverter>>,
    nested: Vec<Arc<dyn NestedConverter>>,
    capacity: usize,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            specific: HashMap::new(),
            dynamic: Vec::new(),
            nested: Vec::new(),
            capacity: DEFAULT_LOOKUP_CACHE_CAPACITY,
        }
    }

    /// Leaf cache capacity; zero is raised to one.
    #[must_use]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Append everything `provider` contributes.
    ///
    /// A Specific converter for an already registered pair replaces the
    /// earlier one.
    #[must_use]
    pub fn provider(mut self, provider: &dyn ConverterProvider) -> Self {
        for conv in provider.specific() {
            let key = (conv.source(), conv.target());
            if self.specific.insert(key, conv).is_some() {
                log::warn!(
                    "[registry] specific converter {} -> {} replaced",
                    key.0,
                    key.1
                );
            }
        }
        self.dynamic.extend(provider.dynamic());
        self.nested.extend(provider.nested());
        self
    }

    pub fn build(mut self) -> ConverterRegistry {
        // Stable: equal priorities keep registration order.
        self.dynamic.sort_by_key(|c| c.priority());
        self.nested.sort_by_key(|c| c.priority());
        let capacity = NonZeroUsize::new(self.capacity).unwrap_or(NonZeroUsize::MIN);
        log::debug!(
            "[registry] built: {} specific, {} dynamic, {} nested",
            self.specific.len(),
            self.dynamic.len(),
            self.nested.len()
        );
        ConverterRegistry {
            specific: self.specific,
            dynamic: self.dynamic,
            nested: self.nested,
            leaf_cache: RwLock::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

/// Read-only converter tables plus the leaf lookup cache.
pub struct ConverterRegistry {
    specific: HashMap<(ClassId, ClassId), Arc<dyn SpecificConverter>>,
    dynamic: Vec<Arc<dyn DynamicConverter>>,
    nested: Vec<Arc<dyn NestedConverter>>,
    leaf_cache: RwLock<LruCache<(ClassId, ClassId), LeafChoice>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("specific", &self.specific.len())
            .field("dynamic", &self.dynamic.len())
            .field("nested", &self.nested.len())
            .finish()
    }
}

impl ConverterRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Exact-pair lookup in the Specific tier.
    pub fn specific(&self, source: ClassId, target: ClassId) -> Option<&Arc<dyn SpecificConverter>> {
        self.specific.get(&(source, target))
    }

    /// First Dynamic rule supporting the pair (uncached).
    pub fn dynamic(
        &self,
        types: &TypeSystem,
        source: ClassId,
        target: ClassId,
    ) -> Option<&Arc<dyn DynamicConverter>> {
        self.dynamic.iter().find(|c| c.supports(types, source, target))
    }

    /// First Nested rule supporting the pair for this value.
    pub fn nested(
        &self,
        cx: &Session<'_>,
        value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Option<&Arc<dyn NestedConverter>> {
        self.nested
            .iter()
            .find(|c| c.supports(cx, value, source, target))
    }

    pub fn nested_rules(&self) -> &[Arc<dyn NestedConverter>] {
        &self.nested
    }

    fn leaf(&self, types: &TypeSystem, source: ClassId, target: ClassId) -> LeafChoice {
        let key = (source, target);
        // `get` marks the pair most recently used.
        if let Some(hit) = self.leaf_cache.write().get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let choice = match self
            .dynamic
            .iter()
            .position(|c| c.supports(types, source, target))
        {
            Some(i) => LeafChoice::Dynamic(i),
            None => match self.specific.get(&key) {
                Some(conv) => LeafChoice::Specific(Arc::clone(conv)),
                None => LeafChoice::Unsupported,
            },
        };
        self.leaf_cache.write().put(key, choice.clone());
        choice
    }

    /// `true` if the Dynamic or Specific tier handles the pair.
    pub fn has_leaf(&self, types: &TypeSystem, source: ClassId, target: ClassId) -> bool {
        !matches!(self.leaf(types, source, target), LeafChoice::Unsupported)
    }

    /// Leaf conversion: Dynamic first, then Specific.
    pub fn convert_leaf(&self, types: &TypeSystem, value: Value, target: ClassId) -> Result<Value> {
        let source = value.class_id();
        match self.leaf(types, source, target) {
            LeafChoice::Dynamic(i) => {
                log::trace!(
                    "[registry] {} -> {} via {}",
                    types.class_name(source),
                    types.class_name(target),
                    self.dynamic[i].name()
                );
                self.dynamic[i].convert(types, value, target)
            }
            LeafChoice::Specific(conv) => conv.convert(value),
            LeafChoice::Unsupported => Err(ConvertError::unsupported(
                types.class_name(source),
                types.class_name(target),
            )),
        }
    }

    pub fn stats(&self) -> LookupStats {
        LookupStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            cached: self.leaf_cache.read().len(),
        }
    }

    pub fn clear_cache(&self) {
        self.leaf_cache.write().clear();
    }

    /// `(specific, dynamic, nested)` counts.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.specific.len(), self.dynamic.len(), self.nested.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::SpecificFn;

    struct Pair(Vec<Arc<dyn SpecificConverter>>);

    impl ConverterProvider for Pair {
        fn specific(&self) -> Vec<Arc<dyn SpecificConverter>> {
            self.0.clone()
        }
    }

    fn constant(v: i32) -> Arc<dyn SpecificConverter> {
        Arc::new(SpecificFn::new(ClassId::BOOL, ClassId::I32, move |_| {
            Ok(Value::I32(v))
        }))
    }

    #[test]
    fn test_later_specific_wins() {
        let registry = RegistryBuilder::new()
            .provider(&Pair(vec![constant(1)]))
            .provider(&Pair(vec![constant(2)]))
            .build();
        let types = TypeSystem::new();
        let out = registry
            .convert_leaf(&types, Value::Bool(true), ClassId::I32)
            .expect("convert");
        assert_eq!(out, Value::I32(2));
        assert_eq!(registry.counts().0, 1);
    }

    #[test]
    fn test_leaf_cache_evicts_least_recently_used() {
        let from = |source: ClassId| -> Arc<dyn SpecificConverter> {
            Arc::new(SpecificFn::new(source, ClassId::I32, |_| Ok(Value::I32(0))))
        };
        let registry = RegistryBuilder::new()
            .provider(&Pair(vec![from(ClassId::BOOL), from(ClassId::CHAR), from(ClassId::I8)]))
            .cache_capacity(2)
            .build();
        let types = TypeSystem::new();
        let run = |value: Value| {
            registry
                .convert_leaf(&types, value, ClassId::I32)
                .expect("convert");
        };

        run(Value::Bool(true));
        run(Value::Char('a'));
        run(Value::Bool(false)); // bool is now the most recent pair
        run(Value::I8(1)); // evicts char
        assert_eq!(registry.stats().misses, 3);

        run(Value::Bool(true));
        assert_eq!(registry.stats().misses, 3);
        run(Value::Char('b'));
        assert_eq!(registry.stats().misses, 4);
    }

    #[test]
    fn test_leaf_cache_stats() {
        let registry = RegistryBuilder::new()
            .provider(&Pair(vec![constant(7)]))
            .cache_capacity(2)
            .build();
        let types = TypeSystem::new();
        for _ in 0..3 {
            registry
                .convert_leaf(&types, Value::Bool(false), ClassId::I32)
                .expect("convert");
        }
        let err = registry
            .convert_leaf(&types, Value::Char('x'), ClassId::I32)
            .expect_err("no converter");
        assert!(err.is_unsupported());

        let stats = registry.stats();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.cached, 2);

        registry.clear_cache();
        assert_eq!(registry.stats().cached, 0);
    }
}
