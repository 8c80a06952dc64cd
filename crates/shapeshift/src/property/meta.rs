// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-class property metadata.
//!
//! Built once per class by merging the properties declared along the
//! inheritance chain (superclass first, then interfaces, then the class
//! itself; a redeclaration replaces the inherited entry in place).

use crate::types::{ClassId, PropertyAccess, PropertyDef, Type, TypeSystem};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Effective metadata of one property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMeta {
    pub name: Arc<str>,
    /// Declared type, expressed in terms of `declaring_class` parameters.
    pub ty: Type,
    pub declaring_class: ClassId,
    readable: bool,
    writable: bool,
    pub access: PropertyAccess,
    pub alias: Option<Arc<str>>,
    pub index: Option<usize>,
}

impl PropertyMeta {
    fn from_def(def: &PropertyDef, declaring_class: ClassId) -> Self {
        Self {
            name: Arc::clone(&def.name),
            ty: def.ty.clone(),
            declaring_class,
            readable: def.readable,
            writable: def.writable,
            access: def.access,
            alias: def.alias.clone(),
            index: def.index,
        }
    }

    /// Readable for mapping purposes; the access annotation wins over the
    /// physical reader.
    pub fn is_readable(&self) -> bool {
        match self.access {
            PropertyAccess::Auto => self.readable,
            PropertyAccess::ReadOnly | PropertyAccess::ReadWrite => true,
            PropertyAccess::WriteOnly | PropertyAccess::Ignore => false,
        }
    }

    pub fn is_writable(&self) -> bool {
        match self.access {
            PropertyAccess::Auto => self.writable,
            PropertyAccess::WriteOnly | PropertyAccess::ReadWrite => true,
            PropertyAccess::ReadOnly | PropertyAccess::Ignore => false,
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.access == PropertyAccess::Ignore
    }

    /// Name used when matching against other property sets.
    pub fn mapping_key(&self, positional: bool) -> String {
        match (positional, self.index, &self.alias) {
            (true, Some(i), _) => i.to_string(),
            (_, _, Some(alias)) => alias.to_string(),
            _ => self.name.to_string(),
        }
    }
}

/// All properties of a class, inherited ones included.
#[derive(Debug, Default)]
pub struct ClassProperties {
    props: IndexMap<Arc<str>, PropertyMeta>,
}

impl ClassProperties {
    pub fn get(&self, name: &str) -> Option<&PropertyMeta> {
        self.props.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyMeta> {
        self.props.values()
    }

    pub fn readable(&self) -> impl Iterator<Item = &PropertyMeta> {
        self.iter().filter(|p| p.is_readable())
    }

    pub fn writable(&self) -> impl Iterator<Item = &PropertyMeta> {
        self.iter().filter(|p| p.is_writable())
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl TypeSystem {
    /// Cached property metadata of `class`.
    pub fn properties(&self, class: ClassId) -> Arc<ClassProperties> {
        if let Some(hit) = self.properties.get(&class) {
            return Arc::clone(hit.value());
        }
        let mut props = IndexMap::new();
        let mut visited = HashSet::new();
        self.collect_properties(class, &mut props, &mut visited);
        let built = Arc::new(ClassProperties { props });
        log::trace!(
            "[types] {} properties cached for {}",
            built.len(),
            self.class_name(class)
        );
        Arc::clone(self.properties.entry(class).or_insert(built).value())
    }

    fn collect_properties(
        &self,
        id: ClassId,
        out: &mut IndexMap<Arc<str>, PropertyMeta>,
        visited: &mut HashSet<ClassId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        let class = self.class(id);
        for sup in class.supertypes() {
            if let Some(raw) = sup.raw_class() {
                self.collect_properties(raw, out, visited);
            }
        }
        for def in class.own_properties() {
            // Neither reader nor writer: nothing to expose.
            if !def.readable && !def.writable {
                continue;
            }
            out.insert(Arc::clone(&def.name), PropertyMeta::from_def(def, id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassBuilder;

    #[test]
    fn test_inherited_properties_merge() {
        let types = TypeSystem::new();
        let base = types
            .define(
                ClassBuilder::bean("Base")
                    .property("id", Type::I64)
                    .property("label", Type::STRING),
            )
            .expect("base");
        let derived = types
            .define(
                ClassBuilder::bean("Derived")
                    .extends(Type::Class(base))
                    .property_def(PropertyDef::new("label", Type::STRING).getter_only())
                    .property("extra", Type::BOOL),
            )
            .expect("derived");

        let props = types.properties(derived);
        let names: Vec<_> = props.iter().map(|p| p.name.to_string()).collect();
        assert_eq!(names, vec!["id", "label", "extra"]);
        let label = props.get("label").expect("label");
        assert_eq!(label.declaring_class, derived);
        assert!(label.is_readable());
        assert!(!label.is_writable());
        assert_eq!(props.get("id").expect("id").declaring_class, base);
    }

    #[test]
    fn test_access_overrides_physical_accessors() {
        let types = TypeSystem::new();
        let id = types
            .define(
                ClassBuilder::bean("Secret")
                    .property_def(
                        PropertyDef::new("token", Type::STRING).access(PropertyAccess::WriteOnly),
                    )
                    .property_def(
                        PropertyDef::new("hidden", Type::STRING).access(PropertyAccess::Ignore),
                    )
                    .property_def(
                        PropertyDef::new("view", Type::STRING)
                            .setter_only()
                            .access(PropertyAccess::ReadWrite),
                    )
                    .property_def(PropertyDef::new("none", Type::STRING).getter_only().setter_only()),
            )
            .expect("define");
        let props = types.properties(id);
        let token = props.get("token").expect("token");
        assert!(!token.is_readable() && token.is_writable());
        assert!(props.get("hidden").expect("hidden").is_ignored());
        assert!(props.get("view").expect("view").is_readable());
        assert!(!props.contains("none"));
    }

    #[test]
    fn test_mapping_key_precedence() {
        let meta = PropertyMeta::from_def(
            &PropertyDef::new("user_name", Type::STRING).alias("userName").index(1),
            ClassId::OBJECT,
        );
        assert_eq!(meta.mapping_key(false), "userName");
        assert_eq!(meta.mapping_key(true), "1");
    }
}
