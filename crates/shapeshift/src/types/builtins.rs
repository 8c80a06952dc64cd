// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in class table shared by every `TypeSystem`.

use super::class::{
    Class, ClassId, CollectionKind, MapKind, ScalarKind, Shape, TypeParamDef, WrapperKind,
};
use super::Type;
use std::sync::Arc;

struct BuiltinDef {
    id: ClassId,
    name: &'static str,
    shape: Shape,
    params: &'static [&'static str],
    supers: &'static [ClassId],
    is_abstract: bool,
}

const fn builtin(
    id: ClassId,
    name: &'static str,
    shape: Shape,
    params: &'static [&'static str],
    supers: &'static [ClassId],
    is_abstract: bool,
) -> BuiltinDef {
    BuiltinDef {
        id,
        name,
        shape,
        params,
        supers,
        is_abstract,
    }
}

const T: &[&str] = &["T"];
const KV: &[&str] = &["K", "V"];

const CONTAINERS: &[BuiltinDef] = &[
    builtin(ClassId::ARRAY, "[]", Shape::Array, &[], &[], false),
    builtin(
        ClassId::COLLECTION,
        "Collection",
        Shape::Collection(CollectionKind::Seq),
        T,
        &[],
        true,
    ),
    builtin(
        ClassId::SEQ,
        "Seq",
        Shape::Collection(CollectionKind::Seq),
        T,
        &[ClassId::COLLECTION],
        true,
    ),
    builtin(
        ClassId::VEC,
        "Vec",
        Shape::Collection(CollectionKind::Seq),
        T,
        &[ClassId::SEQ],
        false,
    ),
    builtin(
        ClassId::VEC_DEQUE,
        "VecDeque",
        Shape::Collection(CollectionKind::Deque),
        T,
        &[ClassId::SEQ],
        false,
    ),
    builtin(
        ClassId::SET,
        "Set",
        Shape::Collection(CollectionKind::IndexSet),
        T,
        &[ClassId::COLLECTION],
        true,
    ),
    builtin(
        ClassId::HASH_SET,
        "HashSet",
        Shape::Collection(CollectionKind::HashSet),
        T,
        &[ClassId::SET],
        false,
    ),
    builtin(
        ClassId::INDEX_SET,
        "IndexSet",
        Shape::Collection(CollectionKind::IndexSet),
        T,
        &[ClassId::SET],
        false,
    ),
    builtin(
        ClassId::BTREE_SET,
        "BTreeSet",
        Shape::Collection(CollectionKind::SortedSet),
        T,
        &[ClassId::SET],
        false,
    ),
    builtin(ClassId::MAP, "Map", Shape::Map(MapKind::Index), KV, &[], true),
    builtin(
        ClassId::HASH_MAP,
        "HashMap",
        Shape::Map(MapKind::Hash),
        KV,
        &[ClassId::MAP],
        false,
    ),
    builtin(
        ClassId::INDEX_MAP,
        "IndexMap",
        Shape::Map(MapKind::Index),
        KV,
        &[ClassId::MAP],
        false,
    ),
    builtin(
        ClassId::BTREE_MAP,
        "BTreeMap",
        Shape::Map(MapKind::Sorted),
        KV,
        &[ClassId::MAP],
        false,
    ),
    builtin(
        ClassId::OPTION,
        "Option",
        Shape::Wrapper(WrapperKind::Optional),
        T,
        &[],
        false,
    ),
    builtin(
        ClassId::REF,
        "Ref",
        Shape::Wrapper(WrapperKind::Ref),
        T,
        &[],
        false,
    ),
];

fn empty_class(id: ClassId, name: &str, shape: Shape) -> Class {
    Class {
        id,
        name: Arc::from(name),
        shape,
        type_params: Vec::new(),
        superclass: None,
        interfaces: Vec::new(),
        properties: Vec::new(),
        variants: Vec::new(),
        factories: Vec::new(),
        is_abstract: false,
        defined: true,
    }
}

/// Built-in classes indexed by id.
pub(crate) fn builtin_classes() -> Vec<Class> {
    let mut out = Vec::with_capacity(ClassId::BUILTIN_COUNT as usize);
    out.push(empty_class(ClassId::OBJECT, "Object", Shape::Object));
    for kind in ScalarKind::ALL {
        out.push(empty_class(kind.class_id(), kind.name(), Shape::Scalar(kind)));
    }
    for s in CONTAINERS {
        let mut class = empty_class(s.id, s.name, s.shape);
        class.is_abstract = s.is_abstract;
        class.type_params = s
            .params
            .iter()
            .map(|p| TypeParamDef {
                name: Arc::from(*p),
                bound: None,
            })
            .collect();
        // Every built-in supertype takes the subclass parameters unchanged.
        let args: Vec<Type> = s
            .params
            .iter()
            .map(|p| Type::owned_param(s.id, *p))
            .collect();
        class.interfaces = s
            .supers
            .iter()
            .map(|sup| Type::generic(*sup, args.iter().cloned()))
            .collect();
        out.push(class);
    }
    debug_assert!(out.iter().enumerate().all(|(i, c)| c.id.index() == i));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_dense() {
        let classes = builtin_classes();
        assert_eq!(classes.len(), ClassId::BUILTIN_COUNT as usize);
        for (i, class) in classes.iter().enumerate() {
            assert_eq!(class.id.index(), i, "{}", class.name);
        }
    }

    #[test]
    fn test_vec_implements_seq_with_own_param() {
        let classes = builtin_classes();
        let vec = &classes[ClassId::VEC.index()];
        assert_eq!(
            vec.interfaces,
            vec![Type::generic(
                ClassId::SEQ,
                [Type::owned_param(ClassId::VEC, "T")]
            )]
        );
        assert!(!vec.is_abstract);
        assert!(classes[ClassId::SET.index()].is_abstract);
    }
}
