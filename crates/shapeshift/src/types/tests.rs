// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tests for the type model.

use super::*;
use crate::value::Value;

fn boxes(types: &TypeSystem) -> (ClassId, ClassId) {
    let boxed = types
        .define(
            ClassBuilder::bean("Box")
                .type_param("T")
                .property("item", Type::param("T"))
                .property("items", Type::list(Type::param("T"))),
        )
        .expect("define Box");
    let int_box = types
        .define(ClassBuilder::bean("IntBox").extends(Type::generic(boxed, [Type::I32])))
        .expect("define IntBox");
    (boxed, int_box)
}

#[test]
fn test_define_and_lookup() {
    let types = TypeSystem::new();
    let before = types.len();
    let (boxed, int_box) = boxes(&types);
    assert_eq!(types.len(), before + 2);
    assert_eq!(types.lookup("Box"), Some(boxed));
    assert_eq!(types.class(int_box).name(), "IntBox");
    assert!(types.class(boxed).is_defined());
    assert_eq!(types.class(boxed).shape(), Shape::Bean);
    assert!(types.is_assignable(boxed, int_box));
    assert!(!types.is_assignable(int_box, boxed));
}

#[test]
fn test_define_rejects_duplicates_and_unknown_params() {
    let types = TypeSystem::new();
    types
        .define(ClassBuilder::bean("Point").property("x", Type::I32))
        .expect("first definition");
    let err = types
        .define(ClassBuilder::bean("Point"))
        .expect_err("duplicate class");
    assert!(err.is_invalid_argument());

    let err = types
        .define(
            ClassBuilder::bean("Pair")
                .property("a", Type::I32)
                .property("a", Type::I64),
        )
        .expect_err("duplicate property");
    assert!(err.is_invalid_argument());

    let err = types
        .define(ClassBuilder::bean("Loose").property("v", Type::param("U")))
        .expect_err("unknown parameter");
    assert!(err.to_string().contains("'U'"));
}

#[test]
fn test_declare_then_define_self_reference() {
    let types = TypeSystem::new();
    let node = types.declare("Node");
    assert!(!types.class(node).is_defined());
    let defined = types
        .define(
            ClassBuilder::bean("Node")
                .property("value", Type::STRING)
                .property("next", Type::Class(node)),
        )
        .expect("define Node");
    assert_eq!(node, defined);
    assert!(types.class(node).is_defined());
}

#[test]
fn test_cyclic_inheritance_rejected() {
    let types = TypeSystem::new();
    let a = types.declare("A");
    types
        .define(ClassBuilder::bean("B").extends(Type::Class(a)))
        .expect("define B");
    let b = types.lookup("B").expect("B registered");
    let err = types
        .define(ClassBuilder::bean("A").extends(Type::Class(b)))
        .expect_err("cycle");
    assert!(err.to_string().contains("cyclic"));
}

#[test]
fn test_container_subclass_inherits_shape() {
    let types = TypeSystem::new();
    let tagged = types
        .define(
            ClassBuilder::bean("TaggedMap")
                .extends(Type::generic(ClassId::INDEX_MAP, [Type::STRING, Type::STRING]))
                .property("tag", Type::STRING),
        )
        .expect("define");
    assert_eq!(types.class(tagged).shape(), Shape::Map(MapKind::Index));
    assert!(types.is_assignable(ClassId::MAP, tagged));

    let err = types
        .define(ClassBuilder::bean("Bad").extends(Type::I32))
        .expect_err("scalar supertype");
    assert!(err.is_invalid_argument());
}

#[test]
fn test_descriptor_interning() {
    let types = TypeSystem::new();
    let a = types.descriptor(None, &Type::vec(Type::I32));
    let b = types.descriptor(None, &Type::vec(Type::I32));
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    let c = types.descriptor(Some(&Type::STRING), &Type::vec(Type::I32));
    assert_ne!(*a, *c);
}

#[test]
fn test_generic_field_resolves_through_subclass() {
    let types = TypeSystem::new();
    let (boxed, int_box) = boxes(&types);
    let items = types
        .properties(boxed)
        .get("items")
        .expect("items property")
        .ty
        .clone();

    let desc = types.descriptor(Some(&Type::Class(int_box)), &items);
    assert_eq!(desc.actual_type(&types), &Type::list(Type::I32));
    assert_eq!(desc.item_type(&types), &Type::I32);
    assert!(desc.is_collection(&types));

    // Without the usage site the element stays unconstrained.
    let bare = types.descriptor(None, &items);
    assert!(bare.is_unresolved(&types));
    assert!(types.descriptor(None, bare.item_type(&types)).is_object(&types));
}

#[test]
fn test_map_and_wrapper_descriptors() {
    let types = TypeSystem::new();
    let desc = types.descriptor(None, &Type::map(Type::STRING, Type::vec(Type::U8)));
    assert_eq!(desc.key_type(&types), &Type::STRING);
    assert_eq!(desc.value_type(&types), &Type::vec(Type::U8));
    assert_eq!(
        desc.value_descriptor(&types).item_type(&types),
        &Type::U8
    );

    let opt = types.descriptor(None, &Type::option(Type::F32));
    assert!(opt.is_wrapper(&types));
    assert_eq!(opt.item_type(&types), &Type::F32);

    let arr = types.descriptor(None, &Type::array(Type::CHAR));
    assert!(arr.is_array(&types));
    assert_eq!(arr.component_type(&types), &Type::CHAR);
}

#[test]
fn test_bounded_param_shape() {
    let types = TypeSystem::new();
    let holder = types
        .define(
            ClassBuilder::bean("NumHolder")
                .bounded_type_param("N", Type::I64)
                .property("n", Type::param("N")),
        )
        .expect("define");
    let n = types.properties(holder).get("n").expect("n").ty.clone();
    let desc = types.descriptor(Some(&Type::Class(holder)), &n);
    assert_eq!(desc.actual_class(&types), ClassId::I64);
}

#[test]
fn test_mutually_bounded_params_rejected() {
    let types = TypeSystem::new();
    let err = types
        .define(
            ClassBuilder::bean("Cyc")
                .bounded_type_param("A", Type::param("B"))
                .bounded_type_param("B", Type::list(Type::param("A")))
                .property("a", Type::param("A")),
        )
        .expect_err("bound cycle");
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("refers back"));

    // The name stays usable, and a bound naming only its own parameter is fine.
    let cyc = types
        .define(
            ClassBuilder::bean("Cyc")
                .bounded_type_param("A", Type::list(Type::param("A")))
                .bounded_type_param("B", Type::param("A"))
                .property("b", Type::param("B")),
        )
        .expect("define");
    let value = types.instantiate(&Type::Class(cyc)).expect("instantiate");
    assert_eq!(value.class_id(), cyc);
    let b = types.properties(cyc).get("b").expect("b").ty.clone();
    let desc = types.descriptor(Some(&Type::Class(cyc)), &b);
    assert_eq!(desc.actual_class(&types), ClassId::OBJECT);
}

#[test]
fn test_display() {
    let types = TypeSystem::new();
    assert_eq!(
        types.display(&Type::map(Type::STRING, Type::array(Type::extends(Type::I32)))),
        "Map<String, ? extends i32[]>"
    );
}

#[test]
fn test_instantiate() {
    let types = TypeSystem::new();
    let (_, int_box) = boxes(&types);
    let value = types.instantiate(&Type::Class(int_box)).expect("instantiate");
    let bean = value.as_bean().expect("bean");
    assert_eq!(bean.get("item"), Some(&Value::I32(0)));
    assert_eq!(bean.get("items"), Some(&Value::Null));

    let set = types.instantiate(&Type::set(Type::STRING)).expect("set");
    assert_eq!(set.class_id(), ClassId::INDEX_SET);
    let map = types.instantiate(&Type::map(Type::I32, Type::I32)).expect("map");
    assert_eq!(map.class_id(), ClassId::INDEX_MAP);
    assert_eq!(types.instantiate(&Type::OBJECT).expect("object").len(), Some(0));

    let color = types
        .define(ClassBuilder::enumeration("Color", ["Red", "Green"]))
        .expect("enum");
    assert!(types.instantiate(&Type::Class(color)).is_err());
}

#[test]
fn test_zero_and_empty_values() {
    let types = TypeSystem::new();
    assert_eq!(types.zero_value(&Type::U16), Value::U16(0));
    assert!(types.zero_value(&Type::STRING).is_null());
    assert!(types.zero_value(&Type::vec(Type::I32)).is_null());
    assert_eq!(types.empty_value(&Type::vec(Type::I32)).len(), Some(0));
    assert_eq!(types.zero_value(&Type::option(Type::I32)), Value::none());
}

#[test]
fn test_unknown_class_id_maps_to_object() {
    let types = TypeSystem::new();
    let foreign = ClassId(9_999);
    assert_eq!(types.class(foreign).id(), ClassId::OBJECT);
    assert!(types.try_class(foreign).is_none());
}
