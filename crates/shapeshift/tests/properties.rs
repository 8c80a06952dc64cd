// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::missing_panics_doc)] // Tests panic on failure
#![allow(clippy::similar_names)] // Test variable naming

//! Property access, common-property mapping and bean copy.

use shapeshift::value::{BeanValue, MapValue};
use shapeshift::{
    ClassBuilder, ClassId, ConvertConfig, Converter, CopyOptions, PropertyDef, Type, TypeSystem,
    Value,
};
use std::sync::Arc;

struct Fixture {
    conv: Converter,
    person: ClassId,
    dto: ClassId,
}

fn fixture() -> Fixture {
    let conv = Converter::new(Arc::new(TypeSystem::new()));
    let types = conv.types();
    let person = types
        .define(
            ClassBuilder::bean("Person")
                .property("name", Type::STRING)
                .property("age", Type::I32)
                .property_def(PropertyDef::new("password", Type::STRING).setter_only()),
        )
        .expect("define Person");
    let dto = types
        .define(
            ClassBuilder::bean("PersonDto")
                .property("name", Type::STRING)
                .property("age", Type::STRING)
                .property_def(PropertyDef::new("created", Type::I64).getter_only()),
        )
        .expect("define PersonDto");
    Fixture { conv, person, dto }
}

fn ann(person: ClassId) -> Value {
    Value::Bean(
        BeanValue::new(person)
            .with("name", "ann")
            .with("age", 30i32)
            .with("password", "hunter2"),
    )
}

#[test]
fn test_common_mapping_respects_access() {
    let f = fixture();
    let source = ann(f.person);
    let target = f.conv.types().instantiate(&Type::Class(f.dto)).expect("dto");

    let (from, to) = f.conv.common_mapping(&source, &target, true, &[]);
    assert_eq!(from, vec!["name", "age"]);
    assert_eq!(to, vec!["name", "age"]);

    let (from, to) = f.conv.common_mapping(&source, &target, true, &["age"]);
    assert_eq!(from, vec!["name"]);
    assert_eq!(to, vec!["name"]);
}

#[test]
fn test_alias_drives_mapping() {
    let f = fixture();
    let card = f
        .conv
        .types()
        .define(
            ClassBuilder::bean("Card")
                .property_def(PropertyDef::new("title", Type::STRING).alias("name")),
        )
        .expect("define Card");
    let target = f.conv.types().instantiate(&Type::Class(card)).expect("card");
    let (from, to) = f.conv.common_mapping(&ann(f.person), &target, true, &[]);
    assert_eq!(from, vec!["name"]);
    assert_eq!(to, vec!["title"]);

    let out = f
        .conv
        .to_bean(&ann(f.person), &Type::Class(card), &CopyOptions::default())
        .expect("to card");
    assert_eq!(
        f.conv.get_property(&out, "title", false).ok(),
        Some(Value::from("ann"))
    );
}

#[test]
fn test_copy_properties_converts_types() {
    let f = fixture();
    let mut target = f.conv.types().instantiate(&Type::Class(f.dto)).expect("dto");
    f.conv
        .copy_properties(&ann(f.person), &mut target, &CopyOptions::default())
        .expect("copy");
    let dto = target.as_bean().expect("bean");
    assert_eq!(dto.get("name"), Some(&Value::from("ann")));
    assert_eq!(dto.get("age"), Some(&Value::from("30")));
    assert_eq!(dto.get("created"), Some(&Value::I64(0)));
    assert!(dto.get("password").is_none());
}

#[test]
fn test_copy_ignore_null_and_override() {
    let f = fixture();
    let source = Value::Bean(BeanValue::new(f.person).with("name", Value::Null).with("age", 5i32));

    let mut target = Value::Bean(BeanValue::new(f.dto).with("name", "old").with("age", "1"));
    let opts = CopyOptions::default().ignore_null(true);
    f.conv.copy_properties(&source, &mut target, &opts).expect("copy");
    assert_eq!(f.conv.get_property(&target, "name", false).ok(), Some(Value::from("old")));
    assert_eq!(f.conv.get_property(&target, "age", false).ok(), Some(Value::from("5")));

    let mut target = Value::Bean(BeanValue::new(f.dto).with("age", "1"));
    let opts = CopyOptions::default().override_existing(false);
    f.conv.copy_properties(&source, &mut target, &opts).expect("copy");
    assert_eq!(f.conv.get_property(&target, "age", false).ok(), Some(Value::from("1")));
}

#[test]
fn test_copy_errors_abort_or_skip() {
    let conv = Converter::new(Arc::new(TypeSystem::new()));
    let types = conv.types();
    let counter = types
        .define(
            ClassBuilder::bean("Counter")
                .property("count", Type::U8)
                .property("label", Type::STRING),
        )
        .expect("define");
    let source = Value::map_of([("count", Value::from("many")), ("label", Value::from("x"))]);

    let mut target = types.instantiate(&Type::Class(counter)).expect("counter");
    assert!(conv
        .copy_properties(&source, &mut target, &CopyOptions::default())
        .is_err());

    let mut target = types.instantiate(&Type::Class(counter)).expect("counter");
    conv.copy_properties(&source, &mut target, &CopyOptions::default().ignore_errors(true))
        .expect("skipped");
    assert_eq!(conv.get_property(&target, "count", false).ok(), Some(Value::U8(0)));
    assert_eq!(conv.get_property(&target, "label", false).ok(), Some(Value::from("x")));
}

#[test]
fn test_copy_into_map_subclass_splits_slots() {
    let conv = Converter::new(Arc::new(TypeSystem::new()));
    let types = conv.types();
    let settings = types
        .define(
            ClassBuilder::bean("Limits")
                .extends(Type::generic(ClassId::INDEX_MAP, [Type::STRING, Type::U32]))
                .property("retries", Type::U8),
        )
        .expect("define");
    let source = Value::map_of([("retries", "3"), ("port", "8080")]);

    let mut target = types.instantiate(&Type::Class(settings)).expect("limits");
    conv.copy_properties(&source, &mut target, &CopyOptions::default())
        .expect("copy");
    let map = target.as_map().expect("map");
    assert_eq!(map.class(), settings);
    assert_eq!(map.props.get("retries"), Some(&Value::U8(3)));
    assert_eq!(map.get_str("port"), Some(&Value::U32(8080)));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_copy_mapped_pairs() {
    let f = fixture();
    let mut target = Value::Map(MapValue::ordered());
    f.conv
        .copy_mapped(
            &ann(f.person),
            &["name", "age"],
            &mut target,
            &["n", "a"],
            &CopyOptions::default(),
        )
        .expect("copy");
    let map = target.as_map().expect("map");
    assert_eq!(map.get_str("n"), Some(&Value::from("ann")));
    assert_eq!(map.get_str("a"), Some(&Value::I32(30)));

    let err = f
        .conv
        .copy_mapped(&ann(f.person), &["name"], &mut target, &[], &CopyOptions::default())
        .expect_err("length mismatch");
    assert!(err.is_invalid_argument());
}

#[test]
fn test_to_bean_and_to_map() {
    let f = fixture();
    let source = Value::map_of([("name", "bob"), ("age", "41")]);
    let person = f
        .conv
        .to_bean(&source, &Type::Class(f.person), &CopyOptions::default())
        .expect("to bean");
    assert_eq!(person.class_id(), f.person);
    assert_eq!(f.conv.get_property(&person, "age", false).ok(), Some(Value::I32(41)));

    let map = f.conv.to_map(&ann(f.person)).expect("to map");
    let map = map.as_map().expect("map");
    assert_eq!(map.len(), 2);
    assert!(map.get_str("password").is_none());

    assert!(f.conv.to_map(&Value::I32(1)).is_err());
    assert_eq!(f.conv.to_map(&Value::Null).ok(), Some(Value::Null));
}

#[test]
fn test_positional_source_uses_indices() {
    let conv = Converter::new(Arc::new(TypeSystem::new()));
    let row = conv
        .types()
        .define(
            ClassBuilder::bean("Row")
                .property_def(PropertyDef::new("left", Type::I32).index(1))
                .property_def(PropertyDef::new("right", Type::I32).index(0)),
        )
        .expect("define Row");
    let out = conv.convert(vec!["10", "20"], &Type::Class(row)).expect("row");
    assert_eq!(conv.get_property(&out, "left", false).ok(), Some(Value::I32(20)));
    assert_eq!(conv.get_property(&out, "right", false).ok(), Some(Value::I32(10)));
}

#[test]
fn test_set_property_through_collections() {
    let conv = Converter::new(Arc::new(TypeSystem::new()));
    let types = conv.types();
    let holder = types
        .define(
            ClassBuilder::bean("Holder")
                .property("tags", Type::list(Type::STRING))
                .property("codes", Type::array(Type::I32))
                .property_def(PropertyDef::new("id", Type::I64).getter_only()),
        )
        .expect("define");
    let mut bean = types.instantiate(&Type::Class(holder)).expect("holder");

    conv.set_property(&mut bean, "tags[2]", 5i32, false).expect("pad and set");
    let tags = conv.get_property(&bean, "tags", false).expect("tags");
    assert_eq!(tags.len(), Some(3));
    assert_eq!(conv.get_property(&bean, "tags[2]", false).ok(), Some(Value::from("5")));
    assert_eq!(conv.get_property(&bean, "tags[0]", false).ok(), Some(Value::Null));

    let err = conv
        .set_property(&mut bean, "codes[0]", 1i32, false)
        .expect_err("array bounds");
    assert!(err.is_property_access());
    conv.set_property(&mut bean, "codes[0]", 1i32, true)
        .expect("ignored");

    let err = conv
        .set_property(&mut bean, "id", 7i64, false)
        .expect_err("read-only");
    assert!(err.is_property_access());
}

#[test]
fn test_index_padding_is_bounded() {
    let conv = Converter::builder(Arc::new(TypeSystem::new()))
        .config(ConvertConfig::new().max_index_padding(8))
        .build()
        .expect("build");
    let types = conv.types();
    let holder = types
        .define(ClassBuilder::bean("Tags").property("tags", Type::list(Type::STRING)))
        .expect("define");
    let mut bean = types.instantiate(&Type::Class(holder)).expect("holder");

    let err = conv
        .set_property(&mut bean, "tags[18446744073709551615]", "x", false)
        .expect_err("index overflow");
    assert!(err.is_property_access());
    conv.set_property(&mut bean, "tags[18446744073709551615]", "x", true)
        .expect("ignored");
    assert!(conv
        .set_property(&mut bean, "tags[10000000000]", "x", false)
        .expect_err("huge index")
        .is_property_access());
    let untouched = conv.get_property(&bean, "tags", false).expect("tags");
    assert_eq!(untouched.len().unwrap_or(0), 0);

    conv.set_property(&mut bean, "tags[7]", "a", false).expect("within padding");
    conv.set_property(&mut bean, "tags[15]", "b", false).expect("within padding");
    assert!(conv.set_property(&mut bean, "tags[24]", "c", false).is_err());
    assert_eq!(
        conv.get_property(&bean, "tags", false).ok().and_then(|t| t.len()),
        Some(16)
    );
}

#[test]
fn test_get_property_error_modes() {
    let f = fixture();
    let person = ann(f.person);
    assert!(f
        .conv
        .get_property(&person, "nickname", false)
        .expect_err("undeclared")
        .is_property_access());
    assert_eq!(
        f.conv.get_property(&person, "nickname", true).ok(),
        Some(Value::Null)
    );
    assert!(f
        .conv
        .get_property(&person, "name..x", true)
        .expect_err("malformed path")
        .is_invalid_argument());
}

#[test]
fn test_set_property_resolves_generic_slot() {
    let conv = Converter::new(Arc::new(TypeSystem::new()));
    let types = conv.types();
    let boxed = types
        .define(
            ClassBuilder::bean("Box")
                .type_param("T")
                .property("items", Type::list(Type::param("T"))),
        )
        .expect("define Box");
    let int_box = types
        .define(ClassBuilder::bean("IntBox").extends(Type::generic(boxed, [Type::I32])))
        .expect("define IntBox");

    let mut bean = types.instantiate(&Type::Class(int_box)).expect("instantiate");
    conv.set_property(&mut bean, "items[0]", "9", false).expect("set");
    assert_eq!(conv.get_property(&bean, "items[0]", false).ok(), Some(Value::I32(9)));
}
