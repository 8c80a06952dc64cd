// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![cfg(feature = "config-loaders")]
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! YAML configuration flowing into a built converter.

use shapeshift::value::BeanValue;
use shapeshift::{ClassBuilder, ConvertConfig, ConvertError, Converter, Type, TypeSystem, Value};
use std::io::Write;
use std::sync::Arc;

const CONFIG: &str = r#"
max_depth: 3
lookup_cache_capacity: 16
datetime_format: "%d/%m/%Y %H:%M"
copy:
  ignore_null: true
"#;

fn load() -> ConvertConfig {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(CONFIG.as_bytes()).expect("write config");
    ConvertConfig::from_yaml_file(file.path()).expect("load config")
}

#[test]
fn test_file_settings_reach_the_converter() {
    let config = load();
    assert_eq!(config.max_depth, 3);
    assert!(config.copy.ignore_null);

    let conv = Converter::builder(Arc::new(TypeSystem::new()))
        .config(config)
        .build()
        .expect("build");

    let when = conv.convert("02/01/2021 10:10", &Type::DATETIME).expect("parse");
    let expected = chrono::NaiveDate::from_ymd_opt(2021, 1, 2)
        .and_then(|d| d.and_hms_opt(10, 10, 0))
        .expect("valid date");
    assert_eq!(when, Value::DateTime(expected));
    assert_eq!(
        conv.convert(when, &Type::STRING).ok(),
        Some(Value::from("02/01/2021 10:10"))
    );

    let deep = Value::from(vec![vec![vec![vec!["1"]]]]);
    let target = Type::list(Type::list(Type::list(Type::list(Type::I32))));
    let err = conv.convert(deep, &target).expect_err("too deep");
    assert!(matches!(err, ConvertError::DepthExceeded { limit: 3 }));
    assert!(conv.convert(vec!["1"], &Type::list(Type::I32)).is_ok());
}

#[test]
fn test_copy_defaults_from_file() {
    let conv = Converter::builder(Arc::new(TypeSystem::new()))
        .config(load())
        .build()
        .expect("build");
    let user = conv
        .types()
        .define(
            ClassBuilder::bean("User")
                .property("name", Type::STRING)
                .property("email", Type::STRING),
        )
        .expect("define");

    assert!(conv.copy_options().ignore_null);
    let source = Value::Bean(BeanValue::new(user).with("name", "ann").with("email", Value::Null));
    let map = conv.to_map(&source).expect("to map");
    let map = map.as_map().expect("map");
    assert_eq!(map.len(), 1);
    assert_eq!(map.get_str("name"), Some(&Value::from("ann")));
}

#[test]
fn test_invalid_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"lookup_cache_capacity: 0\n").expect("write");
    let err = ConvertConfig::from_yaml_file(file.path()).expect_err("zero capacity");
    assert!(err.is_invalid_argument());

    assert!(ConvertConfig::from_yaml_file("/nonexistent/shapeshift.yaml").is_err());
}
