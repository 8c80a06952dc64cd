// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::missing_panics_doc)] // Benchmarks panic on failure
#![allow(clippy::semicolon_if_nothing_returned)] // Benchmark code formatting

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shapeshift::{ClassBuilder, ClassId, Converter, Type, TypeSystem, Value};
use std::sync::Arc;

// ============================================================================
// Leaf conversions
// ============================================================================

/// Benchmark: String -> i32 through the cached leaf lookup
fn bench_text_to_int(c: &mut Criterion) {
    let conv = Converter::new(Arc::new(TypeSystem::new()));
    c.bench_function("text_to_i32", |b| {
        b.iter(|| conv.convert(black_box("123456"), &Type::I32).unwrap())
    });
}

/// Benchmark: i64 -> f64 numeric coercion
fn bench_numeric(c: &mut Criterion) {
    let conv = Converter::new(Arc::new(TypeSystem::new()));
    c.bench_function("i64_to_f64", |b| {
        b.iter(|| conv.convert(black_box(42i64), &Type::F64).unwrap())
    });
}

// ============================================================================
// Structural conversions
// ============================================================================

/// Benchmark: Vec<String> (256) -> Vec<i64>
fn bench_list_of_text(c: &mut Criterion) {
    let conv = Converter::new(Arc::new(TypeSystem::new()));
    let source = Value::list((0..256).map(|i| Value::from(i.to_string())));
    let target = Type::vec(Type::I64);
    c.bench_function("list_256_text_to_i64", |b| {
        b.iter(|| conv.convert(black_box(source.clone()), &target).unwrap())
    });
}

/// Benchmark: map -> generic bean through a subclass binding
fn bench_map_to_bean(c: &mut Criterion) {
    let types = Arc::new(TypeSystem::new());
    let boxed = types
        .define(
            ClassBuilder::bean("Box")
                .type_param("T")
                .property("item", Type::param("T"))
                .property("items", Type::list(Type::param("T"))),
        )
        .unwrap();
    let int_box = types
        .define(ClassBuilder::bean("IntBox").extends(Type::generic(boxed, [Type::I32])))
        .unwrap();
    let conv = Converter::new(types);
    let source = Value::map_of([
        ("item", Value::from("7")),
        ("items", Value::from(vec!["1", "2", "3", "4"])),
    ]);
    let target = Type::Class(int_box);
    c.bench_function("map_to_generic_bean", |b| {
        b.iter(|| conv.convert(black_box(source.clone()), &target).unwrap())
    });
}

/// Benchmark: JSON text -> Map<String, u32>
fn bench_json_text(c: &mut Criterion) {
    let conv = Converter::new(Arc::new(TypeSystem::new()));
    let text = r#"{"a": 1, "b": 2, "c": 3, "d": 4, "e": 5}"#;
    let target = Type::generic(ClassId::BTREE_MAP, [Type::STRING, Type::U32]);
    c.bench_function("json_text_to_map", |b| {
        b.iter(|| conv.convert(black_box(text), &target).unwrap())
    });
}

criterion_group!(
    benches,
    bench_text_to_int,
    bench_numeric,
    bench_list_of_text,
    bench_map_to_bean,
    bench_json_text
);
criterion_main!(benches);
